//! Interactive self-test of the Brain carrier board.
//!
//! The crate is free of any hardware binding. The board support package
//! implements the traits from [`hardware`], hands them over inside
//! [`Peripherals`] and then keeps calling [`Diagnostics::tick`] from its main
//! loop.
//!
//! Following is the flow of a single tick once the LED test phases are over:
//!
//! ```text
//!   [Pots] [Buttons]     [Audio in] [Pulse in]     [Audio out] [Pulse out]
//!       |    |                |        |                 A          A
//!       V    V                V        V                 |          |
//!     {Snapshot}          [ InputTester ]           [ OutputTester ]
//!         |                     A   |                     A
//!         |   (selection)       |   | (level)             | (selection, coupling)
//!         +-------------> [ Router ] <--------------------+
//!                               |
//!                               | (Screen)
//!                               V
//!                          [ LedBar ] ------> [LEDs]
//! ```
//!
//! Before that, [`Diagnostics`] runs the startup animation and sweeps
//! brightness of every LED, so the operator can inspect the display first.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod log;

pub mod config;
pub mod controls;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod hardware;
pub mod input;
pub mod meter;
pub mod output;
pub mod router;
pub mod selection;
pub mod signal;
pub mod time;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use diagnostics::{Diagnostics, Phase, SweepCursor};
pub use error::{Health, InitError, Subsystem};
pub use hardware::{
    AudioChannel, AudioInput, AudioOutput, ButtonId, Controls, Coupling, Leds, Peripherals,
    PulseInput, PulseOutput,
};
pub use selection::{SelectedInput, SelectedOutput, Selection};
pub use time::{Duration, Instant};
