//! Interface of the peripherals the self-test exercises.
//!
//! The board support package implements these traits on top of its drivers.
//! All methods are expected to return immediately, the self-test runs from a
//! single polling loop and must never wait on hardware.

use crate::error::InitError;

/// Number of LEDs in the display bar.
pub const LED_COUNT: usize = 6;

/// Number of potentiometers on the panel.
pub const POT_COUNT: usize = 3;

/// Pots are scanned with 7-bit resolution.
pub const POT_MAX: u8 = 127;

/// Audio inputs are sampled with 12-bit resolution.
pub const ADC_MAX: u16 = 4095;

/// One of the two audio/CV channels, used both for inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioChannel {
    A,
    B,
}

impl AudioChannel {
    pub const ALL: [AudioChannel; 2] = [AudioChannel::A, AudioChannel::B];

    pub fn name(self) -> &'static str {
        match self {
            AudioChannel::A => "A",
            AudioChannel::B => "B",
        }
    }
}

/// Coupling of audio outputs, shared by both channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Coupling {
    Ac,
    #[default]
    Dc,
}

impl Coupling {
    pub fn name(self) -> &'static str {
        match self {
            Coupling::Ac => "AC",
            Coupling::Dc => "DC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    One,
    Two,
}

pub trait Leds {
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Set brightness of a single LED. Indexes outside of the bar are ignored.
    fn set_brightness(&mut self, index: usize, brightness: u8);

    fn set_all(&mut self, on: bool);

    /// Run one cycle of the LED driver's built-in startup animation.
    fn play_startup_animation(&mut self);
}

/// Potentiometers and buttons of the panel.
pub trait Controls {
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Refresh debounced buttons and scanned pots. Called once per tick
    /// before any reading.
    fn scan(&mut self) {}

    /// Value of the pot between 0 and [`POT_MAX`]. Unknown pots read as 0.
    fn read_pot(&mut self, index: usize) -> u8;

    fn is_button_down(&mut self, button: ButtonId) -> bool;
}

pub trait AudioInput {
    fn init(&mut self) -> Result<(), InitError>;

    /// Kick off the next conversion.
    fn update(&mut self) {}

    /// Latest raw sample between 0 and [`ADC_MAX`].
    fn read_raw(&mut self, channel: AudioChannel) -> u16;
}

pub trait AudioOutput {
    fn init(&mut self) -> Result<(), InitError>;

    fn set_voltage(&mut self, channel: AudioChannel, volts: f32);

    fn set_coupling(&mut self, channel: AudioChannel, coupling: Coupling);
}

pub trait PulseInput {
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Sample the pin and run the debouncer.
    fn poll(&mut self) {}

    /// Debounced level of the input.
    fn read(&mut self) -> bool;
}

pub trait PulseOutput {
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    fn set(&mut self, high: bool);
}

/// All drivers needed by the self-test.
///
/// Pulse input and output are separate capabilities. If the board drives
/// both through a single GPIO driver, it is up to the caller to split it.
pub struct Peripherals<L, C, AI, AO, PI, PO> {
    pub leds: L,
    pub controls: C,
    pub audio_input: AI,
    pub audio_output: AO,
    pub pulse_input: PI,
    pub pulse_output: PO,
}
