//! Hardware bring-up failures and the report of degraded subsystems.

use core::fmt;

use heapless::Vec;

use crate::log::warn;

/// Failure reported by a driver during its initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The peripheral did not respond to bring-up.
    NotResponding,
    /// The peripheral responded, but rejected its configuration.
    Rejected,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::NotResponding => write!(f, "peripheral not responding"),
            InitError::Rejected => write!(f, "configuration rejected"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InitError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            InitError::NotResponding => defmt::write!(f, "peripheral not responding"),
            InitError::Rejected => defmt::write!(f, "configuration rejected"),
        }
    }
}

/// Hardware subsystem brought up by the self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    Leds,
    Controls,
    AudioInput,
    AudioOutput,
    PulseInput,
    PulseOutput,
}

impl Subsystem {
    pub fn name(self) -> &'static str {
        match self {
            Subsystem::Leds => "LEDs",
            Subsystem::Controls => "pots and buttons",
            Subsystem::AudioInput => "audio/CV inputs",
            Subsystem::AudioOutput => "audio/CV outputs",
            Subsystem::PulseInput => "pulse input",
            Subsystem::PulseOutput => "pulse output",
        }
    }
}

const SUBSYSTEMS: usize = 6;

/// Subsystems that failed their bring-up.
///
/// A failure never stops the self-test. It is logged and kept here, the
/// failing subsystem then runs degraded so the operator can see which part
/// of the board misbehaves.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Health {
    failures: Vec<(Subsystem, InitError), SUBSYSTEMS>,
}

impl Health {
    /// Record result of a bring-up. Returns whether the subsystem is usable.
    pub fn record(&mut self, subsystem: Subsystem, result: Result<(), InitError>) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                warn!("Failed to initialize {}: {}", subsystem.name(), error);
                if !self.is_degraded(subsystem) {
                    // There is a slot for every subsystem.
                    let _ = self.failures.push((subsystem, error));
                }
                false
            }
        }
    }

    #[must_use]
    pub fn is_degraded(&self, subsystem: Subsystem) -> bool {
        self.failures.iter().any(|(s, _)| *s == subsystem)
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[(Subsystem, InitError)] {
        &self.failures
    }
}
