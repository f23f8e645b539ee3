//! Peak hold ballistics of the VU meter.

use crate::signal;
use crate::time::{elapsed, Duration, Instant};

/// Meter peak with a hold window.
///
/// A new higher peak is taken immediately and restarts the hold window.
/// Lower samples are ignored until the window passes, then the peak drops to
/// the latest sample, never below it. This gives fast attack and a readable
/// release on the LED bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeakHold {
    peak: u16,
    since: Option<Instant>,
}

impl PeakHold {
    pub fn update(&mut self, deviation: u16, now: Instant, hold: Duration) {
        let since = match self.since {
            Some(since) if deviation <= self.peak => since,
            _ => {
                self.peak = deviation;
                self.since = Some(now);
                return;
            }
        };

        if elapsed(since, now) > hold {
            self.peak = deviation;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn peak(&self) -> u16 {
        self.peak
    }

    /// Number of LEDs to light for the held peak.
    pub fn level(&self) -> usize {
        signal::vu_level(self.peak)
    }
}
