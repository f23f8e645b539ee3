//! Timing and thresholds of the self-test.

use crate::hardware::Coupling;
use crate::time::Duration;

/// Number of brightness levels each LED goes through during the sweep.
pub const BRIGHTNESS_STEPS: usize = 5;

/// Tweaking of the default self-test behavior.
///
/// The defaults reproduce the factory procedure: three startup animations a
/// second apart, 20 % brightness steps every half a second, a 1 Hz test
/// waveform swinging between 0 and 10 V and a 100 ms peak hold on the meter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub startup_animation_interval: Duration,
    pub startup_animation_cycles: u8,
    pub brightness_step_interval: Duration,
    pub brightness_levels: [u8; BRIGHTNESS_STEPS],
    pub peak_hold: Duration,
    pub waveform_period_ms: u32,
    pub waveform_amplitude: f32,
    /// Voltage of an idle audio output while DC coupled. Mid-rail.
    pub dc_idle_voltage: f32,
    /// Voltage of an idle audio output while AC coupled.
    pub ac_idle_voltage: f32,
    /// Pots 1 and 2 must be above this value to take over the selection.
    pub pot_dead_zone: u8,
    /// Pot 2 at or above this value selects AC coupling, DC below.
    pub coupling_ac_threshold: u8,
    /// Minimum spacing of numeric readouts in the log.
    pub readout_interval: Duration,
}

impl Config {
    #[must_use]
    pub fn coupling_for_pot(&self, value: u8) -> Coupling {
        if value >= self.coupling_ac_threshold {
            Coupling::Ac
        } else {
            Coupling::Dc
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            startup_animation_interval: Duration::millis(1000),
            startup_animation_cycles: 3,
            brightness_step_interval: Duration::millis(500),
            // 20 %, 40 %, 60 %, 80 % and 100 % of the full scale
            brightness_levels: [51, 102, 153, 204, 255],
            peak_hold: Duration::millis(100),
            waveform_period_ms: 1000,
            waveform_amplitude: 10.0,
            dc_idle_voltage: 5.0,
            ac_idle_voltage: 0.0,
            pot_dead_zone: 5,
            coupling_ac_threshold: 64,
            readout_interval: Duration::millis(100),
        }
    }
}
