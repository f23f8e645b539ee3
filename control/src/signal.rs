//! Pure numeric building blocks of the self-test.

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::hardware::{ADC_MAX, LED_COUNT, POT_MAX};
use crate::selection::Selection;
use crate::time::Duration;

/// Raw reading of an audio input sitting at 0 V.
pub const ADC_CENTER: u16 = 2048;

/// Lower bounds of deviation for 1 to 6 lit LEDs of the meter.
///
/// The full deviation range 0-2047 is split into six bands of ~340, shifted
/// by half a band so that noise around the center keeps the meter dark.
const VU_THRESHOLDS: [u16; LED_COUNT] = [170, 510, 850, 1190, 1530, 1870];

/// Pick input or output based on pot position.
///
/// The first third of the travel selects audio A, the second audio B and the
/// last one pulse. Pot resting at 0 deselects.
pub fn pot_to_selection(value: u8) -> Selection {
    match value {
        0 => Selection::None,
        1..=42 => Selection::AudioA,
        43..=84 => Selection::AudioB,
        _ => Selection::Pulse,
    }
}

/// Number of LEDs representing pot position, rounded half up.
pub fn pot_to_led_count(value: u8) -> usize {
    let value = value.min(POT_MAX) as usize;
    let max = POT_MAX as usize;
    ((value * LED_COUNT + max / 2) / max).min(LED_COUNT)
}

/// Absolute distance of a raw sample from the DC midpoint.
pub fn deviation_from_center(raw: u16) -> u16 {
    raw.min(ADC_MAX).abs_diff(ADC_CENTER)
}

/// Number of LEDs lit by the meter for the given deviation.
pub fn vu_level(deviation: u16) -> usize {
    VU_THRESHOLDS.iter().filter(|t| deviation >= **t).count()
}

/// Position within the waveform period in milliseconds.
///
/// This is derived from the time elapsed since the waveform started, not
/// from counting ticks, so irregular polling does not bend the frequency.
pub fn phase_ms(elapsed: Duration, period_ms: u32) -> u32 {
    if period_ms == 0 {
        return 0;
    }
    (elapsed.to_millis() % u64::from(period_ms)) as u32
}

/// Triangle rising from 0 to `amplitude` during the first half of the
/// period and falling back during the second.
pub fn triangle_voltage(phase_ms: u32, period_ms: u32, amplitude: f32) -> f32 {
    if period_ms == 0 {
        return 0.0;
    }
    let position = phase_ms as f32 / period_ms as f32;
    let voltage = amplitude * (1.0 - (2.0 * position - 1.0).abs());
    voltage.clamp(0.0, amplitude)
}

/// Square wave, high during the first half of the period.
pub fn square_high(phase_ms: u32, period_ms: u32) -> bool {
    phase_ms < period_ms / 2
}
