//! Measurement of the audio/CV and pulse inputs.

use crate::config::Config;
use crate::error::{Health, Subsystem};
use crate::hardware::{AudioInput, PulseInput};
use crate::log::{debug, info};
use crate::meter::PeakHold;
use crate::selection::Selection;
use crate::signal::{self, ADC_CENTER};
use crate::time::{elapsed, Duration, Instant};

/// Tester of the selected input.
///
/// Audio inputs are shown as a VU meter, measuring how far the signal
/// swings from the DC midpoint. The pulse input is shown as its level.
/// Changing the selection drops all measurements of the previous input.
#[derive(Debug)]
pub struct InputTester<A, P> {
    audio: A,
    pulse: P,
    audio_available: bool,
    selected: Selection,
    peak_hold: PeakHold,
    deviation: u16,
    pulse_level: bool,
    pulse_baseline: Option<bool>,
    pulse_edges: u32,
    hold: Duration,
    readout_interval: Duration,
    last_readout: Option<Instant>,
}

impl<A: AudioInput, P: PulseInput> InputTester<A, P> {
    pub fn new(audio: A, pulse: P, config: &Config) -> Self {
        Self {
            audio,
            pulse,
            audio_available: true,
            selected: Selection::None,
            peak_hold: PeakHold::default(),
            deviation: 0,
            pulse_level: false,
            pulse_baseline: None,
            pulse_edges: 0,
            hold: config.peak_hold,
            readout_interval: config.readout_interval,
            last_readout: None,
        }
    }

    pub fn init(&mut self, health: &mut Health) {
        info!("Initializing inputs");
        self.audio_available = health.record(Subsystem::AudioInput, self.audio.init());
        health.record(Subsystem::PulseInput, self.pulse.init());
    }

    pub fn set_selection(&mut self, selection: Selection, announce: bool) {
        if selection == self.selected {
            return;
        }

        self.selected = selection;
        self.peak_hold.reset();
        self.deviation = 0;
        self.pulse_level = false;
        self.pulse_baseline = None;
        self.pulse_edges = 0;
        self.last_readout = None;

        if announce {
            info!("Input selected: {}", selection.name());
        }
    }

    pub fn poll(&mut self, now: Instant) {
        if self.audio_available {
            self.audio.update();
        }
        self.pulse.poll();

        if let Some(channel) = self.selected.audio_channel() {
            // Unavailable ADC reads as silence.
            let raw = if self.audio_available {
                self.audio.read_raw(channel)
            } else {
                ADC_CENTER
            };
            self.deviation = signal::deviation_from_center(raw);
            self.peak_hold.update(self.deviation, now, self.hold);
            self.readout(now);
        } else if self.selected == Selection::Pulse {
            let level = self.pulse.read();
            self.track_pulse(level);
        }
    }

    fn track_pulse(&mut self, level: bool) {
        self.pulse_level = level;
        match self.pulse_baseline {
            Some(previous) if previous != level => {
                self.pulse_edges = self.pulse_edges.saturating_add(1);
                info!(
                    "Pulse input: {} (edge {})",
                    if level { "HIGH" } else { "LOW" },
                    self.pulse_edges
                );
            }
            _ => {}
        }
        self.pulse_baseline = Some(level);
    }

    fn readout(&mut self, now: Instant) {
        let due = self
            .last_readout
            .map_or(true, |last| elapsed(last, now) >= self.readout_interval);
        if due {
            self.last_readout = Some(now);
            debug!(
                "Input {}: deviation {} peak {} level {}",
                self.selected.name(),
                self.deviation,
                self.peak_hold.peak(),
                self.peak_hold.level()
            );
        }
    }

    pub fn selected(&self) -> Selection {
        self.selected
    }

    /// Number of LEDs of the meter, 0 unless an audio input is selected.
    pub fn vu_level(&self) -> usize {
        if self.selected.audio_channel().is_some() {
            self.peak_hold.level()
        } else {
            0
        }
    }

    /// Debounced level of the pulse input as of the last poll.
    pub fn pulse_high(&self) -> bool {
        self.pulse_level
    }

    /// Level changes of the pulse input seen since it was selected.
    pub fn pulse_edges(&self) -> u32 {
        self.pulse_edges
    }

    pub fn peak(&self) -> u16 {
        self.peak_hold.peak()
    }
}
