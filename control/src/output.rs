//! Test signal generation on the audio/CV and pulse outputs.
//!
//! Audio outputs carry a 1 Hz triangle between 0 and 10 V, the pulse output
//! a 1 Hz square. Both are derived from wall-clock time elapsed since the
//! output was selected, so an irregular polling loop never bends the
//! frequency. Only one output is driven at a time. The others are parked:
//! audio at its idle voltage for the current coupling, pulse low.

use crate::config::Config;
use crate::error::{Health, Subsystem};
use crate::hardware::{AudioChannel, AudioOutput, Coupling, PulseOutput};
use crate::log::{debug, info};
use crate::selection::Selection;
use crate::signal;
use crate::time::{elapsed, Duration, Instant};

/// Progress of the generated waveform.
///
/// The origin is taken on the first tick after the selection changed, the
/// phase is recomputed from it on every tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaveformPhase {
    pub origin: Option<Instant>,
    pub last_phase_ms: Option<u32>,
    pub pulse_level: bool,
}

#[derive(Debug)]
pub struct OutputTester<A, P> {
    audio: A,
    pulse: P,
    selected: Selection,
    coupling: Coupling,
    waveform: WaveformPhase,
    voltage: f32,
    period_ms: u32,
    amplitude: f32,
    dc_idle_voltage: f32,
    ac_idle_voltage: f32,
    readout_interval: Duration,
    last_readout: Option<Instant>,
}

impl<A: AudioOutput, P: PulseOutput> OutputTester<A, P> {
    pub fn new(audio: A, pulse: P, config: &Config) -> Self {
        Self {
            audio,
            pulse,
            selected: Selection::None,
            coupling: Coupling::Dc,
            waveform: WaveformPhase::default(),
            voltage: config.dc_idle_voltage,
            period_ms: config.waveform_period_ms,
            amplitude: config.waveform_amplitude,
            dc_idle_voltage: config.dc_idle_voltage,
            ac_idle_voltage: config.ac_idle_voltage,
            readout_interval: config.readout_interval,
            last_readout: None,
        }
    }

    /// Bring up outputs into a known state: DC coupled, parked, pulse low.
    pub fn init(&mut self, health: &mut Health) {
        info!("Initializing outputs");
        health.record(Subsystem::AudioOutput, self.audio.init());
        health.record(Subsystem::PulseOutput, self.pulse.init());

        self.coupling = Coupling::Dc;
        for channel in AudioChannel::ALL {
            self.audio.set_coupling(channel, self.coupling);
        }
        self.park();
        info!("Default coupling: {}", self.coupling.name());
    }

    pub fn set_selection(&mut self, selection: Selection, announce: bool) {
        if selection == self.selected {
            return;
        }

        self.park();
        self.selected = selection;
        self.waveform = WaveformPhase::default();
        self.last_readout = None;

        if announce {
            info!("Output selected: {}", describe(selection));
        }
    }

    pub fn set_coupling(&mut self, ac: bool) {
        self.set_coupling_mode(if ac { Coupling::Ac } else { Coupling::Dc });
    }

    /// Switch coupling of both audio outputs together.
    ///
    /// Channels that are not generating are moved to the idle voltage of
    /// the new coupling.
    pub fn set_coupling_mode(&mut self, coupling: Coupling) {
        if coupling == self.coupling {
            return;
        }

        self.coupling = coupling;
        for channel in AudioChannel::ALL {
            self.audio.set_coupling(channel, coupling);
        }

        let idle = self.idle_voltage();
        let generating = self.selected.audio_channel();
        for channel in AudioChannel::ALL {
            if Some(channel) != generating {
                self.audio.set_voltage(channel, idle);
            }
        }
        if generating.is_none() {
            self.voltage = idle;
        }

        info!("Coupling mode: {}", coupling.name());
    }

    pub fn tick(&mut self, now: Instant) {
        if self.selected.is_none() {
            return;
        }

        let origin = *self.waveform.origin.get_or_insert(now);
        let phase_ms = signal::phase_ms(elapsed(origin, now), self.period_ms);
        if self.waveform.last_phase_ms == Some(phase_ms) {
            return;
        }
        self.waveform.last_phase_ms = Some(phase_ms);

        match self.selected {
            Selection::AudioA => self.generate_triangle(AudioChannel::A, phase_ms, now),
            Selection::AudioB => self.generate_triangle(AudioChannel::B, phase_ms, now),
            Selection::Pulse => self.generate_square(phase_ms),
            Selection::None => {}
        }
    }

    fn generate_triangle(&mut self, channel: AudioChannel, phase_ms: u32, now: Instant) {
        self.voltage = signal::triangle_voltage(phase_ms, self.period_ms, self.amplitude);
        self.audio.set_voltage(channel, self.voltage);

        let due = self
            .last_readout
            .map_or(true, |last| elapsed(last, now) >= self.readout_interval);
        if due {
            self.last_readout = Some(now);
            debug!(
                "Output {}: {}V (phase: {}ms/{}ms)",
                channel.name(),
                self.voltage,
                phase_ms,
                self.period_ms
            );
        }
    }

    fn generate_square(&mut self, phase_ms: u32) {
        let high = signal::square_high(phase_ms, self.period_ms);
        if high != self.waveform.pulse_level {
            self.waveform.pulse_level = high;
            self.pulse.set(high);
            info!(
                "Pulse output: {} (phase: {}ms/{}ms)",
                if high { "HIGH" } else { "LOW" },
                phase_ms,
                self.period_ms
            );
        }
    }

    fn park(&mut self) {
        let idle = self.idle_voltage();
        for channel in AudioChannel::ALL {
            self.audio.set_voltage(channel, idle);
        }
        self.voltage = idle;
        self.pulse.set(false);
        self.waveform.pulse_level = false;
    }

    fn idle_voltage(&self) -> f32 {
        match self.coupling {
            Coupling::Dc => self.dc_idle_voltage,
            Coupling::Ac => self.ac_idle_voltage,
        }
    }

    pub fn selected(&self) -> Selection {
        self.selected
    }

    pub fn coupling(&self) -> Coupling {
        self.coupling
    }

    /// Voltage last written to the generating channel, or the idle voltage.
    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    pub fn waveform(&self) -> &WaveformPhase {
        &self.waveform
    }
}

fn describe(selection: Selection) -> &'static str {
    match selection {
        Selection::None => "NONE",
        Selection::AudioA => "AUDIO_A (1Hz triangle wave)",
        Selection::AudioB => "AUDIO_B (1Hz triangle wave)",
        Selection::Pulse => "PULSE (1Hz square wave)",
    }
}
