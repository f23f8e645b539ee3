//! Top-level state machine of the self-test.
//!
//! The LEDs are checked first, with a few runs of the startup animation
//! followed by a sweep of brightness levels over each LED. Once all LEDs
//! passed, the interactive mode takes over and stays for the rest of the
//! runtime.

use crate::config::Config;
use crate::controls::Snapshot;
use crate::display::{DisplayConfig, LedBar};
use crate::error::{Health, Subsystem};
use crate::hardware::{
    AudioInput, AudioOutput, Controls, Leds, Peripherals, PulseInput, PulseOutput, LED_COUNT,
};
use crate::input::InputTester;
use crate::log::{debug, info};
use crate::output::OutputTester;
use crate::router::Router;
use crate::time::{elapsed, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    StartupAnimation,
    BrightnessSweep,
    Interactive,
}

/// Position of the brightness sweep.
///
/// The step goes back to 0 every time the sweep moves to the next LED.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SweepCursor {
    pub led: usize,
    pub step: usize,
}

#[derive(Debug)]
pub struct Diagnostics<L, C, AI, AO, PI, PO> {
    config: Config,
    leds: LedBar<L>,
    controls: C,
    input: InputTester<AI, PI>,
    output: OutputTester<AO, PO>,
    router: Router,
    phase: Phase,
    cursor: SweepCursor,
    animation_cycles: u8,
    last_step: Instant,
    initialized: bool,
    health: Health,
}

impl<L, C, AI, AO, PI, PO> Diagnostics<L, C, AI, AO, PI, PO>
where
    L: Leds,
    C: Controls,
    AI: AudioInput,
    AO: AudioOutput,
    PI: PulseInput,
    PO: PulseOutput,
{
    pub fn new(peripherals: Peripherals<L, C, AI, AO, PI, PO>, config: Config) -> Self {
        let Peripherals {
            leds,
            controls,
            audio_input,
            audio_output,
            pulse_input,
            pulse_output,
        } = peripherals;

        Self {
            leds: LedBar::new(leds),
            controls,
            input: InputTester::new(audio_input, pulse_input, &config),
            output: OutputTester::new(audio_output, pulse_output, &config),
            router: Router::new(&config),
            phase: Phase::StartupAnimation,
            cursor: SweepCursor::default(),
            animation_cycles: 0,
            last_step: Instant::from_ticks(0),
            initialized: false,
            health: Health::default(),
            config,
        }
    }

    pub fn with_default_config(peripherals: Peripherals<L, C, AI, AO, PI, PO>) -> Self {
        Self::new(peripherals, Config::default())
    }

    /// Bring up all the hardware and start the LED test.
    ///
    /// Failing subsystems are recorded in [`Health`] and the self-test
    /// carries on without them. Calling this again does nothing.
    pub fn init(&mut self, now: Instant) {
        if self.initialized {
            return;
        }

        info!("Brain diagnostics starting");

        self.health.record(Subsystem::Leds, self.leds.init());
        self.health.record(Subsystem::Controls, self.controls.init());
        self.input.init(&mut self.health);
        self.output.init(&mut self.health);

        if !self.health.is_healthy() {
            info!(
                "Continuing with {} degraded subsystem(s)",
                self.health.failures().len()
            );
        }

        self.phase = Phase::StartupAnimation;
        self.animation_cycles = 0;
        self.cursor = SweepCursor::default();
        self.last_step = now;
        self.initialized = true;

        info!("Starting LED diagnostics");
    }

    /// Advance the self-test. Call this from the main loop as often as
    /// possible.
    pub fn tick(&mut self, now: Instant) {
        if !self.initialized {
            self.init(now);
        }

        match self.phase {
            Phase::StartupAnimation => self.tick_startup_animation(now),
            Phase::BrightnessSweep => self.tick_brightness_sweep(now),
            Phase::Interactive => self.tick_interactive(now),
        }
    }

    fn tick_startup_animation(&mut self, now: Instant) {
        if elapsed(self.last_step, now) < self.config.startup_animation_interval {
            return;
        }
        self.last_step = now;

        info!(
            "Startup animation {}/{}",
            self.animation_cycles + 1,
            self.config.startup_animation_cycles
        );
        self.leds.play_startup_animation();
        self.animation_cycles = self.animation_cycles.saturating_add(1);

        if self.animation_cycles >= self.config.startup_animation_cycles {
            info!("Startup animation complete, testing LED brightness");
            self.cursor = SweepCursor::default();
            self.phase = Phase::BrightnessSweep;
        }
    }

    fn tick_brightness_sweep(&mut self, now: Instant) {
        if elapsed(self.last_step, now) < self.config.brightness_step_interval {
            return;
        }
        self.last_step = now;

        let levels = self.config.brightness_levels;
        let SweepCursor { led, step } = self.cursor;
        let Some(brightness) = levels.get(step).copied() else {
            self.finish_brightness_sweep();
            return;
        };

        debug!(
            "LED {}: brightness {}% ({}/255)",
            led + 1,
            (step + 1) * 100 / levels.len(),
            brightness
        );
        self.leds.set_brightness(led, brightness);

        if step + 1 < levels.len() {
            self.cursor.step += 1;
            return;
        }

        self.leds.off(led);
        self.cursor = SweepCursor {
            led: led + 1,
            step: 0,
        };
        if self.cursor.led >= LED_COUNT {
            self.finish_brightness_sweep();
        }
    }

    fn finish_brightness_sweep(&mut self) {
        self.leds.off_all();
        self.phase = Phase::Interactive;
        info!("LED diagnostics passed, entering interactive mode");
        info!("Hold both buttons and turn pots to select input, output and coupling");
    }

    fn tick_interactive(&mut self, now: Instant) {
        self.controls.scan();
        let snapshot = Snapshot::sample(&mut self.controls);

        self.input.poll(now);
        self.output.tick(now);

        let screen = self
            .router
            .route_tick(&snapshot, &mut self.input, &mut self.output);
        self.leds.show(screen);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> SweepCursor {
        self.cursor
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn input(&self) -> &InputTester<AI, PI> {
        &self.input
    }

    pub fn output(&self) -> &OutputTester<AO, PO> {
        &self.output
    }

    /// Pattern last written to the LED bar, if known.
    pub fn shown(&self) -> Option<DisplayConfig> {
        self.leds.shown()
    }
}
