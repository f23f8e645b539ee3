//! Recording drivers standing in for the board in unit tests.
//!
//! Every mock is a cheap handle to shared state, so a test can keep a clone
//! while the tested component owns the other one.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::InitError;
use crate::hardware::{
    AudioChannel, AudioInput, AudioOutput, ButtonId, Controls, Coupling, Leds, PulseInput,
    PulseOutput, LED_COUNT, POT_COUNT,
};
use crate::signal::ADC_CENTER;
use crate::time::Instant;

pub fn at(ms: u64) -> Instant {
    Instant::from_ticks(ms * 1000)
}

fn channel_index(channel: AudioChannel) -> usize {
    match channel {
        AudioChannel::A => 0,
        AudioChannel::B => 1,
    }
}

#[derive(Debug, Default)]
struct LedsState {
    brightness: [u8; LED_COUNT],
    writes: usize,
    animations: usize,
    fail: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MockLeds(Rc<RefCell<LedsState>>);

impl MockLeds {
    pub fn failing() -> Self {
        let leds = Self::default();
        leds.0.borrow_mut().fail = true;
        leds
    }

    pub fn brightness(&self) -> [u8; LED_COUNT] {
        self.0.borrow().brightness
    }

    pub fn lit(&self) -> [bool; LED_COUNT] {
        self.brightness().map(|b| b > 0)
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub fn animations(&self) -> usize {
        self.0.borrow().animations
    }
}

impl Leds for MockLeds {
    fn init(&mut self) -> Result<(), InitError> {
        if self.0.borrow().fail {
            Err(InitError::NotResponding)
        } else {
            Ok(())
        }
    }

    fn set_brightness(&mut self, index: usize, brightness: u8) {
        let mut state = self.0.borrow_mut();
        if index < LED_COUNT {
            state.brightness[index] = brightness;
        }
        state.writes += 1;
    }

    fn set_all(&mut self, on: bool) {
        let mut state = self.0.borrow_mut();
        state.brightness = [if on { u8::MAX } else { 0 }; LED_COUNT];
        state.writes += 1;
    }

    fn play_startup_animation(&mut self) {
        let mut state = self.0.borrow_mut();
        state.animations += 1;
        state.brightness = [u8::MAX; LED_COUNT];
    }
}

#[derive(Debug, Default)]
struct ControlsState {
    pots: [u8; POT_COUNT],
    buttons: [bool; 2],
    scans: usize,
}

#[derive(Debug, Default, Clone)]
pub struct MockControls(Rc<RefCell<ControlsState>>);

impl MockControls {
    pub fn set_pots(&self, pots: [u8; POT_COUNT]) {
        self.0.borrow_mut().pots = pots;
    }

    pub fn set_buttons(&self, buttons: [bool; 2]) {
        self.0.borrow_mut().buttons = buttons;
    }

    pub fn scans(&self) -> usize {
        self.0.borrow().scans
    }
}

impl Controls for MockControls {
    fn scan(&mut self) {
        self.0.borrow_mut().scans += 1;
    }

    fn read_pot(&mut self, index: usize) -> u8 {
        self.0.borrow().pots.get(index).copied().unwrap_or(0)
    }

    fn is_button_down(&mut self, button: ButtonId) -> bool {
        let state = self.0.borrow();
        match button {
            ButtonId::One => state.buttons[0],
            ButtonId::Two => state.buttons[1],
        }
    }
}

#[derive(Debug)]
struct AudioInputState {
    raw: [u16; 2],
    updates: usize,
    reads: usize,
    fail: bool,
}

impl Default for AudioInputState {
    fn default() -> Self {
        Self {
            raw: [ADC_CENTER; 2],
            updates: 0,
            reads: 0,
            fail: false,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MockAudioInput(Rc<RefCell<AudioInputState>>);

impl MockAudioInput {
    pub fn failing() -> Self {
        let input = Self::default();
        input.0.borrow_mut().fail = true;
        input
    }

    pub fn set_raw(&self, channel: AudioChannel, raw: u16) {
        self.0.borrow_mut().raw[channel_index(channel)] = raw;
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }

    pub fn updates(&self) -> usize {
        self.0.borrow().updates
    }
}

impl AudioInput for MockAudioInput {
    fn init(&mut self) -> Result<(), InitError> {
        if self.0.borrow().fail {
            Err(InitError::NotResponding)
        } else {
            Ok(())
        }
    }

    fn update(&mut self) {
        self.0.borrow_mut().updates += 1;
    }

    fn read_raw(&mut self, channel: AudioChannel) -> u16 {
        let mut state = self.0.borrow_mut();
        state.reads += 1;
        state.raw[channel_index(channel)]
    }
}

#[derive(Debug, Default)]
struct AudioOutputState {
    voltage: [f32; 2],
    coupling: [Coupling; 2],
    voltage_writes: Vec<(AudioChannel, f32)>,
    coupling_writes: Vec<(AudioChannel, Coupling)>,
    fail: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MockAudioOutput(Rc<RefCell<AudioOutputState>>);

impl MockAudioOutput {
    pub fn failing() -> Self {
        let output = Self::default();
        output.0.borrow_mut().fail = true;
        output
    }

    pub fn voltage(&self, channel: AudioChannel) -> f32 {
        self.0.borrow().voltage[channel_index(channel)]
    }

    pub fn coupling(&self, channel: AudioChannel) -> Coupling {
        self.0.borrow().coupling[channel_index(channel)]
    }

    pub fn voltage_writes(&self) -> Vec<(AudioChannel, f32)> {
        self.0.borrow().voltage_writes.clone()
    }

    pub fn coupling_writes(&self) -> Vec<(AudioChannel, Coupling)> {
        self.0.borrow().coupling_writes.clone()
    }

    pub fn clear_writes(&self) {
        let mut state = self.0.borrow_mut();
        state.voltage_writes.clear();
        state.coupling_writes.clear();
    }
}

impl AudioOutput for MockAudioOutput {
    fn init(&mut self) -> Result<(), InitError> {
        if self.0.borrow().fail {
            Err(InitError::Rejected)
        } else {
            Ok(())
        }
    }

    fn set_voltage(&mut self, channel: AudioChannel, volts: f32) {
        let mut state = self.0.borrow_mut();
        state.voltage[channel_index(channel)] = volts;
        state.voltage_writes.push((channel, volts));
    }

    fn set_coupling(&mut self, channel: AudioChannel, coupling: Coupling) {
        let mut state = self.0.borrow_mut();
        state.coupling[channel_index(channel)] = coupling;
        state.coupling_writes.push((channel, coupling));
    }
}

#[derive(Debug, Default)]
struct PulseInputState {
    level: bool,
    polls: usize,
    fail: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MockPulseInput(Rc<RefCell<PulseInputState>>);

impl MockPulseInput {
    pub fn failing() -> Self {
        let input = Self::default();
        input.0.borrow_mut().fail = true;
        input
    }

    pub fn set_level(&self, level: bool) {
        self.0.borrow_mut().level = level;
    }

    pub fn polls(&self) -> usize {
        self.0.borrow().polls
    }
}

impl PulseInput for MockPulseInput {
    fn init(&mut self) -> Result<(), InitError> {
        if self.0.borrow().fail {
            Err(InitError::NotResponding)
        } else {
            Ok(())
        }
    }

    fn poll(&mut self) {
        self.0.borrow_mut().polls += 1;
    }

    fn read(&mut self) -> bool {
        self.0.borrow().level
    }
}

#[derive(Debug, Default)]
struct PulseOutputState {
    level: bool,
    writes: Vec<bool>,
    fail: bool,
}

#[derive(Debug, Default, Clone)]
pub struct MockPulseOutput(Rc<RefCell<PulseOutputState>>);

impl MockPulseOutput {
    pub fn failing() -> Self {
        let output = Self::default();
        output.0.borrow_mut().fail = true;
        output
    }

    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    pub fn writes(&self) -> Vec<bool> {
        self.0.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.0.borrow_mut().writes.clear();
    }
}

impl PulseOutput for MockPulseOutput {
    fn init(&mut self) -> Result<(), InitError> {
        if self.0.borrow().fail {
            Err(InitError::Rejected)
        } else {
            Ok(())
        }
    }

    fn set(&mut self, high: bool) {
        let mut state = self.0.borrow_mut();
        state.level = high;
        state.writes.push(high);
    }
}
