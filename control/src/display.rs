//! The LED bar and what is shown on it.

use crate::error::InitError;
use crate::hardware::{Coupling, Leds, LED_COUNT};
use crate::selection::Selection;

/// On/off state of every LED in the bar.
pub type DisplayConfig = [bool; LED_COUNT];

/// Content of the LED bar requested by the interactive mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    #[default]
    Off,
    All,
    /// Given number of LEDs lit from the first one.
    Bar(usize),
    /// Whole bar follows the pulse level.
    Pulse(bool),
    /// Input or output selection being changed.
    Indicator(Selection),
    /// Coupling being changed, left half for DC, right half for AC.
    Coupling(Coupling),
}

impl Screen {
    pub fn leds(&self) -> DisplayConfig {
        match self {
            Self::Off => [false; LED_COUNT],
            Self::All => [true; LED_COUNT],
            Self::Bar(count) => bar(*count),
            Self::Pulse(high) => [*high; LED_COUNT],
            Self::Indicator(selection) => bar(selection.indicator_leds()),
            Self::Coupling(coupling) => {
                let mut leds = [false; LED_COUNT];
                let half = LED_COUNT / 2;
                let lit = match coupling {
                    Coupling::Dc => 0..half,
                    Coupling::Ac => half..LED_COUNT,
                };
                for led in &mut leds[lit] {
                    *led = true;
                }
                leds
            }
        }
    }
}

fn bar(count: usize) -> DisplayConfig {
    let mut leds = [false; LED_COUNT];
    for led in leds.iter_mut().take(count) {
        *led = true;
    }
    leds
}

/// Owner of the LED driver, skipping writes that would change nothing.
///
/// The bar remembers the last pattern it wrote. Showing the same pattern
/// again does not touch the driver, a uniform pattern is written at once and
/// otherwise only the LEDs that differ are written. Direct brightness writes
/// and animations make the remembered pattern unknown.
#[derive(Debug)]
pub struct LedBar<L> {
    leds: L,
    shown: Option<DisplayConfig>,
}

impl<L: Leds> LedBar<L> {
    pub fn new(leds: L) -> Self {
        Self { leds, shown: None }
    }

    pub fn init(&mut self) -> Result<(), InitError> {
        self.leds.init()
    }

    pub fn show(&mut self, screen: Screen) {
        let config = screen.leds();
        match self.shown {
            Some(shown) if shown == config => {}
            Some(shown) if !is_uniform(&config) => {
                for (i, (old, new)) in shown.iter().zip(config.iter()).enumerate() {
                    if old != new {
                        self.leds.set_brightness(i, brightness(*new));
                    }
                }
            }
            _ => {
                if is_uniform(&config) {
                    self.leds.set_all(config[0]);
                } else {
                    for (i, on) in config.iter().enumerate() {
                        self.leds.set_brightness(i, brightness(*on));
                    }
                }
            }
        }
        self.shown = Some(config);
    }

    /// Set raw brightness of a single LED. Indexes outside of the bar are
    /// ignored.
    pub fn set_brightness(&mut self, index: usize, value: u8) {
        if index >= LED_COUNT {
            return;
        }
        self.leds.set_brightness(index, value);
        self.shown = None;
    }

    pub fn off(&mut self, index: usize) {
        self.set_brightness(index, 0);
    }

    pub fn off_all(&mut self) {
        self.leds.set_all(false);
        self.shown = Some([false; LED_COUNT]);
    }

    pub fn play_startup_animation(&mut self) {
        self.leds.play_startup_animation();
        self.shown = None;
    }

    pub fn shown(&self) -> Option<DisplayConfig> {
        self.shown
    }
}

fn is_uniform(config: &DisplayConfig) -> bool {
    config.iter().all(|on| *on == config[0])
}

fn brightness(on: bool) -> u8 {
    if on {
        u8::MAX
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLeds;

    #[test]
    fn when_nothing_was_requested_it_is_dark() {
        assert_eq!(Screen::default(), Screen::Off);
        assert_eq!(Screen::default().leds(), [false; LED_COUNT]);
    }

    #[test]
    fn when_bar_is_requested_it_lights_from_the_first_led() {
        assert_eq!(
            Screen::Bar(2).leds(),
            [true, true, false, false, false, false]
        );
        assert_eq!(Screen::Bar(0).leds(), [false; LED_COUNT]);
        assert_eq!(Screen::Bar(6).leds(), [true; LED_COUNT]);
        assert_eq!(Screen::Bar(10).leds(), [true; LED_COUNT]);
    }

    #[test]
    fn when_selection_is_indicated_it_lights_two_leds_per_step() {
        assert_eq!(
            Screen::Indicator(Selection::AudioB).leds(),
            [true, true, true, true, false, false]
        );
        assert_eq!(Screen::Indicator(Selection::None).leds(), [false; LED_COUNT]);
    }

    #[test]
    fn when_coupling_is_indicated_it_lights_one_half() {
        assert_eq!(
            Screen::Coupling(Coupling::Dc).leds(),
            [true, true, true, false, false, false]
        );
        assert_eq!(
            Screen::Coupling(Coupling::Ac).leds(),
            [false, false, false, true, true, true]
        );
    }

    #[test]
    fn when_pulse_is_shown_the_whole_bar_follows_it() {
        assert_eq!(Screen::Pulse(true).leds(), [true; LED_COUNT]);
        assert_eq!(Screen::Pulse(false).leds(), [false; LED_COUNT]);
    }

    #[test]
    fn when_same_screen_is_shown_again_it_does_not_write() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.show(Screen::Bar(3));
        let writes = leds.writes();
        assert!(writes > 0);

        for _ in 0..10 {
            bar.show(Screen::Bar(3));
        }
        assert_eq!(leds.writes(), writes);
        assert_eq!(leds.lit(), [true, true, true, false, false, false]);
    }

    #[test]
    fn when_screen_changes_it_writes_only_changed_leds() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.show(Screen::Bar(3));
        let writes = leds.writes();
        bar.show(Screen::Bar(4));
        assert_eq!(leds.writes(), writes + 1);
        assert_eq!(leds.lit(), [true, true, true, true, false, false]);
    }

    #[test]
    fn when_screen_is_uniform_it_writes_all_at_once() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.show(Screen::Bar(3));
        let writes = leds.writes();
        bar.show(Screen::All);
        assert_eq!(leds.writes(), writes + 1);
        assert_eq!(leds.lit(), [true; LED_COUNT]);
    }

    #[test]
    fn when_brightness_is_set_directly_it_forgets_the_shown_screen() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.off_all();
        assert_eq!(bar.shown(), Some([false; LED_COUNT]));
        bar.set_brightness(2, 100);
        assert_eq!(bar.shown(), None);

        bar.show(Screen::Off);
        assert_eq!(leds.lit(), [false; LED_COUNT]);
    }

    #[test]
    fn when_index_is_out_of_range_it_does_nothing() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.off_all();
        let writes = leds.writes();
        bar.set_brightness(LED_COUNT, 255);
        assert_eq!(leds.writes(), writes);
        assert_eq!(bar.shown(), Some([false; LED_COUNT]));
    }

    #[test]
    fn when_animation_played_it_redraws_the_next_screen_fully() {
        let leds = MockLeds::default();
        let mut bar = LedBar::new(leds.clone());

        bar.show(Screen::Off);
        bar.play_startup_animation();
        bar.show(Screen::Off);
        assert_eq!(leds.lit(), [false; LED_COUNT]);
        assert_eq!(leds.animations(), 1);
    }
}
