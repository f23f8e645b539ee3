//! Routing of pots and buttons during the interactive mode.
//!
//! Holding both buttons turns the pots into selectors: pot 0 picks the
//! tested input, pot 1 the tested output and pot 2 the output coupling.
//! Without the buttons held, the display shows the selected input, or plain
//! pot and button feedback if no input is selected.

use crate::config::Config;
use crate::controls::{Button, Edge, Snapshot};
use crate::display::Screen;
use crate::hardware::{AudioInput, AudioOutput, PulseInput, PulseOutput};
use crate::input::InputTester;
use crate::log::{debug, info};
use crate::output::OutputTester;
use crate::selection::Selection;
use crate::signal;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Router {
    buttons: [Button; 2],
    modifier_held: bool,
    config: Config,
}

impl Router {
    pub fn new(config: &Config) -> Self {
        Self {
            buttons: [Button::default(); 2],
            modifier_held: false,
            config: *config,
        }
    }

    /// Interpret one tick of controls and decide what the LEDs show.
    pub fn route_tick<AI, PI, AO, PO>(
        &mut self,
        snapshot: &Snapshot,
        input: &mut InputTester<AI, PI>,
        output: &mut OutputTester<AO, PO>,
    ) -> Screen
    where
        AI: AudioInput,
        PI: PulseInput,
        AO: AudioOutput,
        PO: PulseOutput,
    {
        self.update_buttons(snapshot);

        if self.buttons.iter().all(Button::is_down) {
            if !self.modifier_held {
                self.modifier_held = true;
                info!("Selection mode: pot 1 input, pot 2 output, pot 3 coupling");
            }
            return self.route_selection(snapshot, input, output);
        }

        if self.modifier_held {
            self.modifier_held = false;
            info!(
                "Configuration: input {}, output {} at {}V, coupling {}",
                input.selected().name(),
                output.selected().name(),
                output.voltage(),
                output.coupling().name()
            );
            return Screen::Off;
        }

        match input.selected() {
            Selection::AudioA | Selection::AudioB => Screen::Bar(input.vu_level()),
            Selection::Pulse => Screen::Pulse(input.pulse_high()),
            Selection::None => self.pot_feedback(snapshot),
        }
    }

    /// The rightmost pot outside of its dead zone takes over.
    fn route_selection<AI, PI, AO, PO>(
        &self,
        snapshot: &Snapshot,
        input: &mut InputTester<AI, PI>,
        output: &mut OutputTester<AO, PO>,
    ) -> Screen
    where
        AI: AudioInput,
        PI: PulseInput,
        AO: AudioOutput,
        PO: PulseOutput,
    {
        let input_pot = snapshot.pot(0);
        let output_pot = snapshot.pot(1);
        let coupling_pot = snapshot.pot(2);

        let dead_zone = self.config.pot_dead_zone;
        if coupling_pot > dead_zone {
            let coupling = self.config.coupling_for_pot(coupling_pot);
            output.set_coupling_mode(coupling);
            Screen::Coupling(coupling)
        } else if output_pot > dead_zone {
            output.set_selection(signal::pot_to_selection(output_pot), true);
            Screen::Indicator(output.selected())
        } else {
            input.set_selection(signal::pot_to_selection(input_pot), true);
            Screen::Indicator(input.selected())
        }
    }

    fn pot_feedback(&self, snapshot: &Snapshot) -> Screen {
        if self.buttons.iter().any(Button::is_down) {
            return Screen::All;
        }
        let (_, value) = snapshot.loudest_pot();
        Screen::Bar(signal::pot_to_led_count(value))
    }

    fn update_buttons(&mut self, snapshot: &Snapshot) {
        for (i, (button, down)) in self
            .buttons
            .iter_mut()
            .zip(snapshot.buttons.iter())
            .enumerate()
        {
            button.update(*down);
            match button.edge() {
                Some(Edge::Pressed) => debug!("Button {} pressed", i + 1),
                Some(Edge::Released) => debug!("Button {} released", i + 1),
                None => {}
            }
        }
    }

    /// Whether both buttons are currently held.
    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }
}
