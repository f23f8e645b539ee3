//! Structures used to pass the current state of panel controls.

use crate::hardware::{ButtonId, Controls, POT_COUNT, POT_MAX};

/// The current state of pots and buttons.
///
/// `Snapshot` is taken once per tick, so every decision within the tick works
/// with the same readings. Button debouncing is done by the driver.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub pots: [u8; POT_COUNT],
    pub buttons: [bool; 2],
}

impl Snapshot {
    pub fn sample<C: Controls>(controls: &mut C) -> Self {
        let mut pots = [0; POT_COUNT];
        for (i, pot) in pots.iter_mut().enumerate() {
            *pot = controls.read_pot(i).min(POT_MAX);
        }
        Self {
            pots,
            buttons: [
                controls.is_button_down(ButtonId::One),
                controls.is_button_down(ButtonId::Two),
            ],
        }
    }

    /// Value of the given pot, 0 for pots that do not exist.
    pub fn pot(&self, index: usize) -> u8 {
        self.pots.get(index).copied().unwrap_or(0)
    }

    /// Index and value of the pot turned the furthest. The first one wins
    /// a tie.
    pub fn loudest_pot(&self) -> (usize, u8) {
        let mut loudest = (0, 0);
        for (i, value) in self.pots.iter().enumerate() {
            if *value > loudest.1 {
                loudest = (i, *value);
            }
        }
        loudest
    }
}
