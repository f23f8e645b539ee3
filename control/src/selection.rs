//! Which input or output is under test.

use crate::hardware::AudioChannel;

/// Jack selected for testing, shared by the input and output testers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    #[default]
    None,
    AudioA,
    AudioB,
    Pulse,
}

pub type SelectedInput = Selection;

pub type SelectedOutput = Selection;

impl Selection {
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    pub fn audio_channel(self) -> Option<AudioChannel> {
        match self {
            Self::AudioA => Some(AudioChannel::A),
            Self::AudioB => Some(AudioChannel::B),
            Self::None | Self::Pulse => None,
        }
    }

    /// Number of LEDs indicating the selection while it is being changed.
    pub fn indicator_leds(self) -> usize {
        match self {
            Self::None => 0,
            Self::AudioA => 2,
            Self::AudioB => 4,
            Self::Pulse => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AudioA => "AUDIO_A",
            Self::AudioB => "AUDIO_B",
            Self::Pulse => "PULSE",
        }
    }
}
