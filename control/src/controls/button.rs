//! Edge detection of a panel button.

/// Debounced button level followed over ticks.
///
/// Press and release edges are reported only for the tick in which they
/// were observed, so a handler run from the same tick sees them exactly once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    down: bool,
    edge: Option<Edge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

impl Button {
    pub fn update(&mut self, down: bool) {
        self.edge = match (self.down, down) {
            (false, true) => Some(Edge::Pressed),
            (true, false) => Some(Edge::Released),
            _ => None,
        };
        self.down = down;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Edge observed by the last update, if any.
    pub fn edge(&self) -> Option<Edge> {
        self.edge
    }
}
