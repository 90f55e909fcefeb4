// src/pattern.rs

/// Direction a scroller moves its content across the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drift {
    Left,
    Still,
    Right,
}

impl Drift {
    pub fn delta(self) -> i8 {
        match self {
            Drift::Left => -1,
            Drift::Still => 0,
            Drift::Right => 1,
        }
    }
}

/// A circular bit sequence `W` bits wide plus the offset of the bit that sits
/// under visible column 0. `W` must be a power of two no larger than 64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CyclicPattern<const W: u32> {
    bits: u64,
    pos: u32,
}

pub type LanePattern = CyclicPattern<64>;
pub type ChannelPattern = CyclicPattern<32>;

impl<const W: u32> CyclicPattern<W> {
    /// Bits above `W` are discarded. The pattern starts at rest (`pos` 0).
    pub fn new(bits: u64) -> Self {
        debug_assert!(W.is_power_of_two() && W <= 64, "bad pattern width {}", W);
        Self {
            bits: bits & Self::mask(),
            pos: 0,
        }
    }

    fn mask() -> u64 {
        if W == 64 {
            u64::MAX
        } else {
            (1u64 << W) - 1
        }
    }

    pub const fn width(&self) -> u32 {
        W
    }

    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Bit shown at visible `column`. Any column is accepted; it wraps.
    pub fn sample(&self, column: i32) -> bool {
        let bit = (self.pos as i64 + column as i64).rem_euclid(W as i64) as u32;
        (self.bits >> bit) & 1 == 1
    }

    /// Move the visible window one step. Content appears to travel in the
    /// drift direction, so the offset moves the opposite way.
    pub fn advance(&mut self, drift: Drift) {
        let next = self.pos as i64 - drift.delta() as i64;
        self.pos = next.rem_euclid(W as i64) as u32;
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}
