// src/board.rs

use crate::pattern::{ChannelPattern, Drift, LanePattern};
use crate::riverbank::Riverbank;

pub const COLUMNS: i8 = 16;
pub const ROWS: i8 = 8;

pub const START_ROW: i8 = 0;
pub const FIRST_LANE_ROW: i8 = 1;
pub const HALFWAY_ROW: i8 = 4;
pub const FIRST_CHANNEL_ROW: i8 = 5;
pub const RIVERBANK_ROW: i8 = 7;

pub const START_COLUMN: i8 = 7;

pub const LANE_COUNT: usize = 3;
pub const CHANNEL_COUNT: usize = 2;

// bit 0 (LSB) is the leftmost visible column at rest
const LANE_DATA: [u64; LANE_COUNT] = [
    0b1100001100011000110000011001100011000011000110001100000110011000,
    0b0011100000111000011100000111000011100001110001110000111000011100,
    0b0000111100001111000011110000111100001111000001111100001111000111,
];

const LOG_DATA: [u64; CHANNEL_COUNT] = [
    0b11110001100111000111100011111000,
    0b11100110111101100001110110011100,
];

/// What a row is for. Rows outside 0..=7 have no kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Start,
    Traffic(usize),
    Halfway,
    River(usize),
    Riverbank,
}

impl RowKind {
    pub fn of(row: i8) -> Option<RowKind> {
        match row {
            0 => Some(RowKind::Start),
            1..=3 => Some(RowKind::Traffic((row - FIRST_LANE_ROW) as usize)),
            4 => Some(RowKind::Halfway),
            5 | 6 => Some(RowKind::River((row - FIRST_CHANNEL_ROW) as usize)),
            7 => Some(RowKind::Riverbank),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleColour {
    Red,
    Yellow,
}

#[derive(Clone, Copy, Debug)]
pub struct Lane {
    pub pattern: LanePattern,
    pub colour: VehicleColour,
    pub drift: Drift,
}

impl Lane {
    pub fn new(bits: u64, colour: VehicleColour, drift: Drift) -> Self {
        Self {
            pattern: LanePattern::new(bits),
            colour,
            drift,
        }
    }

    pub fn row(index: usize) -> i8 {
        FIRST_LANE_ROW + index as i8
    }

    pub fn vehicle_at(&self, column: i8) -> bool {
        self.pattern.sample(column as i32)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Channel {
    pub pattern: ChannelPattern,
    pub drift: Drift,
}

impl Channel {
    pub fn new(bits: u64, drift: Drift) -> Self {
        Self {
            pattern: ChannelPattern::new(bits),
            drift,
        }
    }

    pub fn row(index: usize) -> i8 {
        FIRST_CHANNEL_ROW + index as i8
    }

    pub fn log_at(&self, column: i8) -> bool {
        self.pattern.sample(column as i32)
    }
}

/// Everything on the field except the frog.
#[derive(Clone, Debug)]
pub struct Board {
    pub lanes: [Lane; LANE_COUNT],
    pub channels: [Channel; CHANNEL_COUNT],
    pub riverbank: Riverbank,
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}

impl Board {
    pub fn classic() -> Self {
        Self {
            lanes: [
                Lane::new(LANE_DATA[0], VehicleColour::Red, Drift::Right),
                Lane::new(LANE_DATA[1], VehicleColour::Yellow, Drift::Left),
                Lane::new(LANE_DATA[2], VehicleColour::Red, Drift::Right),
            ],
            channels: [
                Channel::new(LOG_DATA[0], Drift::Left),
                Channel::new(LOG_DATA[1], Drift::Right),
            ],
            riverbank: Riverbank::default(),
        }
    }

    /// Scrollers back at rest and the far bank emptied back to its edges.
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.pattern.rewind();
        }
        for channel in &mut self.channels {
            channel.pattern.rewind();
        }
        self.riverbank.reset();
    }
}
