// src/riverbank.rs

use crate::board::COLUMNS;

/// Edge layout of the far bank: bit i set means column i is solid bank,
/// clear means a hole a frog can land in.
pub const RIVERBANK_EDGES: u16 = 0b1101_1101_1101_1101;

const ALL_FILLED: u16 = 0xFFFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankSpot {
    Edge,
    Hole,
    Home,
}

/// Occupancy of the riverbank row. `status` starts equal to `edges` and only
/// gains bits until the next `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Riverbank {
    edges: u16,
    status: u16,
}

impl Default for Riverbank {
    fn default() -> Self {
        Self::new(RIVERBANK_EDGES)
    }
}

impl Riverbank {
    pub fn new(edges: u16) -> Self {
        Self {
            edges,
            status: edges,
        }
    }

    fn bit(column: i8) -> Option<u16> {
        if (0..COLUMNS).contains(&column) {
            Some(1u16 << column)
        } else {
            None
        }
    }

    pub fn edges(&self) -> u16 {
        self.edges
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Out-of-range columns count as taken.
    pub fn is_taken(&self, column: i8) -> bool {
        match Self::bit(column) {
            Some(b) => self.status & b != 0,
            None => true,
        }
    }

    pub fn spot(&self, column: i8) -> BankSpot {
        match Self::bit(column) {
            Some(b) if self.edges & b != 0 => BankSpot::Edge,
            Some(b) if self.status & b != 0 => BankSpot::Home,
            Some(_) => BankSpot::Hole,
            None => BankSpot::Edge,
        }
    }

    pub fn mark_filled(&mut self, column: i8) {
        if let Some(b) = Self::bit(column) {
            self.status |= b;
        }
    }

    pub fn is_full(&self) -> bool {
        self.status == ALL_FILLED
    }

    pub fn holes_left(&self) -> u32 {
        (!self.status).count_ones()
    }

    pub fn reset(&mut self) {
        self.status = self.edges;
    }
}
