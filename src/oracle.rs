// src/oracle.rs

use crate::board::{Board, RowKind, COLUMNS};

impl Board {
    /// Would a frog die at this cell, given the field as it stands right now?
    /// Anything off the 16x8 field is lethal.
    pub fn is_lethal(&self, row: i8, column: i8) -> bool {
        if !(0..COLUMNS).contains(&column) {
            return true;
        }
        match RowKind::of(row) {
            Some(RowKind::Start) | Some(RowKind::Halfway) => false,
            Some(RowKind::Traffic(lane)) => self.lanes[lane].vehicle_at(column),
            Some(RowKind::River(channel)) => !self.channels[channel].log_at(column),
            Some(RowKind::Riverbank) => self.riverbank.is_taken(column),
            None => true,
        }
    }
}
