// src/engine.rs

use crate::board::{Board, Channel, Lane, RowKind, VehicleColour, COLUMNS};
use crate::frog::{Frog, Step};
use crate::pattern::Drift;
use crate::riverbank::BankSpot;

/// What one LED of the 16x8 field should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Verge,
    Road,
    Vehicle(VehicleColour),
    Water,
    Log,
    Hole,
    Home,
    Frog,
    DeadFrog,
}

/// A region of the display that no longer matches the engine state.
/// `Cell` always names the frog's cell, which may lie off the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    Row(i8),
    Cell { row: i8, column: i8 },
    All,
}

/// One game field: the scrollers, the far bank and the frog, plus the redraw
/// requests raised since the caller last drained them.
#[derive(Clone, Debug)]
pub struct Engine {
    board: Board,
    frog: Frog,
    redraws: Vec<Redraw>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_board(Board::classic())
    }

    pub fn with_board(board: Board) -> Self {
        let mut engine = Self {
            board,
            frog: Frog::default(),
            redraws: Vec::new(),
        };
        engine.redraw_all();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn frog(&self) -> &Frog {
        &self.frog
    }

    pub fn frog_row(&self) -> i8 {
        self.frog.row
    }

    pub fn frog_column(&self) -> i8 {
        self.frog.column
    }

    pub fn is_frog_dead(&self) -> bool {
        self.frog.dead
    }

    pub fn frog_has_reached_riverbank(&self) -> bool {
        self.frog.on_riverbank()
    }

    pub fn is_riverbank_full(&self) -> bool {
        self.board.riverbank.is_full()
    }

    pub fn is_lethal(&self, row: i8, column: i8) -> bool {
        self.board.is_lethal(row, column)
    }

    /// Hop the frog one cell. The hop always happens, even into a lethal cell;
    /// a dead frog ignores hops until it is put back at the start.
    pub fn move_frog(&mut self, step: Step) {
        if self.frog.dead {
            return;
        }
        self.redraws.push(Redraw::Row(self.frog.row));

        let (row, column) = self.frog.target(step);
        self.frog.dead = self.board.is_lethal(row, column);
        self.frog.row = row;
        self.frog.column = column;
        self.push_frog_cell();

        if !self.frog.dead && self.frog.on_riverbank() {
            self.board.riverbank.mark_filled(column);
        }
    }

    /// Callers must not hop forward from the riverbank row.
    pub fn move_forward(&mut self) {
        self.move_frog(Step::Forward);
    }

    pub fn move_backward(&mut self) {
        self.move_frog(Step::Backward);
    }

    pub fn move_left(&mut self) {
        self.move_frog(Step::Left);
    }

    pub fn move_right(&mut self) {
        self.move_frog(Step::Right);
    }

    pub fn put_frog_in_start_position(&mut self) {
        self.redraws.push(Redraw::Row(self.frog.row));
        self.frog.place_at_start();
        self.push_frog_cell();
    }

    pub fn kill_frog(&mut self) {
        self.frog.dead = true;
        self.push_frog_cell();
    }

    /// Scroll traffic lane 0..=2. A vehicle may sweep into the frog.
    pub fn scroll_lane(&mut self, lane: usize, drift: Drift) {
        let Some(l) = self.board.lanes.get_mut(lane) else {
            return;
        };
        l.pattern.advance(drift);
        let row = Lane::row(lane);
        self.redraws.push(Redraw::Row(row));
        self.reevaluate_frog(row, Drift::Still);
    }

    /// Scroll log channel 0..=1, carrying a frog that rides it.
    pub fn scroll_channel(&mut self, channel: usize, drift: Drift) {
        let Some(ch) = self.board.channels.get_mut(channel) else {
            return;
        };
        ch.pattern.advance(drift);
        let row = Channel::row(channel);
        self.redraws.push(Redraw::Row(row));
        self.reevaluate_frog(row, drift);
    }

    /// Runs after a scroller on `row` has moved. A frog in that row is carried
    /// by `carry` (off the edge is fatal and leaves it in place), then checked
    /// against the field as it is now.
    fn reevaluate_frog(&mut self, row: i8, carry: Drift) {
        if self.frog.row != row {
            return;
        }
        if !self.frog.dead {
            let column = self.frog.column + carry.delta();
            if (0..COLUMNS).contains(&column) {
                self.frog.column = column;
                self.frog.dead = self.board.is_lethal(row, column);
            } else {
                self.frog.dead = true;
            }
        }
        self.push_frog_cell();
    }

    /// Fresh level: scrollers at rest, bank back to its edges, frog at start.
    pub fn start_level(&mut self) {
        self.board.reset();
        self.frog.place_at_start();
        self.redraws.clear();
        self.redraw_all();
    }

    pub fn redraw_all(&mut self) {
        self.redraws.push(Redraw::All);
        self.push_frog_cell();
    }

    pub fn drain_redraws(&mut self) -> std::vec::Drain<'_, Redraw> {
        self.redraws.drain(..)
    }

    fn push_frog_cell(&mut self) {
        self.redraws.push(Redraw::Cell {
            row: self.frog.row,
            column: self.frog.column,
        });
    }

    /// Field content at a cell, ignoring the frog.
    pub fn tile_at(&self, row: i8, column: i8) -> Tile {
        match RowKind::of(row) {
            Some(RowKind::Start) | Some(RowKind::Halfway) | None => Tile::Verge,
            Some(RowKind::Traffic(lane)) => {
                let lane = &self.board.lanes[lane];
                if lane.vehicle_at(column) {
                    Tile::Vehicle(lane.colour)
                } else {
                    Tile::Road
                }
            }
            Some(RowKind::River(channel)) => {
                if self.board.channels[channel].log_at(column) {
                    Tile::Log
                } else {
                    Tile::Water
                }
            }
            Some(RowKind::Riverbank) => match self.board.riverbank.spot(column) {
                BankSpot::Edge => Tile::Verge,
                BankSpot::Hole => Tile::Hole,
                BankSpot::Home => Tile::Home,
            },
        }
    }

    pub fn row_tiles(&self, row: i8) -> [Tile; COLUMNS as usize] {
        let mut tiles = [Tile::Verge; COLUMNS as usize];
        for (column, tile) in (0..COLUMNS).zip(tiles.iter_mut()) {
            *tile = self.tile_at(row, column);
        }
        tiles
    }

    pub fn frog_tile(&self) -> Tile {
        if self.frog.dead {
            Tile::DeadFrog
        } else {
            Tile::Frog
        }
    }
}
