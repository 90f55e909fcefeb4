// src/frog.rs

use crate::board::{RIVERBANK_ROW, START_COLUMN, START_ROW};

/// One discrete hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
    Left,
    Right,
}

impl Step {
    /// (row delta, column delta)
    pub fn offset(self) -> (i8, i8) {
        match self {
            Step::Forward => (1, 0),
            Step::Backward => (-1, 0),
            Step::Left => (0, -1),
            Step::Right => (0, 1),
        }
    }
}

/// The player's frog. Position may sit one cell off the field after a fatal
/// hop; it stays there, dead, until `place_at_start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frog {
    pub(crate) row: i8,
    pub(crate) column: i8,
    pub(crate) dead: bool,
}

impl Default for Frog {
    fn default() -> Self {
        Self {
            row: START_ROW,
            column: START_COLUMN,
            dead: false,
        }
    }
}

impl Frog {
    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn column(&self) -> i8 {
        self.column
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn on_riverbank(&self) -> bool {
        self.row == RIVERBANK_ROW
    }

    pub fn target(&self, step: Step) -> (i8, i8) {
        let (dr, dc) = step.offset();
        (self.row.saturating_add(dr), self.column.saturating_add(dc))
    }

    pub fn place_at_start(&mut self) {
        *self = Frog::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_alive_on_the_start_row() {
        let frog = Frog::default();
        assert_eq!((frog.row(), frog.column()), (0, 7));
        assert!(frog.is_alive());
        assert!(!frog.on_riverbank());
    }

    #[test]
    fn targets_follow_step_offsets() {
        let frog = Frog {
            row: 3,
            column: 0,
            dead: false,
        };
        assert_eq!(frog.target(Step::Forward), (4, 0));
        assert_eq!(frog.target(Step::Backward), (2, 0));
        assert_eq!(frog.target(Step::Left), (3, -1));
        assert_eq!(frog.target(Step::Right), (3, 1));
    }

    #[test]
    fn place_at_start_revives() {
        let mut frog = Frog {
            row: 6,
            column: 15,
            dead: true,
        };
        frog.place_at_start();
        assert_eq!(frog, Frog::default());
    }
}
