//! Simulation core for a 16x8 LED-matrix frogger: three lanes of traffic, a
//! halfway verge, two channels of drifting logs and a riverbank with holes.
//!
//! [`engine::Engine`] owns the field and the frog and reports what needs
//! redrawing; [`session::Session`] adds score, lives, levels and timing.

pub mod board;
pub mod engine;
pub mod frog;
pub mod oracle;
pub mod pattern;
pub mod riverbank;
pub mod session;

pub use board::{Board, RowKind};
pub use engine::{Engine, Redraw, Tile};
pub use frog::{Frog, Step};
pub use pattern::{CyclicPattern, Drift};
pub use session::{Phase, Rules, Session};
