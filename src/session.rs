// src/session.rs

use crate::board::{Board, CHANNEL_COUNT, LANE_COUNT};
use crate::engine::{Engine, Redraw};
use crate::frog::Step;
use crate::pattern::Drift;
use std::time::Duration;
use tracing::{debug, info};

const FORWARD_POINTS: u32 = 1;
const LANDING_POINTS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub initial_lives: u8,
    pub max_lives: u8,
    pub time_limit: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            max_lives: 4,
            time_limit: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scroller {
    Lane(usize),
    Channel(usize),
}

/// How often one scroller moves: every `base + slope * level` ms.
#[derive(Clone, Copy, Debug)]
struct Cadence {
    scroller: Scroller,
    base_ms: u64,
    slope_ms: u64,
    elapsed_ms: u64,
}

impl Cadence {
    const fn new(scroller: Scroller, base_ms: u64, slope_ms: u64) -> Self {
        Self {
            scroller,
            base_ms,
            slope_ms,
            elapsed_ms: 0,
        }
    }

    fn period_ms(&self, level: u32) -> u64 {
        self.base_ms + self.slope_ms * level as u64
    }
}

const CADENCES: [Cadence; LANE_COUNT + CHANNEL_COUNT] = [
    Cadence::new(Scroller::Lane(0), 1000, 100),
    Cadence::new(Scroller::Lane(1), 1100, 50),
    Cadence::new(Scroller::Lane(2), 800, 50),
    Cadence::new(Scroller::Channel(0), 900, 50),
    Cadence::new(Scroller::Channel(1), 1150, 50),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Score, lives, level and the per-frog countdown wrapped around an
/// [`Engine`]. Decides when scrollers move and what happens after a frog
/// lands or dies.
#[derive(Clone, Debug)]
pub struct Session {
    engine: Engine,
    rules: Rules,
    cadences: [Cadence; LANE_COUNT + CHANNEL_COUNT],
    score: u32,
    lives: u8,
    level: u32,
    countdown: Duration,
    paused: bool,
    phase: Phase,
}

impl Session {
    pub fn new(rules: Rules) -> Self {
        Self::with_board(rules, Board::classic())
    }

    pub fn with_board(rules: Rules, board: Board) -> Self {
        let mut s = Self {
            engine: Engine::with_board(board),
            rules,
            cadences: CADENCES,
            score: 0,
            lives: 0,
            level: 0,
            countdown: rules.time_limit,
            paused: false,
            phase: Phase::Playing,
        };
        s.new_game();
        s
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn drain_redraws(&mut self) -> std::vec::Drain<'_, Redraw> {
        self.engine.drain_redraws()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn countdown(&self) -> Duration {
        self.countdown
    }

    /// Whole seconds shown on the countdown, rounded up.
    pub fn seconds_left(&self) -> u64 {
        let ms = self.countdown.as_millis() as u64;
        (ms + 999) / 1000
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = self.rules.initial_lives;
        self.level = 0;
        self.paused = false;
        self.phase = Phase::Playing;
        info!(lives = self.lives, "new game");
        self.next_level();
    }

    fn next_level(&mut self) {
        self.level += 1;
        if self.level > 1 && self.lives < self.rules.max_lives {
            self.lives += 1;
        }
        self.engine.start_level();
        self.cadences = CADENCES;
        self.countdown = self.rules.time_limit;
        info!(level = self.level, lives = self.lives, score = self.score, "level start");
    }

    pub fn toggle_pause(&mut self) {
        if self.phase == Phase::Playing {
            self.paused = !self.paused;
            debug!(paused = self.paused, "pause toggled");
        }
    }

    pub fn hop(&mut self, step: Step) {
        if self.phase != Phase::Playing || self.paused || self.engine.is_frog_dead() {
            return;
        }
        self.engine.move_frog(step);
        if step == Step::Forward && !self.engine.is_frog_dead() {
            self.score += FORWARD_POINTS;
        }
        self.resolve();
    }

    /// Advance game time: run down the countdown and move every scroller whose
    /// cadence has come round.
    pub fn tick(&mut self, dt: Duration) {
        if self.phase != Phase::Playing || self.paused {
            return;
        }

        self.countdown = self.countdown.saturating_sub(dt);
        if self.countdown.is_zero() && !self.engine.is_frog_dead() {
            info!(
                row = self.engine.frog_row(),
                column = self.engine.frog_column(),
                "time up"
            );
            self.engine.kill_frog();
        }

        // every clock runs, even once a scroll has killed the frog
        let dt_ms = dt.as_millis() as u64;
        for cadence in &mut self.cadences {
            cadence.elapsed_ms += dt_ms;
        }
        for i in 0..self.cadences.len() {
            let period = self.cadences[i].period_ms(self.level);
            while self.cadences[i].elapsed_ms >= period && !self.engine.is_frog_dead() {
                self.cadences[i].elapsed_ms -= period;
                self.scroll(self.cadences[i].scroller);
            }
        }

        self.resolve();
    }

    fn scroll(&mut self, scroller: Scroller) {
        let board = self.engine.board();
        match scroller {
            Scroller::Lane(i) => {
                let drift = board.lanes.get(i).map_or(Drift::Still, |l| l.drift);
                self.engine.scroll_lane(i, drift);
            }
            Scroller::Channel(i) => {
                let drift = board.channels.get(i).map_or(Drift::Still, |c| c.drift);
                self.engine.scroll_channel(i, drift);
            }
        }
    }

    fn reset_frog(&mut self) {
        self.engine.put_frog_in_start_position();
        self.countdown = self.rules.time_limit;
    }

    fn resolve(&mut self) {
        if self.engine.is_frog_dead() {
            self.lives = self.lives.saturating_sub(1);
            info!(
                row = self.engine.frog_row(),
                column = self.engine.frog_column(),
                lives = self.lives,
                "frog lost"
            );
            if self.lives == 0 {
                self.phase = Phase::GameOver;
                info!(score = self.score, level = self.level, "game over");
            } else {
                self.reset_frog();
            }
        } else if self.engine.frog_has_reached_riverbank() {
            self.score += LANDING_POINTS;
            info!(column = self.engine.frog_column(), score = self.score, "frog home");
            if self.engine.is_riverbank_full() {
                self.next_level();
            } else {
                self.reset_frog();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Channel, Lane, VehicleColour};
    use crate::riverbank::Riverbank;

    /// No traffic, logs everywhere, one hole at column 7.
    fn open_board() -> Board {
        Board {
            lanes: [
                Lane::new(0, VehicleColour::Red, Drift::Right),
                Lane::new(0, VehicleColour::Yellow, Drift::Left),
                Lane::new(0, VehicleColour::Red, Drift::Right),
            ],
            channels: [
                Channel::new(u64::MAX, Drift::Left),
                Channel::new(u64::MAX, Drift::Right),
            ],
            riverbank: Riverbank::new(!(1 << 7)),
        }
    }

    fn cross(s: &mut Session) {
        for _ in 0..7 {
            s.hop(Step::Forward);
        }
    }

    #[test]
    fn new_game_defaults() {
        let s = Session::new(Rules::default());
        assert_eq!(s.level(), 1);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.seconds_left(), 30);
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn forward_hops_score_and_filling_the_bank_levels_up() {
        let mut s = Session::with_board(Rules::default(), open_board());
        cross(&mut s);
        assert_eq!(s.score(), 7 + 10);
        assert_eq!(s.level(), 2);
        assert_eq!(s.lives(), 4);
        assert_eq!(s.engine().frog_row(), 0);
        assert!(!s.engine().is_riverbank_full());
    }

    #[test]
    fn lives_are_capped_on_level_up() {
        let mut s = Session::with_board(Rules::default(), open_board());
        cross(&mut s);
        cross(&mut s);
        assert_eq!(s.level(), 3);
        assert_eq!(s.lives(), 4);
    }

    #[test]
    fn landing_with_holes_left_resets_frog() {
        let mut board = open_board();
        board.riverbank = Riverbank::new(0b1101_1101_1101_1101);
        let mut s = Session::with_board(Rules::default(), board);
        s.hop(Step::Left);
        s.hop(Step::Left);
        cross(&mut s);
        assert_eq!(s.level(), 1);
        assert_eq!(s.score(), 17);
        assert_eq!(s.engine().frog_row(), 0);
        assert!(s.engine().board().riverbank.is_taken(5));
    }

    #[test]
    fn death_costs_a_life_and_respawns() {
        let mut s = Session::with_board(Rules::default(), open_board());
        s.hop(Step::Backward);
        assert_eq!(s.lives(), 2);
        assert!(!s.engine().is_frog_dead());
        assert_eq!(s.engine().frog_row(), 0);
    }

    #[test]
    fn last_life_ends_the_game() {
        let rules = Rules {
            initial_lives: 1,
            ..Rules::default()
        };
        let mut s = Session::with_board(rules, open_board());
        s.hop(Step::Backward);
        assert!(s.is_over());
        assert!(s.engine().is_frog_dead());

        s.hop(Step::Forward);
        s.tick(Duration::from_secs(5));
        assert_eq!(s.engine().frog_row(), -1);

        s.new_game();
        assert!(!s.is_over());
        assert_eq!(s.lives(), 1);
        assert_eq!(s.engine().frog_row(), 0);
    }

    #[test]
    fn countdown_expiry_kills_the_frog() {
        let mut s = Session::with_board(Rules::default(), open_board());
        s.tick(Duration::from_millis(29_000));
        assert_eq!(s.lives(), 3);
        assert_eq!(s.seconds_left(), 1);
        s.tick(Duration::from_millis(1_000));
        assert_eq!(s.lives(), 2);
        assert_eq!(s.seconds_left(), 30);
    }

    #[test]
    fn paused_session_ignores_time_and_hops() {
        let mut s = Session::new(Rules::default());
        s.toggle_pause();
        s.tick(Duration::from_secs(60));
        s.hop(Step::Forward);
        assert_eq!(s.engine().frog_row(), 0);
        assert_eq!(s.countdown(), Duration::from_secs(30));
        assert_eq!(s.engine().board().lanes[0].pattern.pos(), 0);
        s.toggle_pause();
        assert!(!s.is_paused());
    }

    #[test]
    fn scrollers_follow_their_cadence() {
        let mut s = Session::new(Rules::default());
        // level 1 periods: 1100, 1150, 850, 950, 1200
        s.tick(Duration::from_millis(1100));
        let board = s.engine().board();
        assert_eq!(board.lanes[0].pattern.pos(), 63);
        assert_eq!(board.lanes[1].pattern.pos(), 0);
        assert_eq!(board.lanes[2].pattern.pos(), 63);
        assert_eq!(board.channels[0].pattern.pos(), 1);
        assert_eq!(board.channels[1].pattern.pos(), 0);
    }

    #[test]
    fn a_scroll_death_does_not_stall_later_scrollers() {
        // only the first lane carries traffic, one car just left of the frog
        let mut board = open_board();
        board.lanes[0] = Lane::new(1 << 6, VehicleColour::Red, Drift::Right);
        let mut s = Session::with_board(Rules::default(), board);
        s.hop(Step::Forward);
        assert_eq!(s.engine().frog_row(), 1);

        // lane 0 (1100 ms) runs the car into the frog; the rest keep time
        s.tick(Duration::from_millis(1100));
        assert_eq!(s.lives(), 2);
        assert_eq!(s.engine().frog_row(), 0);
        assert_eq!(s.engine().board().lanes[2].pattern.pos(), 0);

        // lane 2 (850 ms) was due during the deadly tick and catches up now
        s.tick(Duration::from_millis(10));
        assert_eq!(s.engine().board().lanes[2].pattern.pos(), 63);
    }

    #[test]
    fn long_ticks_catch_up_every_due_scroll() {
        let mut s = Session::with_board(Rules::default(), open_board());
        s.tick(Duration::from_millis(850 * 3));
        assert_eq!(s.engine().board().lanes[2].pattern.pos(), 61);
    }
}
