use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ledfrog::Step;
use std::time::{Duration, Instant};

// held-key timing of the push-button board
const INITIAL_DELAY: Duration = Duration::from_millis(300);
const REPEAT_DELAY: Duration = Duration::from_millis(400);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Hop(Step),
    TogglePause,
    NewGame,
    Quit,
}

pub(crate) fn map_key(code: KeyCode, mods: KeyModifiers) -> Option<Command> {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return Some(Command::Quit);
    }
    // U/L/R letters of the push-button board; `d` stays WASD right
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'u' | 'U') => Some(Command::Hop(Step::Forward)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::Hop(Step::Backward)),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'l' | 'L') => Some(Command::Hop(Step::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'r' | 'R') => Some(Command::Hop(Step::Right)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => Some(Command::NewGame),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Turns a held direction key into spaced-out hops. Only matters on terminals
/// that report key repeat and release.
#[derive(Debug)]
pub(crate) struct RepeatGate {
    held: Option<Step>,
    next_at: Instant,
}

impl RepeatGate {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            held: None,
            next_at: now,
        }
    }

    pub(crate) fn admit(&mut self, step: Step, kind: KeyEventKind, now: Instant) -> bool {
        match kind {
            KeyEventKind::Release => {
                if self.held == Some(step) {
                    self.held = None;
                }
                false
            }
            KeyEventKind::Repeat if self.held == Some(step) => {
                if now >= self.next_at {
                    self.next_at = now + REPEAT_DELAY;
                    true
                } else {
                    false
                }
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held = Some(step);
                self.next_at = now + INITIAL_DELAY;
                true
            }
        }
    }
}

/// Map one key event to a command, letting held direction keys through the
/// repeat gate only.
pub(crate) fn translate(ev: KeyEvent, gate: &mut RepeatGate, now: Instant) -> Option<Command> {
    let cmd = map_key(ev.code, ev.modifiers)?;
    match cmd {
        Command::Hop(step) => gate.admit(step, ev.kind, now).then_some(cmd),
        _ if ev.kind == KeyEventKind::Press => Some(cmd),
        _ => None,
    }
}
