use crate::config::Args;
use crate::input::{translate, Command, RepeatGate};
use crate::render::{draw_frame, fit_layout, LedMatrix, LevelBanner, Renderer};
use crossterm::event::{self, Event};
use crossterm::terminal;
use ledfrog::Session;
use std::io::Stdout;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SIM_STEP: Duration = Duration::from_millis(10);
const MAX_FRAME_DT: Duration = Duration::from_millis(50); // clamp if system hiccups

pub(crate) fn run(out: &mut Stdout, args: &Args) -> anyhow::Result<()> {
    let rules = args.rules();
    let frame_dt = args.frame_time();
    info!(?rules, fps = args.fps, "starting");

    let mut session = Session::new(rules);
    let mut matrix = LedMatrix::new();
    let mut banner = LevelBanner::new();

    let (tw, th) = terminal::size()?;
    let mut layout = fit_layout(tw, th);
    let mut r = Renderer::new(tw, th);

    let mut gate = RepeatGate::new(Instant::now());
    let mut last = Instant::now();
    let mut acc = Duration::ZERO;

    loop {
        // input
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) => match translate(k, &mut gate, Instant::now()) {
                    Some(Command::Quit) => {
                        info!(score = session.score(), level = session.level(), "quit");
                        return Ok(());
                    }
                    Some(Command::Hop(step)) => session.hop(step),
                    Some(Command::TogglePause) => session.toggle_pause(),
                    Some(Command::NewGame) => {
                        if session.is_over() {
                            session.new_game();
                        }
                    }
                    None => {}
                },
                Event::Resize(w, h) => {
                    debug!(w, h, "resize");
                    r.resize(w, h);
                    layout = fit_layout(w, h);
                }
                _ => {}
            }
        }

        // dt
        let now = Instant::now();
        let frame = now.saturating_duration_since(last).min(MAX_FRAME_DT);
        last = now;

        acc += frame;
        while acc >= SIM_STEP {
            session.tick(SIM_STEP);
            acc -= SIM_STEP;
        }

        // draw
        matrix.sync(&mut session);
        banner.update(&session, frame);
        let card = banner.text();
        draw_frame(&mut r, layout, &matrix, &session, card.as_deref());
        r.flush_diff(out)?;

        let spent = now.elapsed();
        if spent < frame_dt {
            std::thread::sleep(frame_dt - spent);
        }
    }
}
