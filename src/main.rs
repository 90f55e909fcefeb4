// src/main.rs
mod app;
mod config;
mod input;
mod render;

use anyhow::Context;
use clap::Parser;
use config::Args;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let Some(path) = &args.log else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn setup_terminal(out: &mut impl io::Write, enhanced: bool) -> anyhow::Result<()> {
    execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        DisableLineWrap,
        terminal::Clear(terminal::ClearType::All)
    )?;
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

fn restore_terminal(out: &mut impl io::Write, enhanced: bool) {
    if enhanced {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(
        out,
        EnableLineWrap,
        cursor::Show,
        LeaveAlternateScreen,
        ResetColor
    );
    let _ = terminal::disable_raw_mode();
}

/// Set the screen up, play, and restore it even when setup itself failed.
fn in_game_screen<W: io::Write>(
    out: &mut W,
    enhanced: bool,
    play: impl FnOnce(&mut W) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let res = setup_terminal(out, enhanced).and_then(|()| play(out));
    restore_terminal(out, enhanced);
    res
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut out = io::stdout();

    terminal::enable_raw_mode().context("could not enable raw mode")?;
    // key repeat/release events, where the terminal can report them
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    in_game_screen(&mut out, enhanced, |out| app::run(out, &args))
}
