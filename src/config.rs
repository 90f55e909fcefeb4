use clap::Parser;
use ledfrog::Rules;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "ledfrog")]
#[command(about = "Frogger on a 16x8 LED matrix, drawn in the terminal", long_about = None)]
pub(crate) struct Args {
    /// FPS cap (render rate). Game time runs at a fixed step.
    #[arg(long, default_value_t = 60)]
    pub(crate) fps: u32,

    /// Lives at the start of a game
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub(crate) lives: u8,

    /// Seconds each frog gets to reach the riverbank
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=99))]
    pub(crate) time_limit: u64,

    /// Append logs to this file (stdout is the game screen)
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub(crate) log_level: LevelFilter,
}

impl Args {
    pub(crate) fn rules(&self) -> Rules {
        let defaults = Rules::default();
        Rules {
            initial_lives: self.lives,
            max_lives: defaults.max_lives.max(self.lives),
            time_limit: Duration::from_secs(self.time_limit),
        }
    }

    pub(crate) fn frame_time(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps.clamp(10, 240) as f32)
    }
}
