use crate::grid::BASE_CELL_SIZE;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Largest snapshot side, in pixels
pub const MAX_SNAPSHOT_SIDE: i64 = 16_384;

/// Command line configuration
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Animated triangle mosaic colored by coherent noise")]
pub struct Config {
    /// Lower bound for the cell size, in pixels
    #[arg(long, default_value_t = BASE_CELL_SIZE, value_parser = parse_cell_size)]
    pub cell_size: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for the noise field and the hue shimmer
    #[arg(long, default_value_t = 0)]
    pub seed: u32,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Render a single frame into this PNG file instead of animating in the terminal
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..=MAX_SNAPSHOT_SIDE))]
    pub width: u32,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..=MAX_SNAPSHOT_SIDE))]
    pub height: u32,

    /// Frame rendered by --snapshot
    #[arg(long, default_value_t = 0)]
    pub frame: u64,

    /// Append logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Time budget of one animation frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

fn parse_cell_size(s: &str) -> Result<f64, String> {
    let size: f64 = s.parse().map_err(|err| format!("{err}"))?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("`{s}` is not a positive cell size"))
    }
}
