use crate::animation::{sanitize_dimension, AnimationDriver, ColorCycleTrigger};
use crate::app::GridApp;
use crate::config::Config;
use crate::export::{export_frames, FrameFormat};
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, Level};

mod animation;
mod app;
mod banner;
mod config;
mod export;
mod input;
mod render;

/// Run a neon snake back and forth across a grid in your terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The number of rows in the grid (minimum 5).
    #[arg(short, long, value_parser = parse_dimension)]
    rows: Option<u16>,

    /// The number of columns in the grid (minimum 5).
    #[arg(short, long, value_parser = parse_dimension)]
    columns: Option<u16>,

    /// Milliseconds between steps, between 50 and 500.
    #[arg(short, long)]
    speed: Option<u32>,

    /// How many terminal columns each grid cell is drawn with.
    #[arg(long)]
    cell_width: Option<u16>,

    /// The title shown above the grid.
    #[arg(short, long)]
    title: Option<String>,

    /// Which ticks advance the color cycle.
    #[arg(long, value_enum)]
    color_cycle: Option<ColorCycleTrigger>,

    /// The path to the configuration file.
    #[arg(long, env = "NEON_GRID_CONFIG")]
    config: Option<PathBuf>,

    /// Print this many frames to stdout instead of running interactively.
    #[arg(long)]
    frames: Option<u64>,

    /// The format frames are printed in.
    #[arg(long, value_enum, default_value_t = FrameFormat::Text, requires = "frames")]
    format: FrameFormat,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// The most verbose level to log at.
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            rows: self.rows,
            columns: self.columns,
            speed: self.speed,
            cell_width: self.cell_width,
            title: self.title.clone(),
            color_cycle: self.color_cycle,
        }
    }
}

fn parse_dimension(input: &str) -> Result<u16, String> {
    Ok(sanitize_dimension(input))
}

fn init_logging(path: &Path, level: Level) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file '{}'", path.display()))?;
    tracing_subscriber::fmt().with_writer(Mutex::new(file)).with_ansi(false).with_max_level(level).init();
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = Config::load(cli.config.as_deref())?;
    let settings = config.merge(cli.overrides()).resolve();
    debug!(?settings, "settings resolved");

    match cli.frames {
        Some(frames) => {
            let mut driver = AnimationDriver::new(settings.initial_state(), settings.color_cycle, Instant::now());
            export_frames(&mut std::io::stdout().lock(), &mut driver, frames, cli.format)
        }
        None => GridApp::new(settings).run(),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error running neon-grid: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dimensions_are_sanitized() {
        let cli = Cli::try_parse_from(["neon-grid", "--rows", "2", "--columns", "abc"]).expect("parse failed");
        assert_eq!(cli.rows, Some(5));
        assert_eq!(cli.columns, Some(5));
    }

    #[test]
    fn overrides_only_given_flags() {
        let cli = Cli::try_parse_from(["neon-grid", "--speed", "230", "--color-cycle", "step"]).expect("parse failed");
        let overrides = cli.overrides();
        assert_eq!(overrides.speed, Some(230));
        assert_eq!(overrides.color_cycle, Some(ColorCycleTrigger::Step));
        assert_eq!(overrides.rows, None);
        assert_eq!(overrides.title, None);
    }

    #[test]
    fn format_requires_frames() {
        assert!(Cli::try_parse_from(["neon-grid", "--format", "json"]).is_err());
        let cli = Cli::try_parse_from(["neon-grid", "--frames", "3", "--format", "json"]).expect("parse failed");
        assert_eq!(cli.format, FrameFormat::Json);
    }
}
