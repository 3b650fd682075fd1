use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{Board, RandomShapes, ShapeSeed};

use crate::{tui::Runtime, util};

use self::app::PlayApp;

mod app;
mod screen;

const DEFAULT_TICK_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub(crate) struct PlayArg {
    /// Milliseconds between gravity steps
    #[clap(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Seed for the shape sequence, as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<ShapeSeed>,
    /// Do not show where the falling piece will land
    #[clap(long)]
    pub(crate) no_ghost: bool,
    /// Write logs to this file (set the level with RUST_LOG)
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
            no_ghost: false,
            log_file: None,
        }
    }
}

impl PlayArg {
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    util::init_tracing(arg.log_file.as_deref())?;
    blockfall_engine::verify_catalog().context("shape catalog is inconsistent")?;

    let shapes = arg.seed.map_or_else(RandomShapes::new, RandomShapes::with_seed);
    tracing::info!(seed = %shapes.seed(), tick_ms = arg.tick_ms, "starting session");

    let board = Board::with_source(shapes);
    let mut app = PlayApp::new(board, arg.tick_interval(), !arg.no_ghost);
    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    tracing::info!("session ended");
    Ok(())
}
