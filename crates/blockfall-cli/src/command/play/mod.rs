use std::path::PathBuf;

use blockfall_engine::{Board, GameSession, PieceSeed};
use tracing::info;

use crate::{config::PlayConfig, tui::Tui};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Logical ticks per second
    #[arg(long, value_name = "HZ")]
    tick_rate: Option<f64>,
    /// JSON file with play settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Stop at game over instead of starting a new game
    #[arg(long)]
    no_auto_restart: bool,
}

impl PlayArg {
    #[cfg(test)]
    pub(crate) fn tick_rate(&self) -> Option<f64> {
        self.tick_rate
    }

    #[cfg(test)]
    pub(crate) fn no_auto_restart(&self) -> bool {
        self.no_auto_restart
    }

    /// Merges the config file (if any) with the flags; flags win.
    fn resolve(&self) -> anyhow::Result<PlayConfig> {
        let mut config = match &self.config {
            Some(path) => PlayConfig::load(path)?,
            None => PlayConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if self.no_auto_restart {
            config.auto_restart = false;
        }
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.resolve()?;
    let board = match config.seed {
        Some(seed) => Board::with_seed(seed),
        None => Board::new(),
    };
    info!(
        seed = %board.seed(),
        tick_rate = config.tick_rate,
        auto_restart = config.auto_restart,
        "starting game"
    );

    let session = GameSession::new(board, config.schedule(), config.auto_restart);
    let mut app = PlayApp::new(session, config.tick_rate);
    Tui::new().run(&mut app)?;

    let session = app.session();
    info!(
        ticks = session.total_ticks(),
        cleared_rows = session.board().cleared_rows(),
        finished_games = session.finished_games(),
        "session ended"
    );
    Ok(())
}
