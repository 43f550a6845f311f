use tilemerge_engine::{GameSession, SpawnSeed};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for tile spawning, as 32 hex digits (random if omitted)
    #[arg(long)]
    pub(crate) seed: Option<SpawnSeed>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed } = arg;

    let session = seed.map_or_else(GameSession::new, GameSession::with_seed);
    log::info!("starting game with seed {}", session.seed());

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let session = app.session();
    log::info!(
        "game ended: {} with score {} after {} moves (seed {})",
        session.status(),
        session.score(),
        session.moves(),
        session.seed()
    );
    Ok(())
}
