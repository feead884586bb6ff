use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use checkers_engine::agent::{ComputerPlayer, HumanPlayer, Player, RuleVariant};
use checkers_engine::config::{GameConfig, PlayerConfig};
use checkers_engine::game_repr::Side;
use checkers_engine::orchestrator::{ConsoleRenderer, Orchestrator, OrchestratorError};

#[derive(Parser, Debug)]
#[command(name = "checkers", version, about = "Play checkers on the console against a tree-search computer")]
struct Cli {
    /// TOML settings file; missing or invalid files fall back to defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Plies the computer looks ahead
    #[arg(short, long)]
    depth: Option<u32>,
    /// Who plays the first side
    #[arg(long, value_enum)]
    p1: Option<PlayerArg>,
    /// Who plays the second side
    #[arg(long, value_enum)]
    p2: Option<PlayerArg>,
    /// Give-away rules: a player who cannot move wins
    #[arg(long)]
    suicide: bool,
    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,
    /// Write the effective settings to FILE before playing
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlayerArg {
    Human,
    Computer,
}

impl From<PlayerArg> for PlayerConfig {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Human => PlayerConfig::Human,
            PlayerArg::Computer => PlayerConfig::Computer,
        }
    }
}

impl Cli {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load_or_default(path),
            None => GameConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.tree_depth = depth;
        }
        if let Some(p1) = self.p1 {
            config.player1 = p1.into();
        }
        if let Some(p2) = self.p2 {
            config.player2 = p2.into();
        }
        if self.suicide {
            config.variant = RuleVariant::Suicide;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn make_player(config: &GameConfig, side: Side) -> anyhow::Result<Box<dyn Player>> {
    let name = format!("Player {}", side.number());
    let player: Box<dyn Player> = match config.player(side) {
        PlayerConfig::Human => Box::new(HumanPlayer::stdio(name)),
        PlayerConfig::Computer => Box::new(
            ComputerPlayer::new(config.search_config(), format!("Computer {}", side.number()))
                .context("failed to start the search threads")?,
        ),
    };
    Ok(player)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to save settings to {}", path.display()))?;
    }
    log::info!(
        "starting {} game, depth {}, {:?} vs {:?}",
        config.variant,
        config.tree_depth,
        config.player1,
        config.player2
    );

    let mut game = Orchestrator::new(
        make_player(&config, Side::One)?,
        make_player(&config, Side::Two)?,
        config.variant,
    );
    game.add_observer(Box::new(ConsoleRenderer::new(io::stdout())));

    match game.play() {
        Ok(result) => {
            if let Some(winner) = result.winner() {
                println!("Player {} wins after {} moves.", winner.number(), game.moves_played());
            }
        }
        Err(OrchestratorError::Aborted(name)) => println!("{name} left the game."),
    }
    Ok(())
}
