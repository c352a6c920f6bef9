mod config;
mod offline;
mod ui;

use clap::Parser;
use tictactoe_common::config::{ConfigManager, FileContentConfigProvider, Validate};
use tictactoe_common::SessionRng;
use tictactoe_common::log;
use tictactoe_common::logger;
use tictactoe_common::tictactoe::{Difficulty, FirstPlayer, GameMode};

use config::{ClientConfig, get_config_manager};
use offline::run_tictactoe_game;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe in the terminal")]
struct Args {
    /// single or two
    #[arg(long)]
    mode: Option<GameMode>,
    /// easy, normal or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// player_one, player_two, random or loser
    #[arg(long)]
    first_player: Option<FirstPlayer>,
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    use_log_prefix: bool,
    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
    /// Seed for the computer's choices; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply_to(&self, config: &mut ClientConfig) {
        if let Some(mode) = self.mode {
            config.session.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.session.difficulty = difficulty;
        }
        if let Some(first_player) = self.first_player {
            config.session.first_player = first_player;
        }
        if self.use_log_prefix {
            config.log.use_prefix = true;
        }
    }

    fn session_rng(&self) -> SessionRng {
        match self.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::<FileContentConfigProvider, ClientConfig>::from_yaml_file(path),
        None => get_config_manager(),
    };

    let mut config = config_manager.get_config()?;
    args.apply_to(&mut config);
    config.validate()?;

    if args.save_config {
        config_manager.set_config(&config)?;
    }

    let prefix = if config.log.use_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log.target())?;

    log!(
        "Starting {} game (difficulty {}, first player {:?})",
        config.session.mode,
        config.session.difficulty,
        config.session.first_player
    );

    run_tictactoe_game(config.session, args.session_rng()).await?;

    Ok(())
}
