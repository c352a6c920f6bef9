use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tictactoe_common::SessionRng;
use tictactoe_common::log;
use tictactoe_common::tictactoe::{
    GameBroadcaster, GameSession, MoveError, MoveScheduler, SessionConfig, TokioMoveScheduler,
};

use crate::ui::{Command, HELP, parse_command};

use super::TerminalBroadcaster;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run_tictactoe_game(config: SessionConfig, rng: SessionRng) -> Result<(), String> {
    log!("Session seed {}", rng.seed());

    let (scheduler, mut fired_rx) = TokioMoveScheduler::channel();
    let mut session = GameSession::new(scheduler, TerminalBroadcaster::stdout(), rng);

    println!("{}", HELP);
    session.start_with_config(config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            Some(handle) = fired_rx.recv() => {
                session.on_timer_elapsed(handle);
            }
            line = lines.next_line() => {
                let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
                let Some(line) = line else {
                    break;
                };
                if handle_command(&mut session, parse_command(&line)) == Flow::Quit {
                    break;
                }
            }
        }
    }

    let score = session.scoreboard();
    log!(
        "Leaving after {} games ({} - {}, {} draws)",
        score.games_played(),
        score.player_one_wins,
        score.player_two_wins,
        score.draws
    );
    Ok(())
}

fn handle_command<S, B>(session: &mut GameSession<S, B>, command: Command) -> Flow
where
    S: MoveScheduler,
    B: GameBroadcaster,
{
    match command {
        Command::Place(position) => {
            if let Err(e) = session.submit_move(position) {
                hint(move_error_hint(&e));
            }
        }
        Command::Restart => {
            if session.is_game_over() {
                session.restart();
            }
        }
        Command::NewGame { mode, difficulty } => {
            let difficulty = difficulty.unwrap_or(session.config().difficulty);
            session.start_new_game(mode, difficulty);
        }
        Command::ResetScore => session.reset_scoreboard(),
        Command::Help => println!("{}", HELP),
        Command::Quit => return Flow::Quit,
        Command::Invalid(message) => hint(message),
    }
    Flow::Continue
}

fn hint(message: String) {
    println!("{}", message);
    let _ = std::io::stdout().flush();
}

/// Cells are named by the 1-9 numbers the player types.
fn move_error_hint(error: &MoveError) -> String {
    match error {
        MoveError::NotYourTurn => "Wait for the CPU to move.".to_string(),
        MoveError::GameOver => "The game is over. Press Enter to play again.".to_string(),
        MoveError::CellOccupied(position) => {
            format!("Cell {} is already taken.", position.index() + 1)
        }
        MoveError::EmptyMark => "That move has no mark.".to_string(),
    }
}
