use tictactoe_common::tictactoe::{
    Difficulty, GameMode, LineKind, Mark, Position, StateUpdate,
};

pub const HELP: &str = "\
Cells are numbered 1-9, left to right, top to bottom.
  1-9                       place your mark
  <enter> | restart         play again once the game is over
  new <single|two> [level]  start a new game (level: easy, normal, hard)
  reset                     clear the score
  help                      show this message
  quit                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(Position),
    Restart,
    ResetScore,
    NewGame {
        mode: GameMode,
        difficulty: Option<Difficulty>,
    },
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Restart;
    };

    if let Ok(number) = first.parse::<usize>() {
        return match number.checked_sub(1).and_then(Position::new) {
            Some(position) => Command::Place(position),
            None => Command::Invalid(format!("There is no cell {}", number)),
        };
    }

    match first.to_ascii_lowercase().as_str() {
        "restart" | "r" => Command::Restart,
        "reset" => Command::ResetScore,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" => {
            let mode = match words.next().map(str::parse::<GameMode>) {
                Some(Ok(mode)) => mode,
                Some(Err(e)) => return Command::Invalid(e),
                None => return Command::Invalid("Usage: new <single|two> [level]".to_string()),
            };
            let difficulty = match words.next().map(str::parse::<Difficulty>) {
                Some(Ok(difficulty)) => Some(difficulty),
                Some(Err(e)) => return Command::Invalid(e),
                None => None,
            };
            Command::NewGame { mode, difficulty }
        }
        other => Command::Invalid(format!("Unknown command: {}", other)),
    }
}

fn cell_label(update: &StateUpdate, position: Position) -> String {
    match update.board.get(position) {
        Mark::Empty => (position.index() + 1).to_string(),
        mark => {
            let on_winning_line = update
                .winning_line
                .is_some_and(|line| line.contains(position));
            if on_winning_line {
                mark.to_string().to_lowercase()
            } else {
                mark.to_string()
            }
        }
    }
}

pub fn line_name(kind: LineKind) -> &'static str {
    match kind {
        LineKind::TopRow => "top row",
        LineKind::MiddleRow => "middle row",
        LineKind::BottomRow => "bottom row",
        LineKind::LeftColumn => "left column",
        LineKind::CenterColumn => "center column",
        LineKind::RightColumn => "right column",
        LineKind::MainDiagonal => "diagonal from top left",
        LineKind::AntiDiagonal => "diagonal from top right",
    }
}

pub fn render_update(update: &StateUpdate) -> String {
    let mut out = String::new();

    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let labels: Vec<String> = (0..3)
            .filter_map(|col| Position::from_row_col(row, col))
            .map(|position| cell_label(update, position))
            .collect();
        out.push_str(&format!(" {} \n", labels.join(" | ")));
    }
    out.push('\n');

    match &update.result_description {
        Some(result) => {
            out.push_str(result);
            out.push('\n');
            if let Some(line) = update.winning_line {
                out.push_str(&format!("Winning line: {}\n", line_name(line.kind)));
            }
            out.push_str("Press Enter to play again, or type `quit` to leave.\n");
        }
        None => {
            out.push_str(&update.turn_description);
            out.push('\n');
        }
    }

    let score = &update.scoreboard;
    if update.computer_mark.is_some() {
        out.push_str(&format!(
            "You {} - {} CPU, draws {}\n",
            score.player_one_wins, score.player_two_wins, score.draws
        ));
    } else {
        out.push_str(&format!(
            "Player 1 {} - {} Player 2, draws {}\n",
            score.player_one_wins, score.player_two_wins, score.draws
        ));
    }

    out
}
