use crate::games::RandomSource;
use crate::log;
use super::board::Board;
use super::settings::Difficulty;
use super::types::{Mark, Position};
use super::win_detector::has_line;

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
    pub difficulty: Difficulty,
}

impl BotInput {
    pub fn new(board: &Board, bot_mark: Mark, difficulty: Difficulty) -> Self {
        Self {
            board: board.snapshot(),
            bot_mark,
            difficulty,
        }
    }
}

/// Picks the computer's move: the optimal cell, modulated by difficulty.
pub fn choose_move(input: &BotInput, rng: &mut impl RandomSource) -> Position {
    let best = find_best_move(&input.board, input.bot_mark);

    let chosen = match input.difficulty {
        Difficulty::Hard => {
            if input.board.is_empty() && rng.next_below(2) == 0 {
                Position::CENTER
            } else {
                best
            }
        }
        Difficulty::Normal => best_with_chance(&input.board, best, 3, rng),
        Difficulty::Easy => best_with_chance(&input.board, best, 1, rng),
    };

    log!(
        "Bot {} ({:?}) picked cell {} (optimal {})",
        input.bot_mark,
        input.difficulty,
        chosen.index(),
        best.index()
    );

    chosen
}

/// Plays `best` with probability `quarters / 4`, otherwise another empty cell.
fn best_with_chance(
    board: &Board,
    best: Position,
    quarters: usize,
    rng: &mut impl RandomSource,
) -> Position {
    if rng.next_below(4) < quarters {
        return best;
    }

    let alternatives: Vec<Position> = board
        .available_moves()
        .into_iter()
        .filter(|position| *position != best)
        .collect();

    if alternatives.is_empty() {
        return best;
    }

    alternatives[rng.next_below(alternatives.len())]
}

/// Exhaustive search for the cell with the highest minimax score.
/// Ties go to the lowest index.
///
/// # Panics
///
/// Panics when the board is full or `bot_mark` is `Mark::Empty`.
pub fn find_best_move(board: &Board, bot_mark: Mark) -> Position {
    assert!(bot_mark != Mark::Empty, "bot mark must be X or O");
    assert!(!board.is_full(), "find_best_move called on a full board");

    let mut board = board.snapshot();
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for position in board.available_moves() {
        board.place_unchecked(position, bot_mark);
        let score = search(&mut board, 0, false, bot_mark, i32::MIN, i32::MAX);
        board.remove(position);

        if score > best_score {
            best_score = score;
            best_move = Some(position);
        }
    }

    match best_move {
        Some(position) => position,
        None => unreachable!("non-full board always has a move"),
    }
}

/// Scores `board` from `bot_mark`'s point of view: `10 - depth` for a bot
/// win, `depth - 10` for a loss, 0 for a draw.
pub fn minimax(board: &Board, depth: i32, is_maximizing: bool, bot_mark: Mark) -> i32 {
    assert!(bot_mark != Mark::Empty, "bot mark must be X or O");
    let mut board = board.snapshot();
    search(&mut board, depth, is_maximizing, bot_mark, i32::MIN, i32::MAX)
}

fn search(
    board: &mut Board,
    depth: i32,
    is_maximizing: bool,
    bot_mark: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    let Some(opponent_mark) = bot_mark.opponent() else {
        return 0;
    };

    if has_line(board, bot_mark) {
        return WIN_SCORE - depth;
    }
    if has_line(board, opponent_mark) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    let moves = board.available_moves();

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for position in moves {
            board.place_unchecked(position, bot_mark);
            let eval = search(board, depth + 1, false, bot_mark, alpha, beta);
            board.remove(position);

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for position in moves {
            board.place_unchecked(position, opponent_mark);
            let eval = search(board, depth + 1, true, bot_mark, alpha, beta);
            board.remove(position);

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
