mod board;
mod bot_controller;
mod broadcaster;
mod scheduler;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, choose_move, find_best_move, minimax};
pub use broadcaster::{GameBroadcaster, StateUpdate};
pub use scheduler::{ManualMoveScheduler, MoveScheduler, TimerHandle, TokioMoveScheduler};
pub use session::GameSession;
pub use settings::{Difficulty, FirstPlayer, GameMode, SessionConfig};
pub use types::{
    BOARD_SIZE, CELL_COUNT, LINES, Line, LineKind, Mark, MoveError, MoveResult, Position,
    Scoreboard, Seat, WinningLine,
};
pub use win_detector::{find_winner, find_winning_line, has_line, is_draw};
