use super::board::Board;
use super::types::{Line, Mark, MoveResult, Position, Scoreboard, Seat};

/// Everything a front-end needs to redraw after a state change.
#[derive(Debug, Clone, PartialEq)]
pub struct StateUpdate {
    pub board: Board,
    pub current_mark: Mark,
    pub turn: Seat,
    pub result: MoveResult,
    pub winning_line: Option<Line>,
    pub last_move: Option<Position>,
    pub computer_mark: Option<Mark>,
    pub scoreboard: Scoreboard,
    pub turn_description: String,
    pub result_description: Option<String>,
}

impl StateUpdate {
    pub fn is_game_over(&self) -> bool {
        self.result.is_terminal()
    }
}

pub trait GameBroadcaster {
    fn broadcast_state(&mut self, update: &StateUpdate);
}

impl<F> GameBroadcaster for F
where
    F: FnMut(&StateUpdate),
{
    fn broadcast_state(&mut self, update: &StateUpdate) {
        self(update)
    }
}
