use super::board::Board;
use super::types::{LINES, Line, Mark, WinningLine};

pub fn find_winner(board: &Board) -> Option<Mark> {
    find_winning_line(board).map(|winning| winning.mark)
}

/// Returns the first fully marked line in scan order.
pub fn find_winning_line(board: &Board) -> Option<WinningLine> {
    LINES
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| WinningLine::new(mark, *line)))
}

pub fn is_draw(board: &Board) -> bool {
    board.is_full() && find_winner(board).is_none()
}

/// Whether `mark` owns any complete line, regardless of scan order.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    LINES.iter().any(|line| line_owner(board, line) == Some(mark))
}

fn line_owner(board: &Board, line: &Line) -> Option<Mark> {
    let [a, b, c] = line.cells;
    let mark = board.get(a);
    if mark.is_empty() {
        return None;
    }

    if board.get(b) == mark && board.get(c) == mark {
        Some(mark)
    } else {
        None
    }
}
