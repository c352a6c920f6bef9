use std::fmt;

use thiserror::Error;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Mark::Empty => " ",
            Mark::X => "X",
            Mark::O => "O",
        };
        write!(f, "{}", symbol)
    }
}

/// A cell of the 3x3 grid, stored as its row-major index (`row * 3 + col`).
///
/// Positions are only constructible inside the grid, so every `Position`
/// in circulation is a valid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    index: u8,
}

impl Position {
    pub const CENTER: Position = Position::at(4);

    pub const fn new(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Self::at(index))
        } else {
            None
        }
    }

    pub const fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self::at(row * BOARD_SIZE + col))
        } else {
            None
        }
    }

    const fn at(index: usize) -> Self {
        Self { index: index as u8 }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn row(&self) -> usize {
        self.index() / BOARD_SIZE
    }

    pub fn col(&self) -> usize {
        self.index() % BOARD_SIZE
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::at)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    TopRow,
    MiddleRow,
    BottomRow,
    LeftColumn,
    CenterColumn,
    RightColumn,
    MainDiagonal,
    AntiDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub cells: [Position; 3],
}

impl Line {
    const fn new(kind: LineKind, a: usize, b: usize, c: usize) -> Self {
        Self {
            kind,
            cells: [Position::at(a), Position::at(b), Position::at(c)],
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

/// Scan order: rows top to bottom, columns left to right, then diagonals.
pub const LINES: [Line; 8] = [
    Line::new(LineKind::TopRow, 0, 1, 2),
    Line::new(LineKind::MiddleRow, 3, 4, 5),
    Line::new(LineKind::BottomRow, 6, 7, 8),
    Line::new(LineKind::LeftColumn, 0, 3, 6),
    Line::new(LineKind::CenterColumn, 1, 4, 7),
    Line::new(LineKind::RightColumn, 2, 5, 8),
    Line::new(LineKind::MainDiagonal, 0, 4, 8),
    Line::new(LineKind::AntiDiagonal, 2, 4, 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub line: Line,
}

impl WinningLine {
    pub fn new(mark: Mark, line: Line) -> Self {
        Self { mark, line }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Continue,
    Win(Mark),
    Draw,
}

impl MoveResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MoveResult::Continue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    PlayerOne,
    PlayerTwo,
}

impl Seat {
    pub fn other(&self) -> Seat {
        match self {
            Seat::PlayerOne => Seat::PlayerTwo,
            Seat::PlayerTwo => Seat::PlayerOne,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("cell {0} is already marked")]
    CellOccupied(Position),

    #[error("not your turn")]
    NotYourTurn,

    #[error("cannot place an empty mark")]
    EmptyMark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record_win(&mut self, seat: Seat) {
        match seat {
            Seat::PlayerOne => self.player_one_wins += 1,
            Seat::PlayerTwo => self.player_two_wins += 1,
        }
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    pub fn games_played(&self) -> u32 {
        self.player_one_wins + self.player_two_wins + self.draws
    }
}
