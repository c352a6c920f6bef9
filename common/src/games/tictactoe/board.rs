use std::fmt;

use super::types::{CELL_COUNT, Mark, MoveError, Position};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from row-major marks; used for fixtures and replays.
    pub fn from_marks(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    pub fn set(&mut self, position: Position, mark: Mark) -> Result<(), MoveError> {
        if mark.is_empty() {
            return Err(MoveError::EmptyMark);
        }

        if !self.is_empty_at(position) {
            return Err(MoveError::CellOccupied(position));
        }

        self.cells[position.index()] = mark;
        Ok(())
    }

    pub fn get(&self, position: Position) -> Mark {
        self.cells[position.index()]
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.get(position).is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Mark::is_empty)
    }

    pub fn snapshot(&self) -> Board {
        *self
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| **cell == mark).count()
    }

    pub fn available_moves(&self) -> Vec<Position> {
        Position::all()
            .filter(|position| self.is_empty_at(*position))
            .collect()
    }

    pub(crate) fn place_unchecked(&mut self, position: Position, mark: Mark) {
        self.cells[position.index()] = mark;
    }

    pub(crate) fn remove(&mut self, position: Position) {
        self.cells[position.index()] = Mark::Empty;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {} ", chunk[0], chunk[1], chunk[2])?;
        }
        Ok(())
    }
}
