use std::io::Write;

use tictactoe_common::tictactoe::{GameBroadcaster, StateUpdate};

use crate::ui::render_update;

/// Redraws the board on stdout after every state change.
pub struct TerminalBroadcaster<W: Write> {
    out: W,
}

impl TerminalBroadcaster<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBroadcaster<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> GameBroadcaster for TerminalBroadcaster<W> {
    fn broadcast_state(&mut self, update: &StateUpdate) {
        let _ = writeln!(self.out, "\n{}", render_update(update));
        let _ = self.out.flush();
    }
}
