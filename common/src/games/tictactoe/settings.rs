use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const DEFAULT_COMPUTER_MOVE_DELAY_MS: u64 = 1000;
pub const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    SinglePlayer,
    #[default]
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Which seat takes X and the opening move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayer {
    #[default]
    PlayerOne,
    PlayerTwo,
    Random,
    /// The loser of the previous game opens; random after a draw.
    Loser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: GameMode,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub first_player: FirstPlayer,
    #[serde(default = "default_computer_move_delay_ms")]
    pub computer_move_delay_ms: u64,
}

fn default_computer_move_delay_ms() -> u64 {
    DEFAULT_COMPUTER_MOVE_DELAY_MS
}

impl SessionConfig {
    pub fn single_player(difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::SinglePlayer,
            difficulty,
            ..Self::default()
        }
    }

    pub fn two_player() -> Self {
        Self::default()
    }

    pub fn with_first_player(mut self, first_player: FirstPlayer) -> Self {
        self.first_player = first_player;
        self
    }

    pub fn with_computer_move_delay(mut self, delay: Duration) -> Self {
        self.computer_move_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn computer_move_delay(&self) -> Duration {
        Duration::from_millis(self.computer_move_delay_ms)
    }

    pub fn is_single_player(&self) -> bool {
        self.mode == GameMode::SinglePlayer
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            difficulty: Difficulty::Normal,
            first_player: FirstPlayer::PlayerOne,
            computer_move_delay_ms: DEFAULT_COMPUTER_MOVE_DELAY_MS,
        }
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms ({}) cannot exceed {}",
                self.computer_move_delay_ms, MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single_player" | "single-player" | "1" => Ok(GameMode::SinglePlayer),
            "two" | "two_player" | "two-player" | "2" => Ok(GameMode::TwoPlayer),
            other => Err(format!("Unknown game mode: {}", other)),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

impl FromStr for FirstPlayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "player_one" | "player-one" | "p1" | "human" => Ok(FirstPlayer::PlayerOne),
            "player_two" | "player-two" | "p2" | "computer" | "cpu" => Ok(FirstPlayer::PlayerTwo),
            "random" => Ok(FirstPlayer::Random),
            "loser" => Ok(FirstPlayer::Loser),
            other => Err(format!("Unknown first player: {}", other)),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::SinglePlayer => write!(f, "single player"),
            GameMode::TwoPlayer => write!(f, "two players"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}
