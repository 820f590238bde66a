use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who controls the side opposite the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpponentMode {
    /// Both sides are played through `choose_move`.
    #[serde(alias = "player")]
    Human,
    /// Single-step heuristic ("beginner").
    #[default]
    #[serde(alias = "beginner")]
    Greedy,
    /// One-ply lookahead ("professional").
    #[serde(alias = "professional")]
    Lookahead,
}

impl OpponentMode {
    pub fn is_computer(self) -> bool {
        self != OpponentMode::Human
    }
}

impl FromStr for OpponentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "player" => Ok(OpponentMode::Human),
            "greedy" | "beginner" => Ok(OpponentMode::Greedy),
            "lookahead" | "professional" => Ok(OpponentMode::Lookahead),
            other => Err(format!("unknown opponent mode: {other}")),
        }
    }
}

impl fmt::Display for OpponentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpponentMode::Human => "human",
            OpponentMode::Greedy => "greedy",
            OpponentMode::Lookahead => "lookahead",
        };
        f.write_str(name)
    }
}

/// Session settings supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub opponent: OpponentMode,
    /// The human takes Black (and therefore the first ply).
    pub player_moves_first: bool,
    /// Stop in `ComputerThinking` and wait for `play_computer_move`
    /// instead of answering inside the same call.
    pub pace_computer_moves: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: OpponentMode::default(),
            player_moves_first: true,
            pace_computer_moves: false,
        }
    }
}
