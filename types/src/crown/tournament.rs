use serde::{Deserialize, Serialize};

use super::{TOURNAMENT_PLAYERS, TOURNAMENT_ROUNDS};

/// How the table is being played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Single,
    Multiplayer,
    Tournament,
}

/// Locally simulated knockout tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub active: bool,
    pub started: bool,
    /// Current round, starting at 1.
    pub round: u32,
    pub players_left: u32,
    pub prize_pool: u64,
    /// Seat in the opening bracket (1-8).
    pub seat: u32,
}

impl Tournament {
    pub fn new(prize_pool: u64, seat: u32) -> Self {
        Self {
            active: true,
            started: false,
            round: 1,
            players_left: TOURNAMENT_PLAYERS,
            prize_pool,
            seat,
        }
    }

    /// Name of the current bracket stage.
    pub fn stage(&self) -> &'static str {
        match TOURNAMENT_ROUNDS.saturating_sub(self.round) {
            0 => "Final",
            1 => "Semi Finals",
            _ => "Quarter Finals",
        }
    }
}
