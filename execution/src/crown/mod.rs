//! Crown & Anchor rules.
//!
//! Three dice, six squares. Each die matching a square pays the wager on that
//! square once more, so a triple pays 3:1. Unmatched wagers are forfeited.
//!
//! A round flows through the modules in this order:
//! - [`ledger`]: balance and per-square wagers
//! - [`dice`]: the outcome
//! - [`settlement`] and [`bonus`]: payout and the bonus countdown
//! - [`progression`]: statistics, streak and history
//! - [`achievements`]: unlock predicates
//!
//! [`session::GameSession`] threads one session through all of them and
//! persists it after every change.

pub mod achievements;
pub mod bonus;
pub mod dice;
#[cfg(test)]
mod integration_tests;
pub mod keys;
pub mod ledger;
pub mod notice;
pub mod persistence;
pub mod progression;
pub mod room;
pub mod session;
pub mod settlement;
pub mod tournament;

use commonware_cryptography::{sha256::Sha256, Hasher};
use commonware_utils::hex;
use crown_anchor_types::crown::{LimitKind, SessionSeed};
use rand::RngCore;
use thiserror::Error;

pub use ledger::BetLedger;
pub use notice::Notice;
pub use session::GameSession;

/// Deterministic random number generator for one round.
///
/// Uses a SHA256 hash chain over the session seed and the round number, so
/// anyone holding the seed can re-derive a round's dice.
#[derive(Clone)]
pub struct GameRng {
    state: [u8; 32],
    index: usize,
}

impl GameRng {
    /// Create a new RNG from a session seed and round number.
    pub fn new(seed: &SessionSeed, round: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&seed.0);
        hasher.update(&round.to_be_bytes());
        Self {
            state: hasher.finalize().0,
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= 32 {
            // Rehash to get more bytes
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let result = self.state[self.index];
        self.index += 1;
        result
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_be_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.next_byte();
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Public commitment to a session seed: hex(sha256(seed)).
pub fn seed_commitment(seed: &SessionSeed) -> String {
    hex(&Sha256::hash(&seed.0).0)
}

/// Reason an operation was rejected. A rejected operation changes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance { needed: u64, available: u64 },
    #[error("{kind:?} limit of {limit} exceeded")]
    LimitExceeded { kind: LimitKind, limit: u64 },
    #[error("no prior bet to repeat")]
    NoPriorBet,
    #[error("no bets placed")]
    NoBetsPlaced,
    #[error("invalid chip value {0}")]
    InvalidChip(u64),
    #[error("invalid table limits")]
    InvalidLimits,
    #[error("player name is required")]
    MissingPlayerName,
    #[error("room code is required")]
    MissingRoomCode,
    #[error("a tournament is already in progress")]
    TournamentInProgress,
    #[error("not entered in a tournament")]
    TournamentNotJoined,
}

impl GameError {
    /// Stable identifier for API callers.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InsufficientBalance { .. } => "insufficientBalance",
            GameError::LimitExceeded { .. } => "limitExceeded",
            GameError::NoPriorBet => "noPriorBet",
            GameError::NoBetsPlaced => "noBetsPlaced",
            GameError::InvalidChip(_) => "invalidChip",
            GameError::InvalidLimits => "invalidLimits",
            GameError::MissingPlayerName => "missingPlayerName",
            GameError::MissingRoomCode => "missingRoomCode",
            GameError::TournamentInProgress => "tournamentInProgress",
            GameError::TournamentNotJoined => "tournamentNotJoined",
        }
    }
}
