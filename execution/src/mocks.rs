use crate::{
    config::TableConfig,
    crown::{dice, GameRng, GameSession},
    Memory, Store,
};
use crown_anchor_types::crown::{RoundOutcome, SessionSeed};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::warn;

/// Creates a session seed from a small integer.
pub fn create_seed(seed: u64) -> SessionSeed {
    SessionSeed(StdRng::seed_from_u64(seed).gen())
}

/// Creates a fresh in-memory session with default table rules.
pub fn session(seed: u64) -> GameSession<Memory> {
    session_with(Memory::default(), seed)
}

/// Creates a session over `store` with default table rules.
pub fn session_with<S: Store>(store: S, seed: u64) -> GameSession<S> {
    GameSession::load_with_seed(store, TableConfig::default(), create_seed(seed))
}

/// Finds a seed whose dice for `round` satisfy `accept`.
pub fn find_seed(round: u64, accept: impl Fn(&RoundOutcome) -> bool) -> SessionSeed {
    (0u64..)
        .map(create_seed)
        .find(|seed| accept(&dice::roll(&mut GameRng::new(seed, round))))
        .expect("seed search is unbounded")
}

/// Finds a seed whose first round rolls exactly `outcome` (in any order).
pub fn seed_rolling(outcome: RoundOutcome) -> SessionSeed {
    let mut wanted = outcome.0;
    wanted.sort();
    find_seed(1, |rolled| {
        let mut dice = rolled.0;
        dice.sort();
        dice == wanted
    })
}

/// A store whose backing storage is always unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingStore;

impl Store for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        warn!(key, "storage unavailable during get operation");
        None
    }

    fn insert(&mut self, key: &str, _: String) {
        warn!(key, "storage unavailable during insert operation");
    }

    fn delete(&mut self, key: &str) {
        warn!(key, "storage unavailable during delete operation");
    }
}
