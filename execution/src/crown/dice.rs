//! Outcome generator.

use super::GameRng;
use crown_anchor_types::crown::{RoundOutcome, RoundSummary, SessionSeed, Symbol, SQUARES};
use rand::Rng;

/// Throw three independent, uniform dice.
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> RoundOutcome {
    RoundOutcome(std::array::from_fn(|_| {
        Symbol::ALL[rng.gen_range(0..SQUARES)]
    }))
}

/// Check that `summary` shows the dice `seed` produces for its round.
pub fn verify(seed: &SessionSeed, summary: &RoundSummary) -> bool {
    roll(&mut GameRng::new(seed, summary.round)) == summary.outcome
}
