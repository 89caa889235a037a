//! Settlement engine.

use super::bonus;
use crown_anchor_types::crown::{BonusState, Bets, RoundOutcome, Settlement};
use rand::Rng;
use tracing::debug;

/// Resolve `bets` against `outcome` and zero every wager.
///
/// Each matching die pays the square's wager once. The bonus countdown is
/// ticked before any bonus is applied, so a bonus that activates this round
/// already applies to this round's winnings.
pub fn settle<R: Rng + ?Sized>(
    bets: &mut Bets,
    outcome: &RoundOutcome,
    bonus_state: &mut BonusState,
    rng: &mut R,
) -> Settlement {
    let per_symbol_win: Bets = bets
        .placed()
        .map(|(symbol, amount)| (symbol, amount.saturating_mul(outcome.count(symbol))))
        .collect();
    let base_winnings = per_symbol_win.total();

    let bonus_triggered = bonus::tick(bonus_state, rng);
    let (total_winnings, bonus_applied) = bonus::apply(bonus_state, base_winnings);
    bets.clear();

    debug!(
        dice = %outcome.display(),
        base_winnings,
        total_winnings,
        ?bonus_applied,
        "round settled"
    );
    Settlement {
        per_symbol_win,
        base_winnings,
        total_winnings,
        bonus_applied,
        bonus_triggered,
    }
}
