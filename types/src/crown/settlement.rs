use serde::{Deserialize, Serialize};

use super::Bets;

/// Result of resolving one round's bets against its dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// Winnings per square before any bonus.
    pub per_symbol_win: Bets,
    /// Sum of `per_symbol_win`.
    pub base_winnings: u64,
    /// Amount credited to the balance, after the bonus multiplier.
    pub total_winnings: u64,
    /// Multiplier consumed by this round, if any.
    pub bonus_applied: Option<u8>,
    /// Multiplier of a bonus activated by this round's countdown, if any.
    pub bonus_triggered: Option<u8>,
}

impl Settlement {
    pub fn won(&self) -> bool {
        self.total_winnings > 0
    }
}
