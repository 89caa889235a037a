use crown_anchor_types::crown::{
    TableLimits, CHIP_TIERS, INITIAL_BONUS_COUNTDOWN, STARTING_BALANCE, TOURNAMENT_ENTRY_FEE,
    TOURNAMENT_PRIZE_POOL,
};
use serde::{Deserialize, Serialize};

/// House rules for a table. Every field has a default, so a partial
/// configuration (or none at all) is fine.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub starting_balance: u64,
    pub limits: TableLimits,
    pub chip_tiers: [u64; 4],
    pub initial_bonus_countdown: u32,
    pub tournament_entry_fee: u64,
    pub tournament_prize_pool: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: STARTING_BALANCE,
            limits: TableLimits::default(),
            chip_tiers: CHIP_TIERS,
            initial_bonus_countdown: INITIAL_BONUS_COUNTDOWN,
            tournament_entry_fee: TOURNAMENT_ENTRY_FEE,
            tournament_prize_pool: TOURNAMENT_PRIZE_POOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: TableConfig =
            serde_json::from_str(r#"{"starting_balance": 250, "limits": {"maxBet": 50}}"#)
                .unwrap();
        assert_eq!(config.starting_balance, 250);
        assert_eq!(config.limits.max_bet, 50);
        assert_eq!(config.limits.min_bet, 1);
        assert_eq!(config.chip_tiers, CHIP_TIERS);
    }
}
