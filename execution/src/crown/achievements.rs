//! Achievement evaluator.
//!
//! Predicates read the state left behind by a settled round. Unlocking is
//! idempotent: an already unlocked achievement is never reported again.

use crown_anchor_types::crown::{
    AchievementId, AchievementSet, Bets, RoundOutcome, Stats, Streak, BIG_WIN_THRESHOLD,
    BONUS_HUNTER_TRIGGERS, COMEBACK_BALANCE, HOT_STREAK, UNSTOPPABLE_STREAK, VETERAN_GAMES,
};
use tracing::info;

/// State after a round has been settled and recorded.
pub struct RoundContext<'a> {
    pub stats: &'a Stats,
    pub streak: Option<Streak>,
    /// Balance after wagers were taken and before winnings were credited.
    pub balance_before_credit: u64,
    pub outcome: &'a RoundOutcome,
    /// Wagers the round was settled against.
    pub wagers: &'a Bets,
    pub winnings: u64,
    pub bonuses_triggered: u32,
}

impl RoundContext<'_> {
    fn qualifies(&self, id: AchievementId) -> bool {
        let wins = self.streak.map(|s| s.wins()).unwrap_or(0);
        match id {
            AchievementId::FirstWin => self.stats.games_won == 1,
            AchievementId::BigWin => self.winnings >= BIG_WIN_THRESHOLD,
            AchievementId::HotStreak => wins >= HOT_STREAK,
            AchievementId::Unstoppable => wins >= UNSTOPPABLE_STREAK,
            AchievementId::Veteran => self.stats.games_played >= VETERAN_GAMES,
            AchievementId::RoyalFlush => self.outcome.is_triple(),
            AchievementId::BonusHunter => self.bonuses_triggered >= BONUS_HUNTER_TRIGGERS,
            AchievementId::Comeback => {
                self.balance_before_credit < COMEBACK_BALANCE && self.winnings > 0
            }
            AchievementId::PerfectGame => {
                self.winnings > 0
                    && self
                        .outcome
                        .dice()
                        .iter()
                        .all(|&die| self.wagers.get(die) > 0)
            }
            // Unlocked by the operations themselves, never by a round.
            AchievementId::HighRoller | AchievementId::TournamentChampion => false,
        }
    }
}

/// Unlock every achievement `ctx` qualifies for. Returns the new unlocks.
pub fn evaluate(ctx: &RoundContext<'_>, set: &mut AchievementSet) -> Vec<AchievementId> {
    let mut unlocked = Vec::new();
    for id in AchievementId::ALL {
        if !set.is_unlocked(id) && ctx.qualifies(id) && unlock(set, id) {
            unlocked.push(id);
        }
    }
    unlocked
}

/// Unlock a single achievement. Returns true only the first time.
pub fn unlock(set: &mut AchievementSet, id: AchievementId) -> bool {
    let unlocked = set.unlock(id);
    if unlocked {
        info!(achievement = id.key(), title = id.info().title, "achievement unlocked");
    }
    unlocked
}
