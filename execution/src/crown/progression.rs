//! Progression tracker: statistics, streak and round history.

use crown_anchor_types::crown::{Progression, RoundSummary, Stats, Streak, StreakKind};

/// Fold one settled round into the cumulative statistics and streak.
pub fn record_round(progression: &mut Progression, winnings: u64, wagered: u64) {
    let stats = &mut progression.stats;
    stats.games_played = stats.games_played.saturating_add(1);
    stats.total_wagered = stats.total_wagered.saturating_add(wagered);
    if winnings > 0 {
        stats.games_won = stats.games_won.saturating_add(1);
        stats.net_profit = stats.net_profit.saturating_add(signed(winnings));
        stats.biggest_win = stats.biggest_win.max(winnings);
        update_streak(&mut progression.streak, StreakKind::Win);
    } else {
        stats.net_profit = stats.net_profit.saturating_sub(signed(wagered));
        update_streak(&mut progression.streak, StreakKind::Lose);
    }
}

/// Extend the streak when `kind` repeats, otherwise start a new one.
pub fn update_streak(streak: &mut Option<Streak>, kind: StreakKind) {
    match streak {
        Some(current) if current.kind == kind => current.length = current.length.saturating_add(1),
        _ => *streak = Some(Streak::new(kind)),
    }
}

/// Count a bonus activation.
pub fn record_bonus_trigger(progression: &mut Progression) {
    progression.bonuses_triggered = progression.bonuses_triggered.saturating_add(1);
}

/// Push the newest round to the front of the bounded history.
pub fn record_history(progression: &mut Progression, summary: RoundSummary) {
    progression.history.push(summary);
}

/// Zero the statistics. Streak, bonus and history are left alone.
pub fn reset_stats(progression: &mut Progression) {
    progression.stats = Stats::default();
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
