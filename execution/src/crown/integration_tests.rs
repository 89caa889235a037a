//! Whole-session flows: betting, rolling, bonus rounds, achievements,
//! tournaments and persistence working together.

#[cfg(test)]
mod tests {
    use crate::{
        config::TableConfig,
        crown::{dice, persistence, tournament::TournamentUpdate, GameError, GameSession, Notice},
        mocks::{find_seed, seed_rolling, session},
        Memory, Store,
    };
    use crown_anchor_types::{
        api::{Intent, Severity},
        crown::{
            decode_receipt, AchievementId, GameMode, RoundOutcome, SessionSeed, StreakKind,
            Symbol::{self, *},
            HISTORY_CAPACITY,
        },
    };

    fn session_from(seed: SessionSeed, config: TableConfig) -> GameSession<Memory> {
        GameSession::load_with_seed(Memory::default(), config, seed)
    }

    /// Bet one chip on every square, so every round wins.
    fn cover_table(session: &mut GameSession<Memory>) {
        for symbol in Symbol::ALL {
            session.place_bet(symbol).unwrap();
        }
    }

    #[test]
    fn test_win_pays_per_matching_die() {
        let seed = seed_rolling(RoundOutcome([Crown, Crown, Anchor]));
        let mut session = session_from(seed, TableConfig::default());
        session.select_chip(10).unwrap();
        session.place_bet(Crown).unwrap();
        let round = session.roll().unwrap();

        assert_eq!(round.summary.winnings, 20);
        assert_eq!(round.settlement.per_symbol_win.get(Crown), 20);
        assert_eq!(session.balance(), 110);
        assert!(session.bets().is_empty());
        assert_eq!(session.progression().stats.net_profit, 20);
        assert_eq!(session.progression().stats.biggest_win, 20);
        assert!(session.achievements().is_unlocked(AchievementId::FirstWin));
    }

    #[test]
    fn test_unmatched_wager_is_forfeited() {
        let seed = find_seed(1, |outcome| outcome.count(Spade) == 0);
        let mut session = session_from(seed, TableConfig::default());
        session.select_chip(5).unwrap();
        session.place_bet(Spade).unwrap();
        let round = session.roll().unwrap();

        assert_eq!(round.summary.winnings, 0);
        assert_eq!(session.balance(), 95);
        assert!(session.bets().is_empty());
        assert_eq!(session.progression().stats.net_profit, -5);
        assert!(round
            .notices
            .iter()
            .any(|n| matches!(n, Notice::RoundLost { .. })));
    }

    #[test]
    fn test_bonus_activated_this_round_pays_this_round() {
        let config = TableConfig {
            initial_bonus_countdown: 1,
            ..TableConfig::default()
        };
        let seed = find_seed(1, |outcome| outcome.count(Heart) == 1);
        let mut session = session_from(seed, config);
        session.select_chip(10).unwrap();
        session.place_bet(Heart).unwrap();
        let round = session.roll().unwrap();

        let multiplier = round.settlement.bonus_triggered.unwrap();
        assert_eq!(round.settlement.bonus_applied, Some(multiplier));
        assert_eq!(round.summary.winnings, 10 * multiplier as u64);
        assert_eq!(round.summary.bonus_multiplier, Some(multiplier));
        assert_eq!(session.progression().bonuses_triggered, 1);
        assert!(!session.progression().bonus.active);
        assert!(round.notices.contains(&Notice::BonusTriggered { multiplier }));
        assert!(round.notices.contains(&Notice::BonusApplied { multiplier }));
    }

    #[test]
    fn test_bonus_waits_for_a_winning_round() {
        let config = TableConfig {
            initial_bonus_countdown: 1,
            ..TableConfig::default()
        };
        let seed = find_seed(1, |outcome| outcome.count(Heart) == 0);
        let mut session = session_from(seed, config);
        session.place_bet(Heart).unwrap();
        let round = session.roll().unwrap();

        assert!(round.settlement.bonus_triggered.is_some());
        assert_eq!(round.settlement.bonus_applied, None);
        assert!(session.progression().bonus.active);

        // Covering the table guarantees the next round wins and consumes it.
        cover_table(&mut session);
        let round = session.roll().unwrap();
        let multiplier = round.settlement.bonus_applied.unwrap();
        assert_eq!(
            round.summary.winnings,
            round.settlement.base_winnings * multiplier as u64
        );
        assert!(!session.progression().bonus.active);
    }

    #[test]
    fn test_streak_and_history() {
        let seed = find_seed(4, |outcome| outcome.count(Crown) == 0);
        let mut session = session_from(seed, TableConfig::default());
        for _ in 0..3 {
            cover_table(&mut session);
            session.roll().unwrap();
        }
        assert_eq!(session.progression().streak.map(|s| s.wins()), Some(3));

        session.place_bet(Crown).unwrap();
        session.roll().unwrap();
        let streak = session.progression().streak.unwrap();
        assert_eq!(streak.kind, StreakKind::Lose);
        assert_eq!(streak.length, 1);

        for _ in 0..7 {
            session.place_bet(Crown).unwrap();
            session.roll().unwrap();
        }
        let history = &session.progression().history;
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let rounds: Vec<u64> = history.iter().map(|s| s.round).collect();
        assert_eq!(rounds, (2..=11).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_history_receipts_verify() {
        let mut session = session(11);
        for _ in 0..5 {
            session.place_bet(Diamond).unwrap();
            session.roll().unwrap();
        }
        for entry in session.progression().history.iter() {
            let receipt = crown_anchor_types::crown::encode_receipt(entry);
            let decoded = decode_receipt(&receipt).unwrap();
            assert!(dice::verify(session.seed(), &decoded));
        }
    }

    #[test]
    fn test_comeback_and_perfect_game() {
        let config = TableConfig {
            starting_balance: 12,
            ..TableConfig::default()
        };
        let mut session = session_from(SessionSeed([4; 32]), config);
        cover_table(&mut session);
        assert_eq!(session.balance(), 6);
        let round = session.roll().unwrap();

        let unlocked: Vec<AchievementId> = round
            .notices
            .iter()
            .filter_map(|n| match n {
                Notice::AchievementUnlocked(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert!(unlocked.contains(&AchievementId::FirstWin));
        assert!(unlocked.contains(&AchievementId::Comeback));
        assert!(unlocked.contains(&AchievementId::PerfectGame));
    }

    #[test]
    fn test_royal_flush() {
        let seed = find_seed(1, RoundOutcome::is_triple);
        let mut session = session_from(seed, TableConfig::default());
        session.place_bet(Crown).unwrap();
        session.roll().unwrap();
        assert!(session.achievements().is_unlocked(AchievementId::RoyalFlush));
    }

    #[test]
    fn test_repeat_last_bet_after_roll() {
        let mut session = session(5);
        session.select_chip(5).unwrap();
        session.place_bet(Club).unwrap();
        session.place_bet(Heart).unwrap();
        session.roll().unwrap();

        let balance = session.balance();
        session.repeat_last_bet().unwrap();
        assert_eq!(session.bets().get(Club), 5);
        assert_eq!(session.bets().get(Heart), 5);
        assert_eq!(session.balance(), balance - 10);
    }

    #[test]
    fn test_repeat_last_bet_insufficient_balance() {
        let config = TableConfig {
            starting_balance: 30,
            ..TableConfig::default()
        };
        let seed = find_seed(1, |outcome| outcome.count(Anchor) == 0);
        let mut session = session_from(seed, config);
        session.select_chip(25).unwrap();
        session.place_bet(Anchor).unwrap();
        session.roll().unwrap();
        assert_eq!(session.balance(), 5);

        let response = session.dispatch(Intent::RepeatLastBet);
        assert_eq!(response.error.as_deref(), Some("insufficientBalance"));
        assert_eq!(response.balance, 5);
        assert!(response.bets.is_empty());
    }

    #[test]
    fn test_tournament_champion() {
        let mut session = session(21);
        assert_eq!(
            session.start_tournament(),
            Err(GameError::TournamentNotJoined)
        );
        session.join_tournament().unwrap();
        assert_eq!(session.balance(), 50);
        assert_eq!(session.mode(), GameMode::Tournament);
        assert_eq!(
            session.join_tournament(),
            Err(GameError::TournamentInProgress)
        );
        session.start_tournament().unwrap();

        let mut updates = Vec::new();
        for _ in 0..3 {
            cover_table(&mut session);
            let round = session.roll().unwrap();
            updates.extend(round.notices.into_iter().filter_map(|n| match n {
                Notice::Tournament(update) => Some(update),
                _ => None,
            }));
        }
        assert_eq!(
            updates,
            vec![
                TournamentUpdate::Advanced {
                    round: 2,
                    players_left: 4
                },
                TournamentUpdate::Advanced {
                    round: 3,
                    players_left: 2
                },
                TournamentUpdate::Champion { prize: 1_000 },
            ]
        );
        assert!(session
            .achievements()
            .is_unlocked(AchievementId::TournamentChampion));
        assert!(session.balance() >= 1_000);
        assert!(!session.tournament().unwrap().active);
    }

    #[test]
    fn test_tournament_elimination() {
        let config = TableConfig {
            starting_balance: 200,
            ..TableConfig::default()
        };
        let seed = find_seed(1, |outcome| outcome.count(Crown) == 0);
        let mut session = session_from(seed, config);
        session.join_tournament().unwrap();
        session.place_bet(Crown).unwrap();
        let round = session.roll().unwrap();
        assert!(round
            .notices
            .contains(&Notice::Tournament(TournamentUpdate::Eliminated)));
        assert!(!session.tournament().unwrap().active);

        // A new bracket can be entered once eliminated.
        session.join_tournament().unwrap();
    }

    #[test]
    fn test_tournament_ignored_outside_tournament_mode() {
        let mut session = session(9);
        session.join_tournament().unwrap();
        session.switch_mode(GameMode::Single);
        cover_table(&mut session);
        session.roll().unwrap();
        assert_eq!(session.tournament().unwrap().round, 1);
    }

    #[test]
    fn test_game_over() {
        let config = TableConfig {
            starting_balance: 1,
            ..TableConfig::default()
        };
        let seed = find_seed(1, |outcome| outcome.count(Crown) == 0);
        let mut session = session_from(seed, config);
        session.place_bet(Crown).unwrap();
        let response = session.dispatch(Intent::Roll);
        let last = response.messages.last().unwrap();
        assert_eq!(last.severity, Severity::Lose);
        assert!(last.text.starts_with("Game Over"));

        let response = session.dispatch(Intent::PlaceBet { symbol: Crown });
        assert_eq!(response.error.as_deref(), Some("insufficientBalance"));
    }

    #[test]
    fn test_session_survives_reload() {
        let mut session = session(33);
        session.select_chip(5).unwrap();
        for _ in 0..4 {
            session.place_bet(Spade).unwrap();
            session.roll().unwrap();
        }
        session.place_bet(Anchor).unwrap();
        let snapshot = session.snapshot();

        let store: Memory = session.store().clone();
        let mut restored =
            GameSession::load_with_seed(store, TableConfig::default(), SessionSeed([0; 32]));
        assert_eq!(restored.balance(), snapshot.balance);
        assert_eq!(restored.bets(), &snapshot.bets);
        assert_eq!(restored.round(), 4);
        assert_eq!(restored.progression().history, snapshot.history);
        assert_eq!(restored.progression().stats, snapshot.stats);
        assert_eq!(restored.achievements(), &snapshot.achievements);

        // The restored session continues the same dice sequence.
        let round = restored.roll().unwrap();
        assert_eq!(round.summary.round, 5);
        assert!(dice::verify(session.seed(), &round.summary));
    }

    #[test]
    fn test_stats_record_outlives_session_record() {
        let mut session = session(2);
        session.place_bet(Crown).unwrap();
        session.roll().unwrap();

        let mut store: Memory = session.store().clone();
        store.delete(persistence::SESSION_KEY);
        let restored =
            GameSession::load_with_seed(store, TableConfig::default(), SessionSeed([0; 32]));
        assert_eq!(restored.balance(), 100);
        assert_eq!(restored.progression().stats.games_played, 1);
        assert_eq!(restored.achievements(), session.achievements());
    }

    #[test]
    fn test_limits_flow() {
        let mut session = session(1);
        let response = session.dispatch(Intent::SetLimits {
            limits: crown_anchor_types::crown::TableLimits {
                min_bet: 1,
                max_bet: 10,
                table_limit: 30,
            },
        });
        assert!(response.error.is_none());
        session.select_chip(10).unwrap();
        session.place_bet(Crown).unwrap();
        assert!(matches!(
            session.place_bet(Crown),
            Err(GameError::LimitExceeded { .. })
        ));
        session.place_bet(Anchor).unwrap();
        session.place_bet(Heart).unwrap();
        assert!(matches!(
            session.place_bet(Diamond),
            Err(GameError::LimitExceeded { .. })
        ));
        assert_eq!(session.bets().total(), 30);
        assert_eq!(session.balance() + session.bets().total(), 100);
    }
}
