use super::*;
use commonware_codec::{Encode, ReadExt};

fn summary(round: u64) -> RoundSummary {
    RoundSummary {
        round,
        outcome: RoundOutcome([Symbol::Crown, Symbol::Crown, Symbol::Anchor]),
        wagered: 10,
        winnings: 20,
        bonus_multiplier: None,
        timestamp_ms: 1_700_000_000_000 + round,
    }
}

#[test]
fn test_symbol_roundtrip() {
    for symbol in Symbol::ALL {
        let encoded = symbol.encode();
        let decoded = Symbol::read(&mut &encoded[..]).unwrap();
        assert_eq!(symbol, decoded);
    }
}

#[test]
fn test_symbol_rejects_unknown_tag() {
    let err = Symbol::read(&mut &[6u8][..]).unwrap_err();
    assert!(matches!(err, commonware_codec::Error::InvalidEnum(6)));
}

#[test]
fn test_outcome_counts() {
    let outcome = RoundOutcome([Symbol::Heart, Symbol::Spade, Symbol::Heart]);
    assert_eq!(outcome.count(Symbol::Heart), 2);
    assert_eq!(outcome.count(Symbol::Spade), 1);
    assert_eq!(outcome.count(Symbol::Crown), 0);
    assert!(!outcome.is_triple());
    assert!(RoundOutcome([Symbol::Club; 3]).is_triple());
}

#[test]
fn test_receipt_roundtrip() {
    let mut entry = summary(7);
    entry.bonus_multiplier = Some(3);
    let receipt = encode_receipt(&entry);
    assert_eq!(decode_receipt(&receipt).unwrap(), entry);
}

#[test]
fn test_receipt_rejects_garbage() {
    assert!(matches!(
        decode_receipt("not hex"),
        Err(ReceiptError::InvalidHex)
    ));
    let receipt = encode_receipt(&summary(1));
    assert!(matches!(
        decode_receipt(&receipt[..10]),
        Err(ReceiptError::Codec(_))
    ));
}

#[test]
fn test_history_is_bounded() {
    let mut history = History::default();
    for round in 1..=11 {
        history.push(summary(round));
    }
    assert_eq!(history.len(), HISTORY_CAPACITY);
    let rounds: Vec<u64> = history.iter().map(|s| s.round).collect();
    assert_eq!(rounds, (2..=11).rev().collect::<Vec<_>>());
    assert_eq!(history.latest().map(|s| s.round), Some(11));
    assert!(history.iter().all(|s| s.round != 1));
}

#[test]
fn test_bets_serialize_all_squares() {
    let mut bets = Bets::default();
    bets[Symbol::Diamond] = 15;
    let json = serde_json::to_value(bets).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "crown": 0, "anchor": 0, "heart": 0,
            "diamond": 15, "club": 0, "spade": 0
        })
    );

    let partial: Bets = serde_json::from_str(r#"{"spade": 4}"#).unwrap();
    assert_eq!(partial.get(Symbol::Spade), 4);
    assert_eq!(partial.total(), 4);
}

#[test]
fn test_limits() {
    let limits = TableLimits::default();
    assert!(limits.is_valid());
    assert!(!TableLimits {
        min_bet: 0,
        ..limits
    }
    .is_valid());
    assert!(!TableLimits {
        min_bet: 10,
        max_bet: 5,
        table_limit: 500
    }
    .is_valid());

    let bets: Bets = [(Symbol::Crown, 100), (Symbol::Anchor, 100)]
        .into_iter()
        .collect();
    assert_eq!(limits.breach(&bets), None);
    let narrow = TableLimits {
        max_bet: 50,
        ..limits
    };
    assert_eq!(narrow.breach(&bets), Some(LimitKind::Square));
    assert_eq!(narrow.limit(LimitKind::Square), 50);
    let low = TableLimits {
        table_limit: 150,
        ..limits
    };
    assert_eq!(low.breach(&bets), Some(LimitKind::Table));
    assert_eq!(low.limit(LimitKind::Table), 150);
}

#[test]
fn test_bets_total_saturates() {
    let bets: Bets = [(Symbol::Crown, u64::MAX), (Symbol::Anchor, 1)]
        .into_iter()
        .collect();
    assert_eq!(bets.total(), u64::MAX);
    assert_eq!(TableLimits::default().breach(&bets), Some(LimitKind::Square));

    let bets: Bets = [(Symbol::Heart, u64::MAX), (Symbol::Heart, 5)]
        .into_iter()
        .collect();
    assert_eq!(bets[Symbol::Heart], u64::MAX);
}

#[test]
fn test_achievement_set_unlock_once() {
    let mut set = AchievementSet::default();
    assert!(set.unlock(AchievementId::FirstWin));
    assert!(!set.unlock(AchievementId::FirstWin));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_achievement_set_storage_shape() {
    let mut set = AchievementSet::default();
    set.unlock(AchievementId::HotStreak);
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["streak5"]["unlocked"], true);
    assert_eq!(json["firstWin"]["unlocked"], false);
    assert_eq!(json.as_object().unwrap().len(), AchievementId::ALL.len());

    let loaded: AchievementSet = serde_json::from_str(
        r#"{"streak5":{"unlocked":true},"retired":{"unlocked":true},"bigWin":{}}"#,
    )
    .unwrap();
    assert_eq!(loaded, set);
}

#[test]
fn test_snapshot_defaults_for_missing_fields() {
    let snapshot: SessionSnapshot = serde_json::from_str(r#"{"bets":{"crown":5}}"#).unwrap();
    assert_eq!(snapshot.balance, STARTING_BALANCE);
    assert_eq!(snapshot.bets.get(Symbol::Crown), 5);
    assert_eq!(snapshot.limits, TableLimits::default());
    assert_eq!(snapshot.bonus.games_until_bonus, INITIAL_BONUS_COUNTDOWN);
    assert!(snapshot.settings.sound_enabled);
    assert_eq!(snapshot.selected_chip, 1);
}

#[test]
fn test_snapshot_keeps_zero_balance() {
    let snapshot: SessionSnapshot = serde_json::from_str(r#"{"balance":0}"#).unwrap();
    assert_eq!(snapshot.balance, 0);
}

#[test]
fn test_seed_hex() {
    let seed = SessionSeed([7u8; 32]);
    let json = serde_json::to_string(&seed).unwrap();
    let back: SessionSeed = serde_json::from_str(&json).unwrap();
    assert_eq!(seed, back);
    assert_eq!(format!("{seed:?}"), "SessionSeed(..)");
    assert!(SessionSeed::from_hex("abcd").is_none());
}

#[test]
fn test_tournament_stage() {
    let mut tournament = Tournament::new(TOURNAMENT_PRIZE_POOL, 3);
    assert_eq!(tournament.stage(), "Quarter Finals");
    tournament.round = 2;
    assert_eq!(tournament.stage(), "Semi Finals");
    tournament.round = 3;
    assert_eq!(tournament.stage(), "Final");
}
