//! Bonus round countdown.
//!
//! `Inactive --(countdown reaches 0)--> Active --(winning round)--> Inactive`.
//! A losing round leaves an active bonus in place.

use crown_anchor_types::crown::{
    BonusState, BONUS_COUNTDOWN_MAX, BONUS_COUNTDOWN_MIN, BONUS_MULTIPLIER_MAX,
    BONUS_MULTIPLIER_MIN,
};
use rand::Rng;
use tracing::info;

/// Count one round down. When the countdown runs out the bonus activates
/// with a fresh multiplier and countdown; the multiplier is returned.
pub fn tick<R: Rng + ?Sized>(bonus: &mut BonusState, rng: &mut R) -> Option<u8> {
    bonus.games_until_bonus = bonus.games_until_bonus.saturating_sub(1);
    if bonus.games_until_bonus > 0 {
        return None;
    }
    bonus.active = true;
    bonus.multiplier = rng.gen_range(BONUS_MULTIPLIER_MIN..=BONUS_MULTIPLIER_MAX);
    bonus.games_until_bonus = rng.gen_range(BONUS_COUNTDOWN_MIN..=BONUS_COUNTDOWN_MAX);
    info!(
        multiplier = bonus.multiplier,
        next = bonus.games_until_bonus,
        "bonus round activated"
    );
    Some(bonus.multiplier)
}

/// Apply an active bonus to `winnings`. Only a winning round consumes it.
///
/// Returns the final winnings and the multiplier used, if any.
pub fn apply(bonus: &mut BonusState, winnings: u64) -> (u64, Option<u8>) {
    if !bonus.active || winnings == 0 {
        return (winnings, None);
    }
    bonus.active = false;
    let multiplier = bonus.multiplier;
    (winnings.saturating_mul(multiplier as u64), Some(multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_tick_counts_down() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut bonus = BonusState::default();
        for remaining in (1..10).rev() {
            assert_eq!(tick(&mut bonus, &mut rng), None);
            assert_eq!(bonus.games_until_bonus, remaining);
            assert!(!bonus.active);
        }
        let multiplier = tick(&mut bonus, &mut rng).unwrap();
        assert!(bonus.active);
        assert!((BONUS_MULTIPLIER_MIN..=BONUS_MULTIPLIER_MAX).contains(&multiplier));
        assert!((BONUS_COUNTDOWN_MIN..=BONUS_COUNTDOWN_MAX).contains(&bonus.games_until_bonus));
    }

    #[test]
    fn test_tick_draws_cover_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut multipliers = [false; 5];
        for _ in 0..200 {
            let mut bonus = BonusState {
                games_until_bonus: 1,
                ..BonusState::default()
            };
            let m = tick(&mut bonus, &mut rng).unwrap();
            multipliers[m as usize] = true;
        }
        assert_eq!(multipliers, [false, false, true, true, true]);
    }

    #[test]
    fn test_apply_consumes_on_win() {
        let mut bonus = BonusState {
            active: true,
            multiplier: 3,
            games_until_bonus: 6,
        };
        assert_eq!(apply(&mut bonus, 20), (60, Some(3)));
        assert!(!bonus.active);
        assert_eq!(apply(&mut bonus, 20), (20, None));
    }

    #[test]
    fn test_apply_keeps_bonus_on_loss() {
        let mut bonus = BonusState {
            active: true,
            multiplier: 4,
            games_until_bonus: 6,
        };
        assert_eq!(apply(&mut bonus, 0), (0, None));
        assert!(bonus.active);
    }
}
