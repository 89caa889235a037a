//! Locally simulated knockout tournament.
//!
//! There are no opponents: every winning round in tournament mode counts as a
//! won match, every losing round as an elimination.

use super::{BetLedger, GameError};
use crown_anchor_types::crown::{Tournament, TOURNAMENT_PLAYERS, TOURNAMENT_ROUNDS};
use rand::Rng;
use tracing::info;

/// What a settled round did to the tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentUpdate {
    Advanced { round: u32, players_left: u32 },
    Champion { prize: u64 },
    Eliminated,
}

/// Pay the entry fee and take a seat in a new bracket.
pub fn join<R: Rng + ?Sized>(
    ledger: &mut BetLedger,
    current: Option<&Tournament>,
    entry_fee: u64,
    prize_pool: u64,
    rng: &mut R,
) -> Result<Tournament, GameError> {
    if current.is_some_and(|t| t.active) {
        return Err(GameError::TournamentInProgress);
    }
    ledger.debit(entry_fee)?;
    let seat = rng.gen_range(1..=TOURNAMENT_PLAYERS);
    info!(seat, entry_fee, prize_pool, "joined tournament");
    Ok(Tournament::new(prize_pool, seat))
}

pub fn start(tournament: Option<&mut Tournament>) -> Result<(), GameError> {
    match tournament {
        Some(t) if t.active => {
            t.started = true;
            info!(stage = t.stage(), "tournament started");
            Ok(())
        }
        _ => Err(GameError::TournamentNotJoined),
    }
}

/// Advance or eliminate after a settled round. Inactive tournaments are left
/// alone. The caller credits the prize on [`TournamentUpdate::Champion`].
pub fn record_result(tournament: &mut Tournament, won: bool) -> Option<TournamentUpdate> {
    if !tournament.active {
        return None;
    }
    if !won {
        tournament.active = false;
        info!(round = tournament.round, "eliminated from tournament");
        return Some(TournamentUpdate::Eliminated);
    }

    tournament.round += 1;
    tournament.players_left = (tournament.players_left / 2).max(1);
    if tournament.round > TOURNAMENT_ROUNDS {
        tournament.active = false;
        info!(prize = tournament.prize_pool, "tournament won");
        return Some(TournamentUpdate::Champion {
            prize: tournament.prize_pool,
        });
    }
    Some(TournamentUpdate::Advanced {
        round: tournament.round,
        players_left: tournament.players_left,
    })
}
