//! Balance and per-square wagers.
//!
//! Until a roll settles, `balance + bets.total()` never changes: placing moves
//! money from the balance onto a square and clearing moves it back.

use super::GameError;
use crown_anchor_types::crown::{Bets, LimitKind, Symbol, TableLimits, SQUARES};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetLedger {
    balance: u64,
    bets: Bets,
    limits: TableLimits,
}

impl BetLedger {
    pub fn new(balance: u64, limits: TableLimits) -> Self {
        Self::from_parts(balance, Bets::default(), limits)
    }

    pub fn from_parts(balance: u64, bets: Bets, limits: TableLimits) -> Self {
        Self {
            balance,
            bets,
            limits,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bets(&self) -> &Bets {
        &self.bets
    }

    pub fn limits(&self) -> &TableLimits {
        &self.limits
    }

    /// Move `chip` from the balance onto `symbol`.
    ///
    /// Returns the new wager on the square.
    pub fn place_bet(&mut self, symbol: Symbol, chip: u64) -> Result<u64, GameError> {
        if chip == 0 {
            return Err(GameError::InvalidChip(chip));
        }
        if self.balance < chip {
            return Err(GameError::InsufficientBalance {
                needed: chip,
                available: self.balance,
            });
        }
        let amount = self.bets[symbol].saturating_add(chip);
        if amount > self.limits.max_bet {
            return Err(GameError::LimitExceeded {
                kind: LimitKind::Square,
                limit: self.limits.max_bet,
            });
        }
        if self.bets.total().saturating_add(chip) > self.limits.table_limit {
            return Err(GameError::LimitExceeded {
                kind: LimitKind::Table,
                limit: self.limits.table_limit,
            });
        }

        self.balance -= chip;
        self.bets[symbol] = amount;
        debug!(%symbol, chip, amount, balance = self.balance, "bet placed");
        Ok(amount)
    }

    /// Refund every wager. Returns the amount refunded.
    pub fn clear_bets(&mut self) -> u64 {
        let refunded = self.bets.total();
        self.balance = self.balance.saturating_add(refunded);
        self.bets.clear();
        refunded
    }

    /// Replace the current wagers with `last`.
    ///
    /// The balance check is made against the balance before the current
    /// wagers are refunded.
    pub fn repeat_last_bet(&mut self, last: Option<&Bets>) -> Result<(), GameError> {
        let last = match last {
            Some(last) if !last.is_empty() => last,
            _ => return Err(GameError::NoPriorBet),
        };
        let cost = last.total();
        if self.balance < cost {
            return Err(GameError::InsufficientBalance {
                needed: cost,
                available: self.balance,
            });
        }
        check_limits(&self.limits, last)?;

        self.clear_bets();
        for (symbol, amount) in last.placed() {
            self.bets[symbol] = amount;
            self.balance -= amount;
        }
        debug!(cost, balance = self.balance, "last bet repeated");
        Ok(())
    }

    /// Spread the balance over all six squares in `chip` increments.
    ///
    /// Each square is capped at `min(max_bet, balance / 6)`, computed from
    /// the balance before current wagers are refunded. Increments that would
    /// pass the cap, the balance or the table limit are dropped, so a square
    /// may end up empty. Returns true when every square received a wager.
    pub fn bet_max(&mut self, chip: u64) -> Result<bool, GameError> {
        if chip == 0 {
            return Err(GameError::InvalidChip(chip));
        }
        let cap = self.limits.max_bet.min(self.balance / SQUARES as u64);
        if cap < self.limits.min_bet {
            return Err(GameError::InsufficientBalance {
                needed: self.limits.min_bet.saturating_mul(SQUARES as u64),
                available: self.balance,
            });
        }

        self.clear_bets();
        for symbol in Symbol::ALL {
            while self.bets[symbol].saturating_add(chip) <= cap
                && self.balance >= chip
                && self.bets.total().saturating_add(chip) <= self.limits.table_limit
            {
                self.bets[symbol] += chip;
                self.balance -= chip;
            }
        }
        debug!(cap, chip, total = self.bets.total(), "max bet placed");
        Ok(self.bets.placed().count() == SQUARES)
    }

    /// Replace the table limits. Current wagers must fit the new limits.
    pub fn set_limits(&mut self, limits: TableLimits) -> Result<(), GameError> {
        if !limits.is_valid() {
            return Err(GameError::InvalidLimits);
        }
        check_limits(&limits, &self.bets)?;
        self.limits = limits;
        Ok(())
    }

    /// Take a fee out of the balance.
    pub fn debit(&mut self, amount: u64) -> Result<(), GameError> {
        if self.balance < amount {
            return Err(GameError::InsufficientBalance {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub(crate) fn bets_mut(&mut self) -> &mut Bets {
        &mut self.bets
    }
}

fn check_limits(limits: &TableLimits, bets: &Bets) -> Result<(), GameError> {
    match limits.breach(bets) {
        Some(kind) => Err(GameError::LimitExceeded {
            kind,
            limit: limits.limit(kind),
        }),
        None => Ok(()),
    }
}
