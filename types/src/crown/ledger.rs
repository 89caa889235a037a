use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::{Symbol, DEFAULT_MAX_BET, DEFAULT_MIN_BET, DEFAULT_TABLE_LIMIT, SQUARES};

/// Amount wagered on each square. All six squares are always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BetsRecord", into = "BetsRecord")]
pub struct Bets([u64; SQUARES]);

impl Bets {
    pub fn get(&self, symbol: Symbol) -> u64 {
        self.0[symbol.index()]
    }

    pub fn set(&mut self, symbol: Symbol, amount: u64) {
        self.0[symbol.index()] = amount;
    }

    /// Sum of all wagers, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |sum, &a| sum.saturating_add(a))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&a| a == 0)
    }

    pub fn clear(&mut self) {
        self.0 = [0; SQUARES];
    }

    /// Squares carrying a non-zero wager, in table order.
    pub fn placed(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        Symbol::ALL
            .into_iter()
            .map(|s| (s, self.get(s)))
            .filter(|&(_, amount)| amount > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        Symbol::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    /// Largest wager on any single square.
    pub fn largest(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl Index<Symbol> for Bets {
    type Output = u64;

    fn index(&self, symbol: Symbol) -> &u64 {
        &self.0[symbol.index()]
    }
}

impl IndexMut<Symbol> for Bets {
    fn index_mut(&mut self, symbol: Symbol) -> &mut u64 {
        &mut self.0[symbol.index()]
    }
}

impl FromIterator<(Symbol, u64)> for Bets {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut bets = Bets::default();
        for (symbol, amount) in iter {
            bets[symbol] = bets[symbol].saturating_add(amount);
        }
        bets
    }
}

/// Stored shape of [`Bets`]: one key per symbol, missing keys read as zero.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct BetsRecord {
    crown: u64,
    anchor: u64,
    heart: u64,
    diamond: u64,
    club: u64,
    spade: u64,
}

impl From<BetsRecord> for Bets {
    fn from(r: BetsRecord) -> Self {
        Bets([r.crown, r.anchor, r.heart, r.diamond, r.club, r.spade])
    }
}

impl From<Bets> for BetsRecord {
    fn from(b: Bets) -> Self {
        let [crown, anchor, heart, diamond, club, spade] = b.0;
        BetsRecord {
            crown,
            anchor,
            heart,
            diamond,
            club,
            spade,
        }
    }
}

/// Wager limits for the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableLimits {
    pub min_bet: u64,
    pub max_bet: u64,
    pub table_limit: u64,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            min_bet: DEFAULT_MIN_BET,
            max_bet: DEFAULT_MAX_BET,
            table_limit: DEFAULT_TABLE_LIMIT,
        }
    }
}

impl TableLimits {
    /// Limits are usable when `1 <= min_bet <= max_bet <= table_limit`.
    pub fn is_valid(&self) -> bool {
        self.min_bet >= 1 && self.min_bet <= self.max_bet && self.max_bet <= self.table_limit
    }

    /// First limit a full set of bets runs into, if any.
    pub fn breach(&self, bets: &Bets) -> Option<LimitKind> {
        if bets.largest() > self.max_bet {
            Some(LimitKind::Square)
        } else if bets.total() > self.table_limit {
            Some(LimitKind::Table)
        } else {
            None
        }
    }

    pub fn limit(&self, kind: LimitKind) -> u64 {
        match kind {
            LimitKind::Square => self.max_bet,
            LimitKind::Table => self.table_limit,
        }
    }
}

/// Which limit a rejected wager ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LimitKind {
    /// Per-square maximum.
    Square,
    /// Combined maximum across all squares.
    Table,
}
