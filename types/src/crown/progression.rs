use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{RoundOutcome, HISTORY_CAPACITY, INITIAL_BONUS_COUNTDOWN, BONUS_MULTIPLIER_MIN};

/// Cumulative statistics. Counters only grow, except `net_profit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub games_played: u64,
    pub games_won: u64,
    pub biggest_win: u64,
    pub total_wagered: u64,
    pub net_profit: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Win,
    Lose,
}

/// Run of consecutive rounds with the same result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub kind: StreakKind,
    pub length: u32,
}

impl Streak {
    pub fn new(kind: StreakKind) -> Self {
        Self { kind, length: 1 }
    }

    /// Current win streak length (zero while losing).
    pub fn wins(&self) -> u32 {
        match self.kind {
            StreakKind::Win => self.length,
            StreakKind::Lose => 0,
        }
    }
}

/// Bonus round countdown and pending multiplier.
///
/// `multiplier` only means something while `active` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusState {
    pub active: bool,
    pub multiplier: u8,
    pub games_until_bonus: u32,
}

impl Default for BonusState {
    fn default() -> Self {
        Self {
            active: false,
            multiplier: BONUS_MULTIPLIER_MIN,
            games_until_bonus: INITIAL_BONUS_COUNTDOWN,
        }
    }
}

/// One settled round, as kept in the history and encoded into receipts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    /// Round number within the session, used to re-derive the dice.
    pub round: u64,
    #[serde(rename = "dice")]
    pub outcome: RoundOutcome,
    pub wagered: u64,
    pub winnings: u64,
    /// Multiplier applied to this round's winnings, if a bonus was consumed.
    #[serde(default)]
    pub bonus_multiplier: Option<u8>,
    /// Milliseconds since the unix epoch.
    #[serde(rename = "timestamp", default)]
    pub timestamp_ms: u64,
}

impl RoundSummary {
    pub fn won(&self) -> bool {
        self.winnings > 0
    }
}

impl Write for RoundSummary {
    fn write(&self, writer: &mut impl BufMut) {
        self.round.write(writer);
        self.outcome.write(writer);
        self.wagered.write(writer);
        self.winnings.write(writer);
        self.bonus_multiplier.write(writer);
        self.timestamp_ms.write(writer);
    }
}

impl Read for RoundSummary {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            round: u64::read(reader)?,
            outcome: RoundOutcome::read(reader)?,
            wagered: u64::read(reader)?,
            winnings: u64::read(reader)?,
            bonus_multiplier: Option::<u8>::read(reader)?,
            timestamp_ms: u64::read(reader)?,
        })
    }
}

impl EncodeSize for RoundSummary {
    fn encode_size(&self) -> usize {
        self.round.encode_size()
            + self.outcome.encode_size()
            + self.wagered.encode_size()
            + self.winnings.encode_size()
            + self.bonus_multiplier.encode_size()
            + self.timestamp_ms.encode_size()
    }
}

/// Most recent rounds, newest first, bounded to [`HISTORY_CAPACITY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RoundSummary>", into = "Vec<RoundSummary>")]
pub struct History(VecDeque<RoundSummary>);

impl History {
    /// Insert at the front, evicting the oldest entry past capacity.
    pub fn push(&mut self, summary: RoundSummary) {
        self.0.push_front(summary);
        self.0.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&RoundSummary> {
        self.0.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundSummary> {
        self.0.iter()
    }
}

impl From<Vec<RoundSummary>> for History {
    fn from(mut entries: Vec<RoundSummary>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self(entries.into())
    }
}

impl From<History> for Vec<RoundSummary> {
    fn from(history: History) -> Self {
        history.0.into()
    }
}

/// Everything the progression tracker owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progression {
    pub stats: Stats,
    pub streak: Option<Streak>,
    pub bonus: BonusState,
    pub bonuses_triggered: u32,
    pub history: History,
}
