use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unlockable achievements. Serialized under their storage keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "firstWin")]
    FirstWin,
    #[serde(rename = "bigWin")]
    BigWin,
    #[serde(rename = "streak5")]
    HotStreak,
    #[serde(rename = "streak10")]
    Unstoppable,
    #[serde(rename = "hundredGames")]
    Veteran,
    #[serde(rename = "allSymbols")]
    RoyalFlush,
    #[serde(rename = "bonusHunter")]
    BonusHunter,
    #[serde(rename = "highRoller")]
    HighRoller,
    #[serde(rename = "comeback")]
    Comeback,
    #[serde(rename = "perfectGame")]
    PerfectGame,
    #[serde(rename = "tournamentWinner")]
    TournamentChampion,
}

/// Static description of an achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AchievementInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl AchievementId {
    pub const ALL: [AchievementId; 11] = [
        AchievementId::FirstWin,
        AchievementId::BigWin,
        AchievementId::HotStreak,
        AchievementId::Unstoppable,
        AchievementId::Veteran,
        AchievementId::RoyalFlush,
        AchievementId::BonusHunter,
        AchievementId::HighRoller,
        AchievementId::Comeback,
        AchievementId::PerfectGame,
        AchievementId::TournamentChampion,
    ];

    /// Storage key of the achievement.
    pub fn key(self) -> &'static str {
        match self {
            AchievementId::FirstWin => "firstWin",
            AchievementId::BigWin => "bigWin",
            AchievementId::HotStreak => "streak5",
            AchievementId::Unstoppable => "streak10",
            AchievementId::Veteran => "hundredGames",
            AchievementId::RoyalFlush => "allSymbols",
            AchievementId::BonusHunter => "bonusHunter",
            AchievementId::HighRoller => "highRoller",
            AchievementId::Comeback => "comeback",
            AchievementId::PerfectGame => "perfectGame",
            AchievementId::TournamentChampion => "tournamentWinner",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn info(self) -> AchievementInfo {
        let (title, description, icon) = match self {
            AchievementId::FirstWin => ("First Victory", "Win your first game", "🎉"),
            AchievementId::BigWin => (
                "Big Winner",
                "Win $100 or more in a single round",
                "💰",
            ),
            AchievementId::HotStreak => ("Hot Streak", "Win 5 games in a row", "🔥"),
            AchievementId::Unstoppable => ("Unstoppable", "Win 10 games in a row", "⚡"),
            AchievementId::Veteran => ("Veteran Player", "Play 100 games", "🎮"),
            AchievementId::RoyalFlush => (
                "Royal Flush",
                "Get all three dice showing the same symbol",
                "👑",
            ),
            AchievementId::BonusHunter => ("Bonus Hunter", "Trigger 10 bonus rounds", "🎁"),
            AchievementId::HighRoller => ("High Roller", "Bet the maximum on all squares", "💎"),
            AchievementId::Comeback => ("Comeback Kid", "Win after having less than $10", "🚀"),
            AchievementId::PerfectGame => (
                "Perfect Game",
                "Win with all symbols showing matches",
                "⭐",
            ),
            AchievementId::TournamentChampion => ("Tournament Champion", "Win a tournament", "🏆"),
        };
        AchievementInfo {
            title,
            description,
            icon,
        }
    }
}

/// Stored shape of a single achievement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementRecord {
    pub unlocked: bool,
}

/// Unlocked achievements. Unlocking is monotonic: nothing ever relocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, AchievementRecord>",
    into = "BTreeMap<String, AchievementRecord>"
)]
pub struct AchievementSet {
    unlocked: BTreeSet<AchievementId>,
}

impl AchievementSet {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Returns true only on the first unlock of `id`.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        self.unlocked.insert(id)
    }

    /// Merge another set in, keeping everything unlocked in either.
    pub fn merge(&mut self, other: &AchievementSet) {
        self.unlocked.extend(other.unlocked.iter().copied());
    }

    pub fn unlocked(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}

impl From<BTreeMap<String, AchievementRecord>> for AchievementSet {
    fn from(records: BTreeMap<String, AchievementRecord>) -> Self {
        let unlocked = records
            .into_iter()
            .filter(|(_, record)| record.unlocked)
            .filter_map(|(key, _)| AchievementId::from_key(&key))
            .collect();
        Self { unlocked }
    }
}

impl From<AchievementSet> for BTreeMap<String, AchievementRecord> {
    fn from(set: AchievementSet) -> Self {
        AchievementId::ALL
            .into_iter()
            .map(|id| {
                (
                    id.key().to_string(),
                    AchievementRecord {
                        unlocked: set.is_unlocked(id),
                    },
                )
            })
            .collect()
    }
}
