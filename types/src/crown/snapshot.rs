use commonware_utils::{from_hex, hex};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{
    AchievementSet, Bets, BonusState, GameMode, History, Room, Stats, Streak, TableLimits,
    Tournament, STARTING_BALANCE,
};

/// Secret seed from which every round's dice are derived.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SessionSeed(pub [u8; 32]);

impl SessionSeed {
    pub fn from_hex(value: &str) -> Option<Self> {
        let bytes = from_hex(value)?;
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex(&self.0)
    }
}

impl fmt::Debug for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the seed itself.
        f.write_str("SessionSeed(..)")
    }
}

impl Serialize for SessionSeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SessionSeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_hex(&value).ok_or_else(|| de::Error::custom("seed must be 32 hex-encoded bytes"))
    }
}

/// Presentation preferences persisted with the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub sound_enabled: bool,
    pub dark_mode: bool,
    pub selected_theme: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            dark_mode: false,
            selected_theme: None,
        }
    }
}

fn default_balance() -> u64 {
    STARTING_BALANCE
}

fn default_chip() -> u64 {
    1
}

/// Persisted session record. Every field falls back to its default when
/// missing, so older records still load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default = "default_balance")]
    pub balance: u64,
    #[serde(default)]
    pub bets: Bets,
    #[serde(default)]
    pub limits: TableLimits,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub achievements: AchievementSet,
    #[serde(default)]
    pub settings: Settings,
    /// Milliseconds since the unix epoch at save time.
    #[serde(default)]
    pub timestamp: u64,

    #[serde(default = "default_chip")]
    pub selected_chip: u64,
    #[serde(default)]
    pub last_bets: Option<Bets>,
    #[serde(default)]
    pub streak: Option<Streak>,
    #[serde(default)]
    pub bonus: BonusState,
    #[serde(default)]
    pub bonuses_triggered: u32,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub tournament: Option<Tournament>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub seed: Option<SessionSeed>,
    /// Rounds rolled so far with `seed`.
    #[serde(default)]
    pub round: u64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            bets: Bets::default(),
            limits: TableLimits::default(),
            stats: Stats::default(),
            achievements: AchievementSet::default(),
            settings: Settings::default(),
            timestamp: 0,
            selected_chip: default_chip(),
            last_bets: None,
            streak: None,
            bonus: BonusState::default(),
            bonuses_triggered: 0,
            history: History::default(),
            mode: GameMode::default(),
            tournament: None,
            room: None,
            seed: None,
            round: 0,
        }
    }
}
