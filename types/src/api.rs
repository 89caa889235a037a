//! Request and response records exchanged with the presentation layer.

use serde::{Deserialize, Serialize};

use crate::crown::{
    AchievementId, AchievementInfo, Bets, GameMode, RoundSummary, Settlement, Symbol, TableLimits,
};

/// A user intent. Every intent is answered with a [`Response`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    SelectChip { value: u64 },
    PlaceBet { symbol: Symbol },
    ClearBets,
    Roll,
    RepeatLastBet,
    BetMax,
    SetLimits { limits: TableLimits },
    CreateRoom { name: String },
    JoinRoom { name: String, code: String },
    JoinTournament,
    StartTournament,
    SwitchMode { mode: GameMode },
    ResetStats,
    ToggleSound,
    ToggleDarkMode,
    SetTheme { theme: String },
    /// Show or hide a presentation panel. Carries no game state.
    TogglePanel { panel: Panel },
}

impl Intent {
    /// Whether handling the intent changes persisted state.
    pub fn mutates(&self) -> bool {
        !matches!(self, Intent::TogglePanel { .. })
    }
}

/// Panels the presentation layer can toggle from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Stats,
    Limits,
    Instructions,
}

/// Tone of a message, used by the caller to pick a style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Win,
    Lose,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Settled round, as returned from a roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub summary: RoundSummary,
    pub settlement: Settlement,
    /// Hex encoded receipt of `summary`.
    pub receipt: String,
}

/// Achievement newly unlocked by an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Unlocked {
    pub id: AchievementId,
    #[serde(flatten)]
    pub info: AchievementInfo,
}

impl From<AchievementId> for Unlocked {
    fn from(id: AchievementId) -> Self {
        Self {
            id,
            info: id.info(),
        }
    }
}

/// Everything the caller needs to re-render after an intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub balance: u64,
    pub bets: Bets,
    pub selected_chip: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundReport>,
    pub unlocked: Vec<Unlocked>,
    pub messages: Vec<Message>,
    /// Set when the intent was rejected. State is unchanged in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
