//! Typed notices produced by operations, and their user-facing text.

use super::{tournament::TournamentUpdate, GameError};
use crown_anchor_types::{
    api::{Message, Severity},
    crown::{AchievementId, Bets, GameMode, LimitKind, RoundOutcome, TableLimits},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    BetsCleared,
    LastBetRepeated,
    MaxBetPlaced,
    LimitsUpdated(TableLimits),
    RoundWon {
        outcome: RoundOutcome,
        winnings: u64,
        /// Winnings per square, before any bonus.
        wins: Bets,
    },
    RoundLost {
        outcome: RoundOutcome,
    },
    BonusTriggered {
        multiplier: u8,
    },
    BonusApplied {
        multiplier: u8,
    },
    AchievementUnlocked(AchievementId),
    Tournament(TournamentUpdate),
    TournamentJoined,
    TournamentStarted,
    RoomCreated {
        code: String,
    },
    RoomJoined {
        code: String,
    },
    ModeSwitched(GameMode),
    StatsReset,
    SoundToggled(bool),
    DarkModeToggled(bool),
    ThemeSelected(String),
    GameOver,
    Rejected(GameError),
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::RoundWon { .. }
            | Notice::BonusTriggered { .. }
            | Notice::BonusApplied { .. }
            | Notice::AchievementUnlocked(_)
            | Notice::TournamentJoined
            | Notice::TournamentStarted
            | Notice::RoomJoined { .. } => Severity::Win,
            Notice::Tournament(TournamentUpdate::Eliminated) => Severity::Lose,
            Notice::Tournament(_) => Severity::Win,
            Notice::RoundLost { .. } | Notice::GameOver | Notice::Rejected(_) => Severity::Lose,
            _ => Severity::Info,
        }
    }

    pub fn text(&self) -> String {
        match self {
            Notice::BetsCleared => "All bets cleared!".into(),
            Notice::LastBetRepeated => "Last bet repeated!".into(),
            Notice::MaxBetPlaced => "Maximum bet placed on all squares!".into(),
            Notice::LimitsUpdated(limits) => format!(
                "Limits set: ${}-${} per square, ${} table.",
                limits.min_bet, limits.max_bet, limits.table_limit
            ),
            Notice::RoundWon {
                outcome,
                winnings,
                wins,
            } => {
                let details = wins
                    .placed()
                    .map(|(symbol, amount)| {
                        format!("{} x{} = ${}", symbol.emoji(), outcome.count(symbol), amount)
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} - You won ${winnings}! ({details})", outcome.display())
            }
            Notice::RoundLost { outcome } => {
                format!("{} - No wins this time!", outcome.display())
            }
            Notice::BonusTriggered { multiplier } => {
                format!("🎉 BONUS ROUND! Next win gets {multiplier}x multiplier!")
            }
            Notice::BonusApplied { multiplier } => format!("Bonus {multiplier}x applied!"),
            Notice::AchievementUnlocked(id) => {
                let info = id.info();
                format!(
                    "🏆 Achievement Unlocked: {}! {} {}",
                    info.title, info.icon, info.description
                )
            }
            Notice::Tournament(TournamentUpdate::Advanced { round, .. }) => {
                format!("Advanced to round {round}!")
            }
            Notice::Tournament(TournamentUpdate::Champion { prize }) => {
                format!("🏆 TOURNAMENT CHAMPION! You won ${prize}!")
            }
            Notice::Tournament(TournamentUpdate::Eliminated) => {
                "Eliminated from tournament!".into()
            }
            Notice::TournamentJoined => {
                "Joined tournament! Click Start Tournament when ready.".into()
            }
            Notice::TournamentStarted => "Tournament started! Good luck!".into(),
            Notice::RoomCreated { code } => {
                format!("Room {code} created! Share this code with friends.")
            }
            Notice::RoomJoined { code } => format!("Joined room {code}!"),
            Notice::ModeSwitched(mode) => match mode {
                GameMode::Single => "Single player mode.".into(),
                GameMode::Multiplayer => "Multiplayer mode.".into(),
                GameMode::Tournament => "Tournament mode.".into(),
            },
            Notice::StatsReset => "Statistics reset!".into(),
            Notice::SoundToggled(on) => format!("Sound {}.", if *on { "on" } else { "off" }),
            Notice::DarkModeToggled(on) => {
                format!("Dark mode {}.", if *on { "on" } else { "off" })
            }
            Notice::ThemeSelected(theme) => format!("Theme set to {theme}."),
            Notice::GameOver => "Game Over! Reset to play again.".into(),
            Notice::Rejected(error) => rejection(error),
        }
    }

    pub fn message(&self) -> Message {
        Message::new(self.text(), self.severity())
    }
}

fn rejection(error: &GameError) -> String {
    match error {
        GameError::InsufficientBalance { needed, .. } => {
            format!("Insufficient balance! ${needed} needed.")
        }
        GameError::LimitExceeded {
            kind: LimitKind::Square,
            limit,
        } => format!("Maximum bet per square is ${limit}!"),
        GameError::LimitExceeded {
            kind: LimitKind::Table,
            limit,
        } => format!("Table limit is ${limit}!"),
        GameError::NoPriorBet => "No previous bet to repeat!".into(),
        GameError::NoBetsPlaced => "Place a bet first!".into(),
        GameError::InvalidChip(value) => format!("${value} is not a valid chip!"),
        GameError::InvalidLimits => {
            "Limits must satisfy 1 <= minimum <= maximum <= table limit!".into()
        }
        GameError::MissingPlayerName => "Please enter your name first!".into(),
        GameError::MissingRoomCode => "Please enter your name and room code!".into(),
        GameError::TournamentInProgress => "You are already in a tournament!".into(),
        GameError::TournamentNotJoined => "Join a tournament first!".into(),
    }
}
