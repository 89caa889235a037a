//! Persistence gateway.
//!
//! The session is written as a handful of JSON records. Missing records fall
//! back to defaults; unreadable ones are logged, removed and replaced by
//! defaults. Nothing here ever fails the caller.

use crate::{config::TableConfig, StorageError, Store};
use crown_anchor_types::crown::{AchievementSet, BonusState, SessionSnapshot, Stats};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Full session record.
pub const SESSION_KEY: &str = "crownAnchorGameCompressed";
/// Cumulative statistics, kept apart so they survive a session reset.
pub const STATS_KEY: &str = "crownAnchorStats";
/// Achievement unlocks, kept apart so they survive a session reset.
pub const ACHIEVEMENTS_KEY: &str = "crownAnchorAchievements";
/// Selected theme, as a bare string.
pub const THEME_KEY: &str = "crownAnchorTheme";
/// Dark mode preference, as `"true"` or `"false"`.
pub const DARK_MODE_KEY: &str = "crownAnchorDarkMode";

fn read<T: DeserializeOwned>(store: &impl Store, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Read a JSON record, dropping it if it cannot be parsed.
fn recover<T: DeserializeOwned>(store: &mut impl Store, key: &str) -> Option<T> {
    match read(store, key) {
        Ok(value) => value,
        Err(e) => {
            warn!("discarding unreadable record: {}", e);
            store.delete(key);
            None
        }
    }
}

fn write<T: Serialize>(store: &mut impl Store, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.insert(key, raw),
        Err(e) => warn!(key, "failed to serialize record: {:?}", e),
    }
}

/// Snapshot for a session that has never been saved.
pub fn fresh(config: &TableConfig) -> SessionSnapshot {
    SessionSnapshot {
        balance: config.starting_balance,
        limits: config.limits,
        bonus: BonusState {
            games_until_bonus: config.initial_bonus_countdown,
            ..BonusState::default()
        },
        ..SessionSnapshot::default()
    }
}

/// Load the session, layering the standalone records over the session
/// record: the stats record replaces the embedded stats, achievement records
/// are merged, and the scalar preferences win over embedded settings.
pub fn load(store: &mut impl Store, config: &TableConfig) -> SessionSnapshot {
    let mut snapshot = match recover::<SessionSnapshot>(store, SESSION_KEY) {
        Some(snapshot) => snapshot,
        None => {
            debug!("no saved session, starting fresh");
            fresh(config)
        }
    };
    if let Some(stats) = recover::<Stats>(store, STATS_KEY) {
        snapshot.stats = stats;
    }
    if let Some(achievements) = recover::<AchievementSet>(store, ACHIEVEMENTS_KEY) {
        snapshot.achievements.merge(&achievements);
    }
    if let Some(theme) = store.get(THEME_KEY) {
        snapshot.settings.selected_theme = Some(theme);
    }
    if let Some(dark_mode) = store.get(DARK_MODE_KEY) {
        snapshot.settings.dark_mode = dark_mode.trim() == "true";
    }
    snapshot
}

/// Write every record for `snapshot`.
pub fn save(store: &mut impl Store, snapshot: &SessionSnapshot) {
    write(store, SESSION_KEY, snapshot);
    write(store, STATS_KEY, &snapshot.stats);
    write(store, ACHIEVEMENTS_KEY, &snapshot.achievements);
    match &snapshot.settings.selected_theme {
        Some(theme) => store.insert(THEME_KEY, theme.clone()),
        None => store.delete(THEME_KEY),
    }
    store.insert(DARK_MODE_KEY, snapshot.settings.dark_mode.to_string());
}
