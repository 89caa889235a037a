//! One game session threaded through every operation.
//!
//! Each public operation either succeeds and persists the session, or is
//! rejected with a [`GameError`] and leaves everything as it was.
//! [`GameSession::dispatch`] wraps the operations for callers that speak in
//! [`Intent`]s and never fails.

use super::{
    achievements::{self, RoundContext},
    dice, persistence,
    progression::{self, record_bonus_trigger, record_history, record_round},
    room, seed_commitment,
    settlement::settle,
    tournament::{self, TournamentUpdate},
    BetLedger, GameError, GameRng, Notice,
};
use crate::{config::TableConfig, Store};
use commonware_cryptography::{sha256::Sha256, Hasher};
use crown_anchor_types::{
    api::{Intent, Response, RoundReport, Unlocked},
    crown::{
        encode_receipt, AchievementId, AchievementSet, Bets, GameMode, Progression, Room,
        RoundSummary, SessionSeed, SessionSnapshot, Settings, Settlement, Symbol, TableLimits,
        Tournament,
    },
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// A settled round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub summary: RoundSummary,
    pub settlement: Settlement,
    pub notices: Vec<Notice>,
}

impl Round {
    pub fn receipt(&self) -> String {
        encode_receipt(&self.summary)
    }
}

pub struct GameSession<S: Store> {
    store: S,
    config: TableConfig,

    ledger: BetLedger,
    progression: Progression,
    achievements: AchievementSet,
    settings: Settings,
    selected_chip: u64,
    last_bets: Option<Bets>,
    mode: GameMode,
    tournament: Option<Tournament>,
    room: Option<Room>,

    seed: SessionSeed,
    round: u64,
    /// Draws that are not part of a round (room codes, tournament seats).
    side_rng: ChaCha20Rng,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn side_rng(seed: &SessionSeed, round: u64) -> ChaCha20Rng {
    let mut hasher = Sha256::new();
    hasher.update(b"side");
    hasher.update(&seed.0);
    hasher.update(&round.to_be_bytes());
    ChaCha20Rng::from_seed(hasher.finalize().0)
}

impl<S: Store> GameSession<S> {
    /// Restore the session saved in `store`, or start a new one with a
    /// random seed.
    pub fn load(store: S, config: TableConfig) -> Self {
        let seed = SessionSeed(rand::thread_rng().gen());
        Self::load_with_seed(store, config, seed)
    }

    /// Like [`GameSession::load`], but a new session uses `seed`. A session
    /// restored from `store` keeps its own seed.
    pub fn load_with_seed(mut store: S, config: TableConfig, seed: SessionSeed) -> Self {
        let snapshot = persistence::load(&mut store, &config);
        let seed = snapshot.seed.unwrap_or(seed);

        let mut limits = snapshot.limits;
        if !limits.is_valid() {
            warn!(?limits, "saved limits are invalid, using table defaults");
            limits = config.limits;
        }
        // Saved wagers must fit the limits, or the whole saved ledger is void.
        let (balance, bets) = match limits.breach(&snapshot.bets) {
            None => (snapshot.balance, snapshot.bets),
            Some(kind) => {
                warn!(
                    ?kind,
                    bets = ?snapshot.bets,
                    ?limits,
                    "saved bets break the table limits, resetting the ledger"
                );
                (config.starting_balance, Bets::default())
            }
        };
        let selected_chip = match snapshot.selected_chip {
            0 => config.chip_tiers[0],
            chip => chip,
        };

        Self {
            ledger: BetLedger::from_parts(balance, bets, limits),
            progression: Progression {
                stats: snapshot.stats,
                streak: snapshot.streak,
                bonus: snapshot.bonus,
                bonuses_triggered: snapshot.bonuses_triggered,
                history: snapshot.history,
            },
            achievements: snapshot.achievements,
            settings: snapshot.settings,
            selected_chip,
            last_bets: snapshot.last_bets,
            mode: snapshot.mode,
            tournament: snapshot.tournament,
            room: snapshot.room,
            side_rng: side_rng(&seed, snapshot.round),
            seed,
            round: snapshot.round,
            store,
            config,
        }
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn bets(&self) -> &Bets {
        self.ledger.bets()
    }

    pub fn limits(&self) -> &TableLimits {
        self.ledger.limits()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn selected_chip(&self) -> u64 {
        self.selected_chip
    }

    pub fn last_bets(&self) -> Option<&Bets> {
        self.last_bets.as_ref()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.tournament.as_ref()
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Rounds rolled so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn seed(&self) -> &SessionSeed {
        &self.seed
    }

    /// Published commitment to the session seed.
    pub fn commitment(&self) -> String {
        seed_commitment(&self.seed)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            balance: self.ledger.balance(),
            bets: *self.ledger.bets(),
            limits: *self.ledger.limits(),
            stats: self.progression.stats,
            achievements: self.achievements.clone(),
            settings: self.settings.clone(),
            timestamp: now_ms(),
            selected_chip: self.selected_chip,
            last_bets: self.last_bets,
            streak: self.progression.streak,
            bonus: self.progression.bonus,
            bonuses_triggered: self.progression.bonuses_triggered,
            history: self.progression.history.clone(),
            mode: self.mode,
            tournament: self.tournament,
            room: self.room.clone(),
            seed: Some(self.seed),
            round: self.round,
        }
    }

    fn persist(&mut self) {
        let snapshot = self.snapshot();
        persistence::save(&mut self.store, &snapshot);
    }

    fn commit<T>(&mut self, result: Result<T, GameError>) -> Result<T, GameError> {
        if result.is_ok() {
            self.persist();
        }
        result
    }

    fn unlock(&mut self, id: AchievementId, notices: &mut Vec<Notice>) {
        if achievements::unlock(&mut self.achievements, id) {
            notices.push(Notice::AchievementUnlocked(id));
        }
    }

    pub fn select_chip(&mut self, value: u64) -> Result<(), GameError> {
        if value == 0 {
            return Err(GameError::InvalidChip(value));
        }
        self.selected_chip = value;
        self.commit(Ok(()))
    }

    /// Place the selected chip on `symbol`. Returns the square's new wager.
    pub fn place_bet(&mut self, symbol: Symbol) -> Result<u64, GameError> {
        let result = self.ledger.place_bet(symbol, self.selected_chip);
        self.commit(result)
    }

    /// Refund every wager. Returns the amount refunded.
    pub fn clear_bets(&mut self) -> u64 {
        let refunded = self.ledger.clear_bets();
        self.persist();
        refunded
    }

    pub fn repeat_last_bet(&mut self) -> Result<(), GameError> {
        let result = self.ledger.repeat_last_bet(self.last_bets.as_ref());
        self.commit(result)
    }

    /// Spread the selected chip over every square. Filling all six squares
    /// earns the high roller achievement.
    pub fn bet_max(&mut self) -> Result<Vec<Notice>, GameError> {
        let filled_all = self.ledger.bet_max(self.selected_chip)?;
        let mut notices = vec![Notice::MaxBetPlaced];
        if filled_all {
            self.unlock(AchievementId::HighRoller, &mut notices);
        }
        self.commit(Ok(notices))
    }

    pub fn set_limits(&mut self, limits: TableLimits) -> Result<(), GameError> {
        let result = self.ledger.set_limits(limits);
        self.commit(result)
    }

    /// Roll the dice and resolve the round as one step.
    pub fn roll(&mut self) -> Result<Round, GameError> {
        let wagers = *self.ledger.bets();
        let wagered = wagers.total();
        if wagered == 0 {
            return Err(GameError::NoBetsPlaced);
        }
        self.last_bets = Some(wagers);
        self.round += 1;

        // Dice first, then bonus draws, from the same per-round stream.
        let mut rng = GameRng::new(&self.seed, self.round);
        let outcome = dice::roll(&mut rng);
        let settlement = settle(
            self.ledger.bets_mut(),
            &outcome,
            &mut self.progression.bonus,
            &mut rng,
        );
        let balance_before_credit = self.ledger.balance();
        let winnings = settlement.total_winnings;
        self.ledger.credit(winnings);

        let mut notices = Vec::new();
        if let Some(multiplier) = settlement.bonus_triggered {
            record_bonus_trigger(&mut self.progression);
            notices.push(Notice::BonusTriggered { multiplier });
        }
        record_round(&mut self.progression, winnings, wagered);
        let summary = RoundSummary {
            round: self.round,
            outcome,
            wagered,
            winnings,
            bonus_multiplier: settlement.bonus_applied,
            timestamp_ms: now_ms(),
        };
        record_history(&mut self.progression, summary.clone());

        if settlement.won() {
            notices.push(Notice::RoundWon {
                outcome,
                winnings,
                wins: settlement.per_symbol_win,
            });
        } else {
            notices.push(Notice::RoundLost { outcome });
        }
        if let Some(multiplier) = settlement.bonus_applied {
            notices.push(Notice::BonusApplied { multiplier });
        }

        if self.mode == GameMode::Tournament {
            if let Some(update) = self
                .tournament
                .as_mut()
                .and_then(|t| tournament::record_result(t, settlement.won()))
            {
                notices.push(Notice::Tournament(update));
                if let TournamentUpdate::Champion { prize } = update {
                    self.ledger.credit(prize);
                    self.unlock(AchievementId::TournamentChampion, &mut notices);
                }
            }
        }

        let ctx = RoundContext {
            stats: &self.progression.stats,
            streak: self.progression.streak,
            balance_before_credit,
            outcome: &outcome,
            wagers: &wagers,
            winnings,
            bonuses_triggered: self.progression.bonuses_triggered,
        };
        let unlocked = achievements::evaluate(&ctx, &mut self.achievements);
        notices.extend(unlocked.into_iter().map(Notice::AchievementUnlocked));

        if self.ledger.balance() == 0 && self.ledger.bets().is_empty() {
            notices.push(Notice::GameOver);
        }

        debug!(
            round = self.round,
            wagered,
            winnings,
            balance = self.ledger.balance(),
            "round complete"
        );
        self.persist();
        Ok(Round {
            summary,
            settlement,
            notices,
        })
    }

    pub fn create_room(&mut self, name: &str) -> Result<String, GameError> {
        let room = room::create(name, &mut self.side_rng)?;
        let code = room.code.clone();
        self.room = Some(room);
        self.mode = GameMode::Multiplayer;
        self.commit(Ok(code))
    }

    pub fn join_room(&mut self, name: &str, code: &str) -> Result<String, GameError> {
        let room = room::join(name, code)?;
        let code = room.code.clone();
        self.room = Some(room);
        self.mode = GameMode::Multiplayer;
        self.commit(Ok(code))
    }

    /// Pay the entry fee and switch to tournament mode.
    pub fn join_tournament(&mut self) -> Result<(), GameError> {
        let entry = tournament::join(
            &mut self.ledger,
            self.tournament.as_ref(),
            self.config.tournament_entry_fee,
            self.config.tournament_prize_pool,
            &mut self.side_rng,
        )?;
        self.tournament = Some(entry);
        self.mode = GameMode::Tournament;
        self.commit(Ok(()))
    }

    pub fn start_tournament(&mut self) -> Result<(), GameError> {
        let result = tournament::start(self.tournament.as_mut());
        self.commit(result)
    }

    pub fn switch_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.persist();
    }

    pub fn reset_stats(&mut self) {
        progression::reset_stats(&mut self.progression);
        self.persist();
    }

    /// Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.persist();
        self.settings.sound_enabled
    }

    /// Returns the new setting.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.persist();
        self.settings.dark_mode
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.settings.selected_theme = Some(theme.trim().to_string());
        self.persist();
    }

    fn apply(&mut self, intent: Intent) -> Result<(Vec<Notice>, Option<Round>), GameError> {
        let notices = match intent {
            Intent::SelectChip { value } => {
                self.select_chip(value)?;
                Vec::new()
            }
            Intent::PlaceBet { symbol } => {
                self.place_bet(symbol)?;
                Vec::new()
            }
            Intent::ClearBets => {
                self.clear_bets();
                vec![Notice::BetsCleared]
            }
            Intent::Roll => {
                let mut round = self.roll()?;
                let notices = std::mem::take(&mut round.notices);
                return Ok((notices, Some(round)));
            }
            Intent::RepeatLastBet => {
                self.repeat_last_bet()?;
                vec![Notice::LastBetRepeated]
            }
            Intent::BetMax => self.bet_max()?,
            Intent::SetLimits { limits } => {
                self.set_limits(limits)?;
                vec![Notice::LimitsUpdated(limits)]
            }
            Intent::CreateRoom { name } => {
                let code = self.create_room(&name)?;
                vec![Notice::RoomCreated { code }]
            }
            Intent::JoinRoom { name, code } => {
                let code = self.join_room(&name, &code)?;
                vec![Notice::RoomJoined { code }]
            }
            Intent::JoinTournament => {
                self.join_tournament()?;
                vec![Notice::TournamentJoined]
            }
            Intent::StartTournament => {
                self.start_tournament()?;
                vec![Notice::TournamentStarted]
            }
            Intent::SwitchMode { mode } => {
                self.switch_mode(mode);
                vec![Notice::ModeSwitched(mode)]
            }
            Intent::ResetStats => {
                self.reset_stats();
                vec![Notice::StatsReset]
            }
            Intent::ToggleSound => vec![Notice::SoundToggled(self.toggle_sound())],
            Intent::ToggleDarkMode => vec![Notice::DarkModeToggled(self.toggle_dark_mode())],
            Intent::SetTheme { theme } => {
                self.set_theme(&theme);
                vec![Notice::ThemeSelected(theme.trim().to_string())]
            }
            Intent::TogglePanel { .. } => Vec::new(),
        };
        Ok((notices, None))
    }

    /// Handle an intent. Rejections come back as a message; the session is
    /// left untouched in that case.
    pub fn dispatch(&mut self, intent: Intent) -> Response {
        let (notices, round, error) = match self.apply(intent) {
            Ok((notices, round)) => (notices, round, None),
            Err(e) => {
                debug!(error = %e, "intent rejected");
                (vec![Notice::Rejected(e)], None, Some(e.code().to_string()))
            }
        };

        let unlocked = notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::AchievementUnlocked(id) => Some(Unlocked::from(*id)),
                _ => None,
            })
            .collect();
        Response {
            balance: self.ledger.balance(),
            bets: *self.ledger.bets(),
            selected_chip: self.selected_chip,
            round: round.map(|round| RoundReport {
                receipt: round.receipt(),
                summary: round.summary,
                settlement: round.settlement,
            }),
            unlocked,
            messages: notices.iter().map(Notice::message).collect(),
            error,
        }
    }
}
