/// Balance granted to a new session.
pub const STARTING_BALANCE: u64 = 100;

/// Default smallest wager accepted on a square.
pub const DEFAULT_MIN_BET: u64 = 1;

/// Default largest wager accepted on a single square.
pub const DEFAULT_MAX_BET: u64 = 100;

/// Default largest combined wager across all squares.
pub const DEFAULT_TABLE_LIMIT: u64 = 500;

/// Chip denominations, bound to keys 1-4.
pub const CHIP_TIERS: [u64; 4] = [1, 5, 10, 25];

/// Number of dice thrown per round.
pub const DICE_PER_ROUND: usize = 3;

/// Number of betting squares (one per symbol).
pub const SQUARES: usize = 6;

/// Rounds kept in the history.
pub const HISTORY_CAPACITY: usize = 10;

/// Rounds until the first bonus activation.
pub const INITIAL_BONUS_COUNTDOWN: u32 = 10;

/// Bonus multipliers are drawn uniformly from this range.
pub const BONUS_MULTIPLIER_MIN: u8 = 2;
pub const BONUS_MULTIPLIER_MAX: u8 = 4;

/// After an activation the countdown is redrawn uniformly from this range.
pub const BONUS_COUNTDOWN_MIN: u32 = 5;
pub const BONUS_COUNTDOWN_MAX: u32 = 14;

/// Winnings that count as a big win.
pub const BIG_WIN_THRESHOLD: u64 = 100;

/// A win while holding less than this earns the comeback achievement.
pub const COMEBACK_BALANCE: u64 = 10;

/// Win streak lengths for the streak achievements.
pub const HOT_STREAK: u32 = 5;
pub const UNSTOPPABLE_STREAK: u32 = 10;

/// Rounds played for the veteran achievement.
pub const VETERAN_GAMES: u64 = 100;

/// Bonus activations for the bonus hunter achievement.
pub const BONUS_HUNTER_TRIGGERS: u32 = 10;

/// Simulated tournament parameters.
pub const TOURNAMENT_ENTRY_FEE: u64 = 50;
pub const TOURNAMENT_PRIZE_POOL: u64 = 1_000;
pub const TOURNAMENT_PLAYERS: u32 = 8;
pub const TOURNAMENT_ROUNDS: u32 = 3;

/// Room codes are this many uppercase alphanumerics.
pub const ROOM_CODE_LENGTH: usize = 6;

/// Maximum player name length for simulated rooms.
pub const MAX_NAME_LENGTH: usize = 32;

/// Name given to the simulated host when joining someone else's room.
pub const SIMULATED_HOST_NAME: &str = "Host Player";
