// Battle timing
pub const FOCUS_CHANGE_COOLDOWN_SECONDS: f64 = 2.0;
pub const AUTO_ROTATION_INTERVAL_SECONDS: f64 = 10.0;
pub const COMBAT_LOG_CAPACITY: usize = 200;

// Damage when attacking an enemy other than the pack's focus target
pub const NON_FOCUS_DAMAGE_MULTIPLIER: f64 = 0.5;

// Encounter rewards (gold, per-hero XP, post-win heal fraction of max HP)
pub const GOLD_PER_ENCOUNTER_WIN: u64 = 25;
pub const XP_PER_HERO_WIN: u64 = 10;
pub const HEAL_PERCENT_ON_WIN: f64 = 0.1;

// Lineup size limits for starting a run
pub const MIN_LINEUP_HEROES: usize = 1;
pub const MAX_LINEUP_HEROES: usize = 5;

// Idle actions
pub const MINING_DURATION_SECONDS: f64 = 3.0;
pub const WOODCUTTING_DURATION_SECONDS: f64 = 3.0;
pub const TRAINING_DURATION_SECONDS: f64 = 5.0;
pub const ESSENCE_PER_MINING_COMPLETION: u64 = 1;
pub const LUMBER_PER_WOODCUTTING_COMPLETION: u64 = 1;

// Offline accrual is capped: a slot left alone for longer than this only
// earns this much wall-clock time on its next tick.
pub const MAX_IDLE_SECONDS: i64 = 7 * 24 * 60 * 60;

// Rate modifiers below this are treated as this value to keep the
// effective duration finite.
pub const MIN_RATE_MODIFIER: f64 = 0.01;

// Profile save format
pub const SAVE_VERSION_MAGIC: u64 = 0x5249_4654_0000_0001;
