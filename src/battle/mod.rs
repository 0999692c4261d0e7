//! Turn-based battle engine.
//!
//! One encounter is resolved in discrete time increments driven by an
//! external caller (a request handler), never a free-running loop. All
//! combat math is a pure function of the state snapshot plus the injected
//! definitions, so a battle can be replayed tick by tick.

pub mod engine;
pub mod formulas;
pub mod resolution;
pub mod state;
pub mod timers;
pub mod types;

pub use engine::{tick, TickOptions};
pub use state::create_battle_state;
pub use types::{BattleResult, BattleState, Buff, CombatLogEntry, EnemyInstance, HeroInstance};
