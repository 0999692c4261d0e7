//! Idle actions: wall-clock progress accrual independent of battles.

pub mod actions;
pub mod timer;

pub use actions::{tick_slot, ActionDefinition, ActionSlot, Mining, SlotAction, Training, Woodcutting};
pub use timer::{advance_idle_timer, IdleAdvance};
