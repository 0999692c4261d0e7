//! Riftrun - Incremental Run Engine Library
//!
//! In-process simulation core for the Dark Rift incremental game:
//! run/map state machine, tick-driven battle engine, and idle-action accrual.
//! HTTP, auth, and real database persistence live outside this crate and plug
//! in through the `store` traits.

pub mod battle;
pub mod constants;
pub mod defs;
pub mod error;
pub mod idle;
pub mod profile;
pub mod run;
pub mod save_manager;
pub mod store;
