//! Durable player-side state fed by idle actions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::idle::actions::ActionSlot;

/// Idle currencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub essence: u64,
    pub lumber: u64,
}

/// A player's idle-game profile: wallet, per-hero training points, and the
/// action slots accruing progress. Persisted by the save manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub wallet: Wallet,
    /// hero id -> stat key -> accumulated training points.
    pub training_progress: HashMap<u32, HashMap<String, u64>>,
    pub slots: Vec<ActionSlot>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_essence(&mut self, amount: u64) {
        self.wallet.essence += amount;
    }

    pub fn add_lumber(&mut self, amount: u64) {
        self.wallet.lumber += amount;
    }

    pub fn add_training_points(&mut self, hero_id: u32, stat_key: &str, points: u64) {
        *self
            .training_progress
            .entry(hero_id)
            .or_default()
            .entry(stat_key.to_string())
            .or_insert(0) += points;
    }

    pub fn training_points(&self, hero_id: u32, stat_key: &str) -> u64 {
        self.training_progress
            .get(&hero_id)
            .and_then(|stats| stats.get(stat_key))
            .copied()
            .unwrap_or(0)
    }

    pub fn slot_mut(&mut self, slot_index: usize) -> Option<&mut ActionSlot> {
        self.slots.iter_mut().find(|s| s.slot_index == slot_index)
    }
}
