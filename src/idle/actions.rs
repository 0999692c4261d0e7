//! Idle action definitions and slot ticking.
//!
//! Each action kind supplies its cycle duration and how completions turn into
//! rewards; the shared accrual arithmetic lives in [`super::timer`]. A slot
//! tick updates progress, the tick timestamp, and the earned rewards together
//! so a retried tick can never double-grant.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ESSENCE_PER_MINING_COMPLETION, LUMBER_PER_WOODCUTTING_COMPLETION, MAX_IDLE_SECONDS,
    MINING_DURATION_SECONDS, TRAINING_DURATION_SECONDS, WOODCUTTING_DURATION_SECONDS,
};
use crate::profile::Profile;

use super::timer::advance_idle_timer;

/// One kind of idle action: its cycle length and its reward payout.
pub trait ActionDefinition {
    fn id(&self) -> &'static str;
    fn duration_per_completion_sec(&self) -> f64;
    /// Speed multiplier; 1.0 is normal.
    fn rate_modifier(&self) -> f64 {
        1.0
    }
    fn apply_rewards(&self, completions: u64, profile: &mut Profile);
}

/// Mining: pays essence per completed cycle.
pub struct Mining;

impl ActionDefinition for Mining {
    fn id(&self) -> &'static str {
        "mining"
    }

    fn duration_per_completion_sec(&self) -> f64 {
        MINING_DURATION_SECONDS
    }

    fn apply_rewards(&self, completions: u64, profile: &mut Profile) {
        profile.add_essence(completions * ESSENCE_PER_MINING_COMPLETION);
    }
}

/// Woodcutting: pays lumber per completed cycle.
pub struct Woodcutting;

impl ActionDefinition for Woodcutting {
    fn id(&self) -> &'static str {
        "woodcutting"
    }

    fn duration_per_completion_sec(&self) -> f64 {
        WOODCUTTING_DURATION_SECONDS
    }

    fn apply_rewards(&self, completions: u64, profile: &mut Profile) {
        profile.add_lumber(completions * LUMBER_PER_WOODCUTTING_COMPLETION);
    }
}

/// Training: pays stat points for one hero's chosen stat.
pub struct Training {
    pub hero_id: u32,
    pub stat_key: String,
}

impl ActionDefinition for Training {
    fn id(&self) -> &'static str {
        "training"
    }

    fn duration_per_completion_sec(&self) -> f64 {
        TRAINING_DURATION_SECONDS
    }

    fn apply_rewards(&self, completions: u64, profile: &mut Profile) {
        profile.add_training_points(self.hero_id, &self.stat_key, completions);
    }
}

/// Serializable selection of an action for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SlotAction {
    Mining,
    Woodcutting,
    Training { hero_id: u32, stat_key: String },
}

impl SlotAction {
    pub fn definition(&self) -> Box<dyn ActionDefinition> {
        match self {
            SlotAction::Mining => Box::new(Mining),
            SlotAction::Woodcutting => Box::new(Woodcutting),
            SlotAction::Training { hero_id, stat_key } => Box::new(Training {
                hero_id: *hero_id,
                stat_key: stat_key.clone(),
            }),
        }
    }
}

/// One idle action slot. `progress` is always in [0, 1); whole cycles are
/// paid out on tick, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSlot {
    pub slot_index: usize,
    pub action: SlotAction,
    pub progress: f64,
    /// Millisecond timestamp of the last tick.
    pub last_tick_at: i64,
}

impl ActionSlot {
    pub fn new(slot_index: usize, action: SlotAction, now: i64) -> Self {
        Self {
            slot_index,
            action,
            progress: 0.0,
            last_tick_at: now,
        }
    }
}

/// Ticks one slot to `now`, paying accrued rewards into the profile.
///
/// Elapsed time is capped at `MAX_IDLE_SECONDS` so a long-abandoned slot
/// accrues at most one cap's worth of completions. Returns the number of
/// completions paid.
pub fn tick_slot(slot: &mut ActionSlot, now: i64, profile: &mut Profile) -> u64 {
    let definition = slot.action.definition();
    let capped_now = now.min(slot.last_tick_at.saturating_add(MAX_IDLE_SECONDS * 1000));
    let advance = advance_idle_timer(
        slot.progress,
        slot.last_tick_at,
        capped_now,
        definition.duration_per_completion_sec(),
        definition.rate_modifier(),
    );
    slot.progress = advance.progress;
    slot.last_tick_at = now;
    definition.apply_rewards(advance.completions, profile);
    advance.completions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mining_pays_essence() {
        let mut profile = Profile::new();
        let mut slot = ActionSlot::new(0, SlotAction::Mining, 0);
        // 10s at a 3s cycle: 3 completions, 1/3 left over
        let completions = tick_slot(&mut slot, 10_000, &mut profile);
        assert_eq!(completions, 3);
        assert_eq!(profile.wallet.essence, 3 * ESSENCE_PER_MINING_COMPLETION);
        assert!((slot.progress - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(slot.last_tick_at, 10_000);
    }

    #[test]
    fn test_woodcutting_pays_lumber() {
        let mut profile = Profile::new();
        let mut slot = ActionSlot::new(0, SlotAction::Woodcutting, 0);
        tick_slot(&mut slot, 6_000, &mut profile);
        assert_eq!(profile.wallet.lumber, 2 * LUMBER_PER_WOODCUTTING_COMPLETION);
        assert_eq!(profile.wallet.essence, 0);
    }

    #[test]
    fn test_training_pays_stat_points_for_the_hero() {
        let mut profile = Profile::new();
        let action = SlotAction::Training {
            hero_id: 99,
            stat_key: "strength".to_string(),
        };
        let mut slot = ActionSlot::new(1, action, 0);
        let completions = tick_slot(&mut slot, 12_000, &mut profile);
        assert_eq!(completions, 2); // 12s / 5s
        assert_eq!(profile.training_points(99, "strength"), 2);
        assert!((slot.progress - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_tick_with_no_elapsed_time_grants_nothing() {
        let mut profile = Profile::new();
        let mut slot = ActionSlot::new(0, SlotAction::Mining, 5_000);
        let completions = tick_slot(&mut slot, 5_000, &mut profile);
        assert_eq!(completions, 0);
        assert_eq!(profile.wallet.essence, 0);
        assert_eq!(slot.progress, 0.0);
    }

    #[test]
    fn test_elapsed_time_is_capped() {
        let mut profile = Profile::new();
        let mut slot = ActionSlot::new(0, SlotAction::Mining, 0);
        let one_year_ms = 365 * 24 * 60 * 60 * 1000;
        let completions = tick_slot(&mut slot, one_year_ms, &mut profile);
        let cap_completions = MAX_IDLE_SECONDS as u64 / MINING_DURATION_SECONDS as u64;
        assert_eq!(completions, cap_completions);
        // The timestamp still jumps to now so the gap is not re-counted
        assert_eq!(slot.last_tick_at, one_year_ms);
    }

    #[test]
    fn test_split_ticks_match_one_big_tick() {
        let mut profile_a = Profile::new();
        let mut slot_a = ActionSlot::new(0, SlotAction::Mining, 0);
        tick_slot(&mut slot_a, 20_000, &mut profile_a);

        let mut profile_b = Profile::new();
        let mut slot_b = ActionSlot::new(0, SlotAction::Mining, 0);
        tick_slot(&mut slot_b, 7_000, &mut profile_b);
        tick_slot(&mut slot_b, 20_000, &mut profile_b);

        assert_eq!(profile_a.wallet.essence, profile_b.wallet.essence);
        assert!((slot_a.progress - slot_b.progress).abs() < 1e-9);
    }
}
