//! Ability definitions.
//!
//! These are spells and passives only. Auto-attack is intrinsic: every unit
//! has an attack interval and damage on its def plus an attack timer in
//! battle; abilities are additional (spell timers or on-event passives).

use serde::{Deserialize, Serialize};

use super::DamageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTrigger {
    /// Cast when the owner's spell timer fills.
    Timer,
    /// Fires when the owner takes damage (e.g. return damage).
    OnDamageTaken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTarget {
    SingleEnemy,
    Attacker,
    LowestHpAlly,
}

/// Status effect applied to the spell target on hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectOnHit {
    pub status_effect_id: String,
    pub duration: f64,
    /// Debuff magnitude (e.g. poison damage per second).
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub id: String,
    pub kind: AbilityKind,
    pub trigger: AbilityTrigger,
    pub target: AbilityTarget,
    /// Damage type for damaging abilities. `None` for heals/utility.
    pub damage_type: Option<DamageType>,
    /// Base damage for active damaging spells.
    pub base_damage: Option<f64>,
    /// For return-damage passives: fraction of damage taken reflected back.
    pub return_damage_ratio: Option<f64>,
    pub status_effect_on_hit: Option<StatusEffectOnHit>,
}

/// Returns all built-in abilities.
pub fn get_all_abilities() -> Vec<AbilityDef> {
    vec![
        AbilityDef {
            id: "bristleback_return".to_string(),
            kind: AbilityKind::Passive,
            trigger: AbilityTrigger::OnDamageTaken,
            target: AbilityTarget::Attacker,
            damage_type: Some(DamageType::Physical),
            base_damage: None,
            return_damage_ratio: Some(0.2),
            status_effect_on_hit: None,
        },
        AbilityDef {
            id: "laguna_blade".to_string(),
            kind: AbilityKind::Active,
            trigger: AbilityTrigger::Timer,
            target: AbilityTarget::SingleEnemy,
            damage_type: Some(DamageType::Magical),
            base_damage: Some(100.0),
            return_damage_ratio: None,
            status_effect_on_hit: None,
        },
        AbilityDef {
            id: "poison_touch".to_string(),
            kind: AbilityKind::Active,
            trigger: AbilityTrigger::Timer,
            target: AbilityTarget::SingleEnemy,
            damage_type: Some(DamageType::Magical),
            base_damage: Some(20.0),
            return_damage_ratio: None,
            status_effect_on_hit: Some(StatusEffectOnHit {
                status_effect_id: "poison".to_string(),
                duration: 4.0,
                value: Some(15.0),
            }),
        },
        AbilityDef {
            id: "shadow_wave".to_string(),
            kind: AbilityKind::Active,
            trigger: AbilityTrigger::Timer,
            target: AbilityTarget::LowestHpAlly,
            damage_type: Some(DamageType::Magical),
            base_damage: None,
            return_damage_ratio: None,
            status_effect_on_hit: None,
        },
    ]
}

/// Gets an ability definition by id.
pub fn get_ability_def(ability_id: &str) -> Option<AbilityDef> {
    get_all_abilities().into_iter().find(|a| a.id == ability_id)
}
