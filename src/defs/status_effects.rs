//! Status effect (buff/debuff) definitions.

use serde::{Deserialize, Serialize};

use super::DamageType;

/// Definition of a status effect. Per-instance magnitude comes from
/// `Buff::value`; the def describes what the value means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectDef {
    pub id: String,
    /// Each second deals `Buff::value` damage of `tick_damage_type`.
    pub tick_damage: bool,
    pub tick_damage_type: Option<DamageType>,
    /// Each second heals `Buff::value` HP, capped at max HP.
    pub heal_per_second: bool,
    /// Flat armor modifier while active.
    pub armor_mod: Option<f64>,
    /// Flat magic resist modifier while active (result clamped to 0-1).
    pub magic_resist_mod: Option<f64>,
}

/// Returns all built-in status effects.
pub fn get_all_status_effects() -> Vec<StatusEffectDef> {
    vec![
        StatusEffectDef {
            id: "poison".to_string(),
            tick_damage: true,
            tick_damage_type: Some(DamageType::Magical),
            heal_per_second: false,
            armor_mod: None,
            magic_resist_mod: None,
        },
        StatusEffectDef {
            id: "armor_break".to_string(),
            tick_damage: false,
            tick_damage_type: None,
            heal_per_second: false,
            armor_mod: Some(-10.0),
            magic_resist_mod: None,
        },
        StatusEffectDef {
            id: "regrowth".to_string(),
            tick_damage: false,
            tick_damage_type: None,
            heal_per_second: true,
            armor_mod: None,
            magic_resist_mod: None,
        },
    ]
}

/// Gets a status effect definition by id.
pub fn get_status_effect_def(id: &str) -> Option<StatusEffectDef> {
    get_all_status_effects().into_iter().find(|s| s.id == id)
}
