//! Stat formulas for the battle engine.
//!
//! Pure functions; no engine state in here.

use crate::constants::NON_FOCUS_DAMAGE_MULTIPLIER;
use crate::defs::DamageType;

/// Effective attack interval in seconds: `base / (1 + attack_speed)`,
/// optionally floored at `min_interval`.
pub fn attack_interval(base_interval: f64, attack_speed: f64, min_interval: Option<f64>) -> f64 {
    let interval = base_interval / (1.0 + attack_speed);
    match min_interval {
        Some(min) if interval < min => min,
        _ => interval,
    }
}

/// Effective spell interval in seconds: `base / (1 + spell_haste)`,
/// optionally floored at `min_interval`.
pub fn spell_interval(base_interval: f64, spell_haste: f64, min_interval: Option<f64>) -> f64 {
    let interval = base_interval / (1.0 + spell_haste);
    match min_interval {
        Some(min) if interval < min => min,
        _ => interval,
    }
}

/// Auto-attack damage: flat base plus flat bonus.
pub fn attack_damage(base_damage: f64, flat_bonus: f64) -> f64 {
    base_damage + flat_bonus
}

/// Active spell damage: base plus flat spell power.
pub fn spell_damage(base_damage: f64, spell_power: f64) -> f64 {
    base_damage + spell_power
}

/// Attacks on a non-focus enemy are penalized; the focus target takes full
/// damage.
pub fn non_focus_target_penalty(damage: f64, is_target_enemy_focus: bool) -> f64 {
    if is_target_enemy_focus {
        damage
    } else {
        damage * NON_FOCUS_DAMAGE_MULTIPLIER
    }
}

/// Physical damage reduced by armor: `damage * 100 / (100 + armor)`.
pub fn apply_physical_damage(damage: f64, target_armor: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * 100.0 / (100.0 + target_armor)
}

/// Magical damage reduced by magic resist (0-1): `damage * (1 - resist)`.
pub fn apply_magical_damage(damage: f64, target_magic_resist: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * (1.0 - target_magic_resist)
}

/// Pure damage bypasses armor and magic resist.
pub fn apply_pure_damage(damage: f64) -> f64 {
    damage.max(0.0)
}

/// Applies damage against the matching resistance stat.
pub fn apply_damage_by_type(
    damage: f64,
    damage_type: DamageType,
    target_armor: f64,
    target_magic_resist: f64,
) -> f64 {
    match damage_type {
        DamageType::Physical => apply_physical_damage(damage, target_armor),
        DamageType::Magical => apply_magical_damage(damage, target_magic_resist),
        DamageType::Pure => apply_pure_damage(damage),
    }
}
