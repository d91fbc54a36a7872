//! Armour - Material transforms and armor absorption
//!
//! Every armor material is a pure function from (incoming damage, hit
//! category) to a transformed damage value. Absorption then compares the
//! transformed value against the armor points, or against twice the points
//! for hardened armor.

use crate::config::GameOptions;
use crate::damage::HitDescriptor;
use crate::types::{ArmorMaterial, DamageCategory};
use crate::unit::Location;

/// Situation of the hit as seen by the armor material
#[derive(Debug, Clone, Copy)]
pub struct MaterialInput {
    pub category: DamageCategory,
    pub area_saturation: bool,
    pub heat_weapon: bool,
    /// Defender is powered infantry
    pub powered_infantry: bool,
    /// Optional heat-dissipating rule is on
    pub heat_dissipating_rule: bool,
    /// Armor points facing the hit
    pub armor: u32,
}

/// Damage after the material has acted on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEffect {
    pub damage: u32,
    /// Original damage points per transformed point, as (numerator, denominator)
    pub scale: (u32, u32),
}

impl MaterialEffect {
    fn unchanged(damage: u32) -> Self {
        MaterialEffect {
            damage,
            scale: (1, 1),
        }
    }

    fn halved(damage: u32) -> Self {
        MaterialEffect {
            damage: (damage / 2).max(1),
            scale: (2, 1),
        }
    }
}

/// Apply a material's transform to incoming damage
pub fn transform_damage(
    material: ArmorMaterial,
    damage: u32,
    input: &MaterialInput,
) -> MaterialEffect {
    if damage == 0 {
        return MaterialEffect::unchanged(0);
    }
    let category = input.category;

    match material {
        ArmorMaterial::FerroLamellor if !category.bypasses_lamellor() => MaterialEffect {
            damage: damage.saturating_mul(4) / 5,
            scale: (5, 4),
        },
        ArmorMaterial::BallisticReinforced if category.is_ballistic_family() => {
            MaterialEffect::halved(damage)
        }
        ArmorMaterial::ImpactResistant if category == DamageCategory::Physical => MaterialEffect {
            damage: (2 * (damage / 3) + damage % 3).max(1),
            scale: (3, 2),
        },
        ArmorMaterial::Reflective => {
            if (category == DamageCategory::Physical && !input.powered_infantry)
                || input.area_saturation
            {
                MaterialEffect::unchanged(damage + damage.min(input.armor / 2))
            } else if category == DamageCategory::Energy {
                MaterialEffect::halved(damage)
            } else {
                MaterialEffect::unchanged(damage)
            }
        }
        ArmorMaterial::Reactive if category.is_missile() || input.area_saturation => {
            MaterialEffect::halved(damage)
        }
        ArmorMaterial::HeatDissipating if input.heat_weapon && input.heat_dissipating_rule => {
            MaterialEffect::halved(damage)
        }
        _ => MaterialEffect::unchanged(damage),
    }
}

/// Result of armor meeting damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorption {
    pub armor_after: u32,
    /// Hardened ledger bit after the hit
    pub half_point: bool,
    /// Damage passing on to internal structure
    pub overflow: u32,
}

impl Absorption {
    pub fn penetrated(&self) -> bool {
        self.overflow > 0
    }
}

/// Absorb `effect` with `armor` points of `material`.
///
/// `original` is the damage before the material transform; overflow from a
/// reducing material is expressed in those units.
pub fn absorb(
    material: ArmorMaterial,
    armor: u32,
    half_point: bool,
    original: u32,
    effect: MaterialEffect,
) -> Absorption {
    let damage = effect.damage;

    if material == ArmorMaterial::Hardened {
        let threshold = armor.saturating_mul(2).saturating_sub(u32::from(half_point));
        if damage <= threshold {
            let left = threshold - damage;
            return Absorption {
                armor_after: (left + 1) / 2,
                half_point: left % 2 == 1,
                overflow: 0,
            };
        }
        return Absorption {
            armor_after: 0,
            half_point: false,
            overflow: damage - threshold,
        };
    }

    if damage <= armor {
        return Absorption {
            armor_after: armor - damage,
            half_point: false,
            overflow: 0,
        };
    }

    let overflow = if damage < original {
        let (num, den) = effect.scale;
        original.saturating_sub(armor.saturating_mul(num) / den).max(1)
    } else {
        damage - armor
    };
    Absorption {
        armor_after: 0,
        half_point: false,
        overflow,
    }
}

/// Modifier for special critical rolls at this location
pub fn special_critical_modifier(
    location: &Location,
    hit: &HitDescriptor,
    options: &GameOptions,
) -> i32 {
    if location.armor_material == ArmorMaterial::Hardened {
        return -2;
    }
    let mut modifier = 0;
    if location.is_bar_rated() || location.armor_material == ArmorMaterial::Reflective {
        modifier += 2;
    }
    if location.armor_material == ArmorMaterial::ImpactResistant
        && !options.strict_impact_resistance
    {
        modifier += 1;
    }
    modifier + hit.special_critical_modifier + hit.glancing_modifier
}

/// Whether barrier armor owes a critical for this much original damage
pub fn owes_bar_critical(location: &Location, original: u32) -> bool {
    location.is_bar_rated() && original > location.bar_rating
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationRole;

    fn input(category: DamageCategory, armor: u32) -> MaterialInput {
        MaterialInput {
            category,
            area_saturation: false,
            heat_weapon: false,
            powered_infantry: false,
            heat_dissipating_rule: false,
            armor,
        }
    }

    fn run(
        material: ArmorMaterial,
        armor: u32,
        damage: u32,
        category: DamageCategory,
    ) -> Absorption {
        let effect = transform_damage(material, damage, &input(category, armor));
        absorb(material, armor, false, damage, effect)
    }

    #[test]
    fn test_standard_absorbs_one_to_one() {
        let result = run(ArmorMaterial::Standard, 5, 3, DamageCategory::Ballistic);
        assert_eq!(result.armor_after, 2);
        assert!(!result.penetrated());

        let result = run(ArmorMaterial::Standard, 5, 10, DamageCategory::Ballistic);
        assert_eq!(result.armor_after, 0);
        assert_eq!(result.overflow, 5);
    }

    #[test]
    fn test_reflective_physical_hit() {
        let effect = transform_damage(
            ArmorMaterial::Reflective,
            4,
            &input(DamageCategory::Physical, 10),
        );
        assert_eq!(effect.damage, 8);
        let result = absorb(ArmorMaterial::Reflective, 10, false, 4, effect);
        assert_eq!(result.armor_after, 2);
        assert!(!result.penetrated());
    }

    #[test]
    fn test_reflective_ignores_physical_from_powered_infantry() {
        let mut inp = input(DamageCategory::Physical, 10);
        inp.powered_infantry = true;
        assert_eq!(transform_damage(ArmorMaterial::Reflective, 4, &inp).damage, 4);
    }

    #[test]
    fn test_reflective_halves_energy() {
        let inp = input(DamageCategory::Energy, 10);
        assert_eq!(transform_damage(ArmorMaterial::Reflective, 7, &inp).damage, 3);
        assert_eq!(transform_damage(ArmorMaterial::Reflective, 1, &inp).damage, 1);
    }

    #[test]
    fn test_reflective_overflow_of_increased_damage() {
        let result = run(ArmorMaterial::Reflective, 4, 6, DamageCategory::Physical);
        // 6 + min(6, 2) = 8 against 4 armor
        assert_eq!(result.overflow, 4);
    }

    #[test]
    fn test_hardened_threshold() {
        let result = run(ArmorMaterial::Hardened, 3, 6, DamageCategory::Ballistic);
        assert_eq!(result.armor_after, 0);
        assert!(!result.half_point);
        assert!(!result.penetrated());

        let result = run(ArmorMaterial::Hardened, 3, 7, DamageCategory::Ballistic);
        assert_eq!(result.overflow, 1);
    }

    #[test]
    fn test_lamellor_huge_damage_saturates() {
        let result = run(ArmorMaterial::FerroLamellor, 10, u32::MAX, DamageCategory::Ballistic);
        assert_eq!(result.armor_after, 0);
        assert!(result.overflow > 0);
    }

    #[test]
    fn test_hardened_half_point_ledger() {
        let effect = MaterialEffect::unchanged(1);
        let first = absorb(ArmorMaterial::Hardened, 3, false, 1, effect);
        assert_eq!(first.armor_after, 3);
        assert!(first.half_point);

        let second =
            absorb(ArmorMaterial::Hardened, first.armor_after, first.half_point, 1, effect);
        assert_eq!(second.armor_after, 2);
        assert!(!second.half_point);
    }

    #[test]
    fn test_lamellor_reduction_and_bypass() {
        let inp = input(DamageCategory::Energy, 20);
        assert_eq!(transform_damage(ArmorMaterial::FerroLamellor, 10, &inp).damage, 8);
        let ap = input(DamageCategory::ArmorPiercing, 20);
        assert_eq!(transform_damage(ArmorMaterial::FerroLamellor, 10, &ap).damage, 10);
    }

    #[test]
    fn test_reduced_overflow_in_original_units() {
        // 10 ballistic halved to 5 against 2 armor: 2 armor stops 4 original points
        let result = run(ArmorMaterial::BallisticReinforced, 2, 10, DamageCategory::Ballistic);
        assert_eq!(result.armor_after, 0);
        assert_eq!(result.overflow, 6);
    }

    #[test]
    fn test_ballistic_reinforced_ignores_energy() {
        let inp = input(DamageCategory::Energy, 10);
        assert_eq!(
            transform_damage(ArmorMaterial::BallisticReinforced, 10, &inp).damage,
            10
        );
    }

    #[test]
    fn test_impact_resistant_physical() {
        let inp = input(DamageCategory::Physical, 10);
        assert_eq!(transform_damage(ArmorMaterial::ImpactResistant, 10, &inp).damage, 7);
        assert_eq!(transform_damage(ArmorMaterial::ImpactResistant, 1, &inp).damage, 1);
    }

    #[test]
    fn test_reactive_halves_missiles_and_area() {
        let inp = input(DamageCategory::Missile, 10);
        assert_eq!(transform_damage(ArmorMaterial::Reactive, 9, &inp).damage, 4);

        let mut area = input(DamageCategory::Ballistic, 10);
        area.area_saturation = true;
        assert_eq!(transform_damage(ArmorMaterial::Reactive, 6, &area).damage, 3);
    }

    #[test]
    fn test_heat_dissipating_needs_rule() {
        let mut inp = input(DamageCategory::Energy, 10);
        inp.heat_weapon = true;
        assert_eq!(transform_damage(ArmorMaterial::HeatDissipating, 8, &inp).damage, 8);
        inp.heat_dissipating_rule = true;
        assert_eq!(transform_damage(ArmorMaterial::HeatDissipating, 8, &inp).damage, 4);
    }

    #[test]
    fn test_special_modifier() {
        let options = GameOptions::default();
        let hit = HitDescriptor::new(0).with_extra_critical_chance(1);

        let mut loc = Location::new("Front", LocationRole::Front, 10, 5);
        assert_eq!(special_critical_modifier(&loc, &hit, &options), 1);

        loc.armor_material = ArmorMaterial::Reflective;
        assert_eq!(special_critical_modifier(&loc, &hit, &options), 3);

        loc.armor_material = ArmorMaterial::ImpactResistant;
        assert_eq!(special_critical_modifier(&loc, &hit, &options), 2);

        loc.armor_material = ArmorMaterial::Hardened;
        assert_eq!(special_critical_modifier(&loc, &hit, &options), -2);
    }

    #[test]
    fn test_bar_critical() {
        let mut loc = Location::new("Front", LocationRole::Front, 10, 5);
        assert!(!owes_bar_critical(&loc, 12));
        loc.bar_rating = 5;
        assert!(owes_bar_critical(&loc, 6));
        assert!(!owes_bar_critical(&loc, 5));
    }
}
