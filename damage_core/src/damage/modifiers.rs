//! Pre-modifier stage
//!
//! Adjusts the raw damage of a request before any defensive layer sees it.
//! The order is fixed: scale conversion, damage-type adjustment, exposure,
//! vacuum, neural feedback, blast containment.

use super::request::DamageRequest;
use crate::config::RulesConfig;
use crate::report::{Adjustment, ReportEvent};
use crate::types::{ArmorMaterial, DamageType, NeuralInterface, UnitArchetype};
use crate::unit::{Location, Unit};

/// Outcome of the pre-modifier stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedDamage {
    /// Damage that enters the defensive cascade
    pub damage: u32,
    /// Value used for aerospace threshold checks
    pub threshold_damage: u32,
    /// One `DamageAdjusted` per step that changed the value
    pub events: Vec<ReportEvent>,
}

struct Tracker {
    unit: crate::types::UnitId,
    damage: u32,
    events: Vec<ReportEvent>,
}

impl Tracker {
    fn set(&mut self, reason: Adjustment, after: u32) {
        if after != self.damage {
            self.events.push(ReportEvent::DamageAdjusted {
                unit: self.unit,
                reason,
                before: self.damage,
                after,
            });
            self.damage = after;
        }
    }
}

/// Capital-to-standard rounds to nearest
fn to_capital(value: u32) -> u32 {
    (value + 5) / 10
}

/// Armor that acid eats through at a fixed rate
fn acid_resistant(location: &Location) -> bool {
    location.armor_material.is_fibrous()
        || matches!(
            location.armor_material,
            ArmorMaterial::Reactive | ArmorMaterial::Reflective | ArmorMaterial::FerroLamellor
        )
        || location.is_low_rated()
}

/// Apply every pre-modifier to a request aimed at `location` of `unit`
pub fn apply_pre_modifiers(
    unit: &Unit,
    request: &DamageRequest,
    location: &Location,
    rules: &RulesConfig,
) -> ModifiedDamage {
    let constants = &rules.constants;
    let hit = &request.hit;
    let conventional = unit.archetype == UnitArchetype::ConventionalInfantry;

    let mut threshold_damage = match hit.single_weapon_value {
        Some(value) if !rules.options.aero_sanity => value,
        _ => request.damage,
    };
    let mut t = Tracker {
        unit: unit.id,
        damage: request.damage,
        events: Vec::new(),
    };

    // Scale conversion
    if hit.capital_scale && !unit.capital_scale {
        threshold_damage = threshold_damage.saturating_mul(10);
        t.set(Adjustment::CapitalToStandard, t.damage.saturating_mul(10));
    } else if !hit.capital_scale && unit.capital_scale {
        threshold_damage = to_capital(threshold_damage);
        t.set(Adjustment::StandardToCapital, to_capital(t.damage));
    }

    // Damage type
    match request.damage_type {
        DamageType::Fragmentation if !conventional => t.set(Adjustment::Fragmentation, 0),
        DamageType::NonPenetrating if !unit.archetype.is_infantry() => {
            t.set(Adjustment::NonPenetrating, 0)
        }
        DamageType::Incendiary if conventional && t.damage > 0 => t.set(
            Adjustment::Incendiary,
            t.damage + constants.incendiary_infantry_bonus,
        ),
        DamageType::Acid => {
            if acid_resistant(location) {
                t.set(Adjustment::Acid, t.damage.min(constants.acid_fixed_damage));
            } else if conventional {
                t.set(Adjustment::Acid, t.damage.saturating_mul(3).div_ceil(2));
            }
        }
        DamageType::NailRivet
            if !conventional && location.bar_rating >= 5 && location.armor_value(hit.rear) > 0 =>
        {
            t.set(Adjustment::NailRivet, 0)
        }
        _ => {}
    }

    if unit.archetype.is_infantry() {
        let profile = unit.infantry.clone().unwrap_or_default();
        if request.area_saturation && !profile.in_cover {
            t.set(Adjustment::Exposure, t.damage.saturating_mul(2));
        }
        if rules.environment.vacuum && !profile.environmental_sealing {
            t.set(Adjustment::Vacuum, t.damage.saturating_mul(2));
        }
    }

    if unit.neural_interface == Some(NeuralInterface::Direct)
        && !unit.archetype.is_infantry_or_proto()
        && unit.crew.is_active()
        && t.damage > 0
    {
        t.set(Adjustment::NeuralFeedback, t.damage + 1);
    }

    if request.ammo_explosion && unit.blast_containment {
        t.set(Adjustment::BlastContainment, t.damage / 2);
    }

    ModifiedDamage {
        damage: t.damage,
        threshold_damage,
        events: t.events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::HitDescriptor;
    use crate::types::UnitId;
    use crate::unit::templates;

    fn request(unit: &Unit, location: usize, damage: u32) -> DamageRequest {
        DamageRequest::new(unit.id, HitDescriptor::new(location), damage)
    }

    fn modify(unit: &Unit, request: &DamageRequest, rules: &RulesConfig) -> ModifiedDamage {
        let location = &unit.locations[request.hit.location];
        apply_pre_modifiers(unit, request, location, rules)
    }

    #[test]
    fn test_unmodified_damage_passes_through() {
        let unit = templates::walker(UnitId(1), "Wolverine");
        let result = modify(&unit, &request(&unit, 1, 10), &RulesConfig::default());
        assert_eq!(result.damage, 10);
        assert_eq!(result.threshold_damage, 10);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_infantry_area_saturation_doubles() {
        let unit = templates::platoon(UnitId(1), "Rifle Platoon", 28, 0);
        let req = request(&unit, 0, 6).area_saturation();
        let result = modify(&unit, &req, &RulesConfig::default());
        assert_eq!(result.damage, 12);
        assert_eq!(result.events.len(), 1);
    }

    #[test]
    fn test_infantry_in_cover_not_exposed() {
        let mut unit = templates::platoon(UnitId(1), "Rifle Platoon", 28, 0);
        if let Some(profile) = unit.infantry.as_mut() {
            profile.in_cover = true;
        }
        let req = request(&unit, 0, 6).area_saturation();
        assert_eq!(modify(&unit, &req, &RulesConfig::default()).damage, 6);
    }

    #[test]
    fn test_exposure_and_vacuum_stack() {
        let unit = templates::platoon(UnitId(1), "Rifle Platoon", 28, 0);
        let mut rules = RulesConfig::default();
        rules.environment.vacuum = true;
        let req = request(&unit, 0, 3).area_saturation();
        let result = modify(&unit, &req, &rules);
        assert_eq!(result.damage, 12);
        assert_eq!(result.events.len(), 2);
    }

    #[test]
    fn test_sealed_armor_ignores_vacuum() {
        let unit = templates::battle_armor(UnitId(1), "Elementals", 5, 10);
        let mut rules = RulesConfig::default();
        rules.environment.vacuum = true;
        assert_eq!(modify(&unit, &request(&unit, 0, 5), &rules).damage, 5);
    }

    #[test]
    fn test_fragmentation_only_hurts_platoons() {
        let walker = templates::walker(UnitId(1), "Centurion");
        let req = request(&walker, 1, 8).with_type(DamageType::Fragmentation);
        assert_eq!(modify(&walker, &req, &RulesConfig::default()).damage, 0);

        let platoon = templates::platoon(UnitId(2), "Foot Platoon", 21, 0);
        let req = request(&platoon, 0, 8).with_type(DamageType::Fragmentation);
        assert_eq!(modify(&platoon, &req, &RulesConfig::default()).damage, 8);
    }

    #[test]
    fn test_non_penetrating_only_hurts_infantry() {
        let walker = templates::walker(UnitId(1), "Crab");
        let req = request(&walker, 1, 7).with_type(DamageType::NonPenetrating);
        let result = modify(&walker, &req, &RulesConfig::default());
        assert_eq!(result.damage, 0);
        assert!(matches!(
            result.events[0],
            ReportEvent::DamageAdjusted {
                reason: Adjustment::NonPenetrating,
                before: 7,
                after: 0,
                ..
            }
        ));

        let squad = templates::battle_armor(UnitId(2), "Elementals", 4, 5);
        let req = request(&squad, 0, 7).with_type(DamageType::NonPenetrating);
        let result = modify(&squad, &req, &RulesConfig::default());
        assert_eq!(result.damage, 7);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_incendiary_bonus() {
        let platoon = templates::platoon(UnitId(2), "Foot Platoon", 21, 0);
        let req = request(&platoon, 0, 4).with_type(DamageType::Incendiary);
        assert_eq!(modify(&platoon, &req, &RulesConfig::default()).damage, 6);
    }

    #[test]
    fn test_acid_against_advanced_armor() {
        let mut unit = templates::walker(UnitId(1), "Griffin");
        unit.locations[1].armor_material = ArmorMaterial::Reactive;
        let req = request(&unit, 1, 10).with_type(DamageType::Acid);
        assert_eq!(modify(&unit, &req, &RulesConfig::default()).damage, 3);

        let platoon = templates::platoon(UnitId(2), "Foot Platoon", 21, 0);
        let req = request(&platoon, 0, 5).with_type(DamageType::Acid);
        assert_eq!(modify(&platoon, &req, &RulesConfig::default()).damage, 8);
    }

    #[test]
    fn test_nail_rivet_stopped_by_rated_armor() {
        let unit = templates::walker(UnitId(1), "Shadow Hawk");
        let req = request(&unit, 4, 3).with_type(DamageType::NailRivet);
        assert_eq!(modify(&unit, &req, &RulesConfig::default()).damage, 0);
    }

    #[test]
    fn test_capital_conversion() {
        let unit = templates::walker(UnitId(1), "Atlas");
        let mut req = request(&unit, 1, 2);
        req.hit.capital_scale = true;
        let result = modify(&unit, &req, &RulesConfig::default());
        assert_eq!(result.damage, 20);
        assert_eq!(result.threshold_damage, 20);

        let mut ship = templates::aerospace_fighter(UnitId(2), "Leopard", 8);
        ship.capital_scale = true;
        let result = modify(&ship, &request(&ship, 0, 15), &RulesConfig::default());
        assert_eq!(result.damage, 2);
    }

    #[test]
    fn test_capital_conversion_saturates() {
        let unit = templates::walker(UnitId(1), "Atlas");
        let mut req = request(&unit, 1, u32::MAX / 2);
        req.hit.capital_scale = true;
        let result = modify(&unit, &req, &RulesConfig::default());
        assert_eq!(result.damage, u32::MAX);
        assert_eq!(result.threshold_damage, u32::MAX);
    }

    #[test]
    fn test_single_weapon_threshold() {
        let unit = templates::aerospace_fighter(UnitId(1), "Stuka", 10);
        let mut req = request(&unit, 0, 20);
        req.hit.single_weapon_value = Some(5);
        assert_eq!(
            modify(&unit, &req, &RulesConfig::default()).threshold_damage,
            5
        );

        let mut rules = RulesConfig::default();
        rules.options.aero_sanity = true;
        assert_eq!(modify(&unit, &req, &rules).threshold_damage, 20);
    }

    #[test]
    fn test_neural_feedback_bonus() {
        let mut unit = templates::walker(UnitId(1), "Marauder");
        unit.neural_interface = Some(NeuralInterface::Direct);
        assert_eq!(
            modify(&unit, &request(&unit, 1, 5), &RulesConfig::default()).damage,
            6
        );
        assert_eq!(
            modify(&unit, &request(&unit, 1, 0), &RulesConfig::default()).damage,
            0
        );
    }

    #[test]
    fn test_blast_containment_halves_explosions() {
        let mut unit = templates::walker(UnitId(1), "Catapult");
        unit.blast_containment = true;
        let req = DamageRequest::ammo_explosion(unit.id, 2, 45);
        let result = modify(&unit, &req, &RulesConfig::default());
        assert_eq!(result.damage, 22);
        assert!(matches!(
            result.events[0],
            ReportEvent::DamageAdjusted {
                reason: Adjustment::BlastContainment,
                ..
            }
        ));
    }
}
