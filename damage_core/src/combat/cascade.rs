//! Defensive layer cascade
//!
//! Outer layers guard only the originally struck location, in fixed order:
//! deflector field, head cowl, searchlight, modular armor, riders and
//! swarmers, dumping ammunition. Material armor runs at every location the
//! damage reaches.

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::GameContext;
use crate::damage::DamageRequest;
use crate::defense::{
    absorb, cowl_share, deflector_share, modular_share, transform_damage, MaterialInput,
};
use crate::report::ReportEvent;
use crate::types::{DamageType, Dice, UnitArchetype, UnitId};
use crate::unit::ComponentKind;
use tracing::{debug, trace};

/// What material armor did at one location
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct ArmorOutcome {
    /// Armor was present and stopped everything
    pub held: bool,
    /// Armor reached zero during this visit
    pub destroyed: bool,
}

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// Run the outer layers; false once nothing is left to place
    pub(super) fn outer_layers(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<bool, DamageError> {
        let id = request.unit;

        self.deflector(request, state)?;
        if state.damage == 0 {
            return Ok(false);
        }
        self.cowl(request, state)?;
        if state.damage == 0 {
            return Ok(false);
        }
        self.searchlight(request)?;
        self.modular_armor(request, request.hit.location, state)?;
        if state.damage == 0 {
            return Ok(false);
        }
        self.riders(request, state)?;
        if state.damage == 0 || self.is_destroyed(id) {
            return Ok(false);
        }
        self.dumped_ammunition(request)?;
        Ok(state.damage > 0 && !self.is_destroyed(id))
    }

    fn deflector(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        let hit = &request.hit;
        if request.ammo_explosion || hit.fall || hit.direct_to_structure {
            return Ok(());
        }
        let id = request.unit;
        let unit = self.unit_mut(id)?;
        let field = match unit.deflector.as_mut() {
            Some(f) if f.active && f.points > 0 && f.covers.contains(&hit.location) => f,
            _ => return Ok(()),
        };

        let absorbed = deflector_share(field.kind, field.points, state.damage);
        field.points -= absorbed;
        let remaining = field.points;
        state.damage -= absorbed;

        trace!(unit = %id, absorbed, remaining, "deflector field");
        self.push(ReportEvent::DeflectorAbsorbed {
            unit: id,
            location: hit.location,
            absorbed,
            remaining,
        });
        Ok(())
    }

    fn cowl(&mut self, request: &DamageRequest, state: &mut HitState) -> Result<(), DamageError> {
        if request.ammo_explosion || !request.through_front_arc {
            return Ok(());
        }
        let id = request.unit;
        let capacity = self.rules.constants.cowl_capacity;
        let unit = self.unit_mut(id)?;
        let head = unit
            .location(request.hit.location)
            .map_or(false, |l| l.role.is_head_equivalent());
        let spent = match unit.cowl {
            Some(spent) if head => spent,
            _ => return Ok(()),
        };

        let absorbed = cowl_share(capacity, spent, state.damage);
        if absorbed == 0 {
            return Ok(());
        }
        unit.cowl = Some(spent + absorbed);
        state.damage -= absorbed;

        self.push(ReportEvent::CowlAbsorbed {
            unit: id,
            absorbed,
            remaining: capacity.saturating_sub(spent + absorbed),
        });
        Ok(())
    }

    fn searchlight(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        if request.ammo_explosion {
            return Ok(());
        }
        let id = request.unit;
        let index = request.hit.location;
        let location = self.location_mut(id, index)?;
        if !location.has_searchlight() {
            return Ok(());
        }
        location
            .components
            .iter_mut()
            .filter(|c| c.kind == ComponentKind::Searchlight)
            .for_each(|c| c.destroyed = true);
        self.push(ReportEvent::SearchlightDestroyed {
            unit: id,
            location: index,
        });
        Ok(())
    }

    /// Add-on plating at `index`
    pub(super) fn modular_armor(
        &mut self,
        request: &DamageRequest,
        index: usize,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        if request.ammo_explosion || request.hit.direct_to_structure || state.damage == 0 {
            return Ok(());
        }
        let id = request.unit;
        let location = self.location_mut(id, index)?;
        if location.modular_armor == 0 || location.destroyed {
            return Ok(());
        }

        let absorbed = modular_share(location.modular_armor, state.damage);
        location.modular_armor -= absorbed;
        let remaining = location.modular_armor;
        state.damage -= absorbed;
        state.struck = true;
        self.report.armor_damage += absorbed;

        self.push(ReportEvent::ModularArmorAbsorbed {
            unit: id,
            location: index,
            absorbed,
            remaining,
        });
        Ok(())
    }

    /// Exterior riders absorb first; otherwise a swarmer on a torso may intercept
    fn riders(&mut self, request: &DamageRequest, state: &mut HitState) -> Result<(), DamageError> {
        if request.ammo_explosion {
            return Ok(());
        }
        let id = request.unit;
        let index = request.hit.location;
        let unit = self.unit(id)?;
        let torso = unit.locations[index].role.is_torso_equivalent();
        let rider = match request.damage_type {
            DamageType::IgnoreRider => None,
            _ => unit.exterior_rider_at(index),
        };
        let rider = rider.filter(|r| !self.is_destroyed(*r));
        let swarmer = unit.swarmed_by.filter(|s| torso && !self.is_destroyed(*s));

        if let Some(rider) = rider {
            let amount = self.interception(rider, state.damage);
            if amount == 0 {
                return Ok(());
            }
            self.push(ReportEvent::RiderStruck {
                carrier: id,
                rider,
                damage: amount,
            });
            debug!(carrier = %id, rider = %rider, amount, "rider intercepts");
            self.strike(request, rider, amount)?;
            state.damage -= amount;
        } else if let Some(swarmer) = swarmer {
            let roll = self.ctx.roll_dice(Dice::D6);
            if roll > self.rules.constants.swarm_intercept_target {
                return Ok(());
            }
            let amount = self.interception(swarmer, state.damage);
            if amount == 0 {
                return Ok(());
            }
            self.push(ReportEvent::SwarmerStruck {
                carrier: id,
                swarmer,
                damage: amount,
            });
            debug!(carrier = %id, swarmer = %swarmer, roll, amount, "swarmer intercepts");
            self.strike(request, swarmer, amount)?;
            state.damage -= amount;
        }
        Ok(())
    }

    /// Damage an intercepting unit can take, bounded by what it has left
    pub(super) fn interception(&self, interceptor: UnitId, damage: u32) -> u32 {
        self.roster
            .get(interceptor)
            .map_or(0, |u| u.absorb_capacity().min(damage))
    }

    /// Hit another unit with part of this request through a nested call
    pub(super) fn strike(
        &mut self,
        request: &DamageRequest,
        target: UnitId,
        amount: u32,
    ) -> Result<(), DamageError> {
        let unit = self
            .roster
            .get(target)
            .ok_or(DamageError::UnknownUnit(target))?;
        let location = match self.ctx.roll_location(unit, false) {
            Some(l) => l,
            None => return Ok(()),
        };
        let mut nested = request.redirected(target, location, amount);
        nested.ammo_explosion = false;
        nested.area_saturation = false;
        nested.hit.rear = false;
        nested.hit.direct_to_structure = false;
        nested.hit.fall = false;
        self.resolve(&nested)
    }

    /// Stores being jettisoned blow up when a rear hit lands
    fn dumped_ammunition(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        if request.ammo_explosion {
            return Ok(());
        }
        let id = request.unit;
        let unit = self.unit(id)?;
        let rear_hit =
            request.hit.rear || unit.locations[request.hit.location].role.is_rear_facing();
        if !rear_hit {
            return Ok(());
        }

        for (location, slot) in unit.dumping_stores() {
            if self.is_destroyed(id) {
                break;
            }
            let detonation = self.ctx.explode_store(self.roster, id, location, slot);
            if detonation.damage == 0 {
                self.report.extend(detonation.events);
                continue;
            }
            debug!(unit = %id, location, damage = detonation.damage, "dumped ammunition detonates");
            self.push(ReportEvent::DumpedAmmoDetonated {
                unit: id,
                location,
                damage: detonation.damage,
            });
            self.report.extend(detonation.events);
            self.resolve(&DamageRequest::ammo_explosion(id, location, detonation.damage))?;
        }
        Ok(())
    }

    /// Armor proper at `index`; leaves the overflow in `state.damage`
    pub(super) fn material_armor(
        &mut self,
        request: &DamageRequest,
        index: usize,
        state: &mut HitState,
    ) -> Result<ArmorOutcome, DamageError> {
        if request.hit.direct_to_structure || state.damage == 0 {
            return Ok(ArmorOutcome::default());
        }
        let id = request.unit;
        let powered_attacker = request
            .hit
            .attacker
            .and_then(|a| self.roster.get(a))
            .map_or(false, |a| a.archetype == UnitArchetype::PoweredInfantry);
        let heat_rule = self.rules.options.heat_dissipating_armor;

        let location = self.location_mut(id, index)?;
        let armor = location.armor_value(state.rear);
        if armor == 0 {
            return Ok(ArmorOutcome::default());
        }
        let rear = state.rear && location.rear_armor.is_some();
        let material = location.armor_material;
        let input = MaterialInput {
            category: request.hit.category,
            area_saturation: request.area_saturation,
            heat_weapon: request.hit.heat_weapon,
            powered_infantry: powered_attacker,
            heat_dissipating_rule: heat_rule,
            armor,
        };

        let entering = state.damage;
        let effect = transform_damage(material, entering, &input);
        let result = absorb(material, armor, location.half_point(rear), entering, effect);
        location.set_armor_value(rear, result.armor_after);
        location.set_half_point(rear, result.half_point);

        let lost = armor - result.armor_after;
        state.damage = result.overflow;
        state.struck = true;
        self.report.armor_damage += lost;

        trace!(
            unit = %id,
            location = index,
            ?material,
            entering,
            transformed = effect.damage,
            overflow = result.overflow,
            "armor absorption"
        );
        if effect.damage != entering {
            self.push(ReportEvent::ArmorEffect {
                unit: id,
                location: index,
                material,
                before: entering,
                after: effect.damage,
            });
        }
        self.push(ReportEvent::ArmorDamaged {
            unit: id,
            location: index,
            rear,
            damage: lost,
            remaining: result.armor_after,
        });
        let destroyed = result.armor_after == 0;
        if destroyed {
            self.push(ReportEvent::ArmorDestroyed {
                unit: id,
                location: index,
                rear,
            });
        }

        Ok(ArmorOutcome {
            held: !result.penetrated(),
            destroyed,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::damage_entity;
    use crate::config::RulesConfig;
    use crate::context::ScriptedContext;
    use crate::damage::{DamageRequest, HitDescriptor};
    use crate::report::ReportEvent;
    use crate::types::{ArmorMaterial, DamageCategory, DamageType, DeflectorKind, UnitId};
    use crate::unit::templates::{self, vehicle, walker};
    use crate::unit::{ComponentKind, DeflectorField, Passenger, UnitRoster};

    fn single(unit: crate::unit::Unit) -> UnitRoster {
        let mut roster = UnitRoster::new();
        roster.insert(unit);
        roster
    }

    #[test]
    fn test_deflector_takes_its_share() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        unit.deflector = Some(DeflectorField {
            kind: DeflectorKind::Medium,
            points: 10,
            active: true,
            covers: vec![walker::LEFT_ARM],
        });
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::LEFT_ARM), 10);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert_eq!(
            report.events[0],
            ReportEvent::DeflectorAbsorbed {
                unit: UnitId(1),
                location: walker::LEFT_ARM,
                absorbed: 5,
                remaining: 5,
            }
        );
        assert_eq!(roster.get(UnitId(1)).unwrap().locations[walker::LEFT_ARM].armor, 9);
    }

    #[test]
    fn test_deflector_ignores_falls() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        unit.deflector = Some(DeflectorField {
            kind: DeflectorKind::Heavy,
            points: 10,
            active: true,
            covers: vec![walker::LEFT_LEG],
        });
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let mut hit = HitDescriptor::new(walker::LEFT_LEG);
        hit.fall = true;
        let request = DamageRequest::new(UnitId(1), hit, 8);

        damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        let unit = roster.get(UnitId(1)).unwrap();
        assert_eq!(unit.deflector.as_ref().unwrap().points, 10);
        assert_eq!(unit.locations[walker::LEFT_LEG].armor, 10);
    }

    #[test]
    fn test_cowl_guards_head_from_front() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        unit.cowl = Some(1);
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request =
            DamageRequest::new(UnitId(1), HitDescriptor::new(walker::HEAD), 5).through_front_arc();

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert!(report.events.contains(&ReportEvent::CowlAbsorbed {
            unit: UnitId(1),
            absorbed: 2,
            remaining: 0,
        }));
        let unit = roster.get(UnitId(1)).unwrap();
        assert_eq!(unit.cowl, Some(3));
        assert_eq!(unit.locations[walker::HEAD].armor, 6);
    }

    #[test]
    fn test_searchlight_lost_to_any_hit() {
        let mut roster = single(templates::tank(UnitId(1), "Manticore"));
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(vehicle::FRONT), 1);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert!(report.events.contains(&ReportEvent::SearchlightDestroyed {
            unit: UnitId(1),
            location: vehicle::FRONT,
        }));
        let front = &roster.get(UnitId(1)).unwrap().locations[vehicle::FRONT];
        assert!(front
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Searchlight && c.destroyed));
    }

    #[test]
    fn test_modular_armor_before_material() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        unit.locations[walker::RIGHT_LEG].modular_armor = 4;
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::RIGHT_LEG), 6);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        let leg = &roster.get(UnitId(1)).unwrap().locations[walker::RIGHT_LEG];
        assert_eq!(leg.modular_armor, 0);
        assert_eq!(leg.armor, 16);
        assert_eq!(report.armor_damage, 6);
    }

    #[test]
    fn test_exterior_rider_intercepts() {
        let mut carrier = templates::walker(UnitId(1), "Archer");
        carrier.passengers.push(Passenger {
            unit: UnitId(2),
            location: walker::LEFT_TORSO,
            exterior: true,
        });
        let mut roster = single(carrier);
        roster.insert(templates::battle_armor(UnitId(2), "Elementals", 4, 5));
        // 1d4 picks the first trooper
        let mut ctx = ScriptedContext::new([1]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::LEFT_TORSO), 10);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert_eq!(
            report.events[0],
            ReportEvent::RiderStruck {
                carrier: UnitId(1),
                rider: UnitId(2),
                damage: 10,
            }
        );
        assert_eq!(roster.get(UnitId(1)).unwrap().locations[walker::LEFT_TORSO].armor, 15);
        assert!(roster.get(UnitId(2)).unwrap().locations[0].destroyed);
    }

    #[test]
    fn test_rider_ignoring_hit_reaches_carrier() {
        let mut carrier = templates::walker(UnitId(1), "Archer");
        carrier.passengers.push(Passenger {
            unit: UnitId(2),
            location: walker::LEFT_TORSO,
            exterior: true,
        });
        let mut roster = single(carrier);
        roster.insert(templates::battle_armor(UnitId(2), "Elementals", 4, 5));
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::LEFT_TORSO), 10)
            .with_type(DamageType::IgnoreRider);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, ReportEvent::RiderStruck { .. })));
        assert_eq!(roster.get(UnitId(1)).unwrap().locations[walker::LEFT_TORSO].armor, 5);
        assert_eq!(roster.get(UnitId(2)).unwrap().total_armor(), 20);
    }

    #[test]
    fn test_swarmer_intercepts_torso_hit() {
        let mut carrier = templates::walker(UnitId(1), "Archer");
        carrier.swarmed_by = Some(UnitId(2));
        let mut roster = single(carrier);
        roster.insert(templates::battle_armor(UnitId(2), "Elementals", 4, 5));
        // 1d6 of 2 intercepts, then 1d4 picks the first trooper
        let mut ctx = ScriptedContext::new([2, 1]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::LEFT_TORSO), 10);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert_eq!(
            report.events[0],
            ReportEvent::SwarmerStruck {
                carrier: UnitId(1),
                swarmer: UnitId(2),
                damage: 10,
            }
        );
        assert_eq!(roster.get(UnitId(1)).unwrap().locations[walker::LEFT_TORSO].armor, 15);
        assert!(roster.get(UnitId(2)).unwrap().locations[0].destroyed);
    }

    #[test]
    fn test_swarmer_missed_on_high_roll() {
        let mut carrier = templates::walker(UnitId(1), "Archer");
        carrier.swarmed_by = Some(UnitId(2));
        let mut roster = single(carrier);
        roster.insert(templates::battle_armor(UnitId(2), "Elementals", 4, 5));
        let mut ctx = ScriptedContext::new([3]);
        let rules = RulesConfig::default();
        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::LEFT_TORSO), 10);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert!(!report
            .events
            .iter()
            .any(|e| matches!(e, ReportEvent::SwarmerStruck { .. })));
        assert_eq!(roster.get(UnitId(1)).unwrap().locations[walker::LEFT_TORSO].armor, 5);
        assert_eq!(roster.get(UnitId(2)).unwrap().total_armor(), 20);
    }

    #[test]
    fn test_dumping_ammo_detonates_on_rear_hit() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        if let ComponentKind::Ammo { dumping, .. } =
            &mut unit.locations[walker::LEFT_TORSO].components[0].kind
        {
            *dumping = true;
        }
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let request =
            DamageRequest::new(UnitId(1), HitDescriptor::new(walker::RIGHT_LEG).rear(), 2);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert!(report.events.contains(&ReportEvent::DumpedAmmoDetonated {
            unit: UnitId(1),
            location: walker::LEFT_TORSO,
            damage: 180,
        }));
        assert!(roster.get(UnitId(1)).unwrap().destroyed);
    }

    #[test]
    fn test_reflective_physical_hit() {
        let mut unit = templates::emplacement(UnitId(1), "Bunker", 10, 5);
        unit.locations[0].armor_material = ArmorMaterial::Reflective;
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let hit = HitDescriptor::new(0).with_category(DamageCategory::Physical);
        let request = DamageRequest::new(UnitId(1), hit, 4);

        let report = damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();

        assert_eq!(roster.get(UnitId(1)).unwrap().locations[0].armor, 2);
        assert!(report.events.contains(&ReportEvent::ArmorEffect {
            unit: UnitId(1),
            location: 0,
            material: ArmorMaterial::Reflective,
            before: 4,
            after: 8,
        }));
    }

    #[test]
    fn test_hardened_half_points() {
        let mut unit = templates::emplacement(UnitId(1), "Bunker", 3, 5);
        unit.locations[0].armor_material = ArmorMaterial::Hardened;
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();

        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(0), 1);
        damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();
        let location = &roster.get(UnitId(1)).unwrap().locations[0];
        assert_eq!(location.armor, 3);
        assert!(location.hardened_half_point);

        let request = DamageRequest::new(UnitId(1), HitDescriptor::new(0), 1);
        damage_entity(&mut roster, &mut ctx, &rules, &request).unwrap();
        let location = &roster.get(UnitId(1)).unwrap().locations[0];
        assert_eq!(location.armor, 2);
        assert!(!location.hardened_half_point);
    }

    #[test]
    fn test_hardened_half_points_per_arc() {
        let mut unit = templates::walker(UnitId(1), "Archer");
        unit.locations[walker::CENTER_TORSO].armor_material = ArmorMaterial::Hardened;
        let mut roster = single(unit);
        let mut ctx = ScriptedContext::new([]);
        let rules = RulesConfig::default();
        let rear =
            DamageRequest::new(UnitId(1), HitDescriptor::new(walker::CENTER_TORSO).rear(), 1);
        let front = DamageRequest::new(UnitId(1), HitDescriptor::new(walker::CENTER_TORSO), 1);

        damage_entity(&mut roster, &mut ctx, &rules, &rear).unwrap();
        damage_entity(&mut roster, &mut ctx, &rules, &front).unwrap();
        let location = &roster.get(UnitId(1)).unwrap().locations[walker::CENTER_TORSO];
        assert_eq!(location.armor, 20);
        assert_eq!(location.rear_armor, Some(8));
        assert!(location.hardened_half_point);
        assert!(location.rear_hardened_half_point);

        damage_entity(&mut roster, &mut ctx, &rules, &rear).unwrap();
        let location = &roster.get(UnitId(1)).unwrap().locations[walker::CENTER_TORSO];
        assert_eq!(location.armor, 20);
        assert_eq!(location.rear_armor, Some(7));
        assert!(!location.rear_hardened_half_point);
    }
}
