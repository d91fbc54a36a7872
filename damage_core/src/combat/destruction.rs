//! Destruction - Consequences of losing a location or the whole unit

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::GameContext;
use crate::damage::DamageRequest;
use crate::report::{DestructionCause, ReportEvent};
use crate::types::{Coords, Dice, LocationRole, UnitArchetype, UnitId};
use tracing::{debug, info};

/// Pilot injury when a ProtoMech loses a location of this role
fn proto_pilot_hits(role: LocationRole) -> u32 {
    match role {
        LocationRole::Head | LocationRole::Arm | LocationRole::Leg => 1,
        _ => 0,
    }
}

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// Side effects of a location that was just destroyed
    pub(super) fn location_destroyed(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
        index: usize,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let unit = self.unit(id)?;
        let archetype = unit.archetype;
        let role = unit.locations[index].role;
        let position = unit.position;
        let cargo = unit.cargo_at(index);
        let limb = unit.locations[index]
            .attached_limb
            .filter(|limb| unit.location(*limb).map_or(false, |l| !l.destroyed && l.structure > 0));

        if let Some(limb) = limb {
            self.sever_limb(id, limb, position)?;
        }
        for carried in cargo {
            self.drop_cargo(request, state, carried)?;
        }

        match archetype {
            UnitArchetype::ProtoMech => {
                let points = proto_pilot_hits(role);
                if points > 0 {
                    let events = self.ctx.injure_crew(self.roster, self.rules, id, points);
                    self.report.extend(events);
                }
            }
            UnitArchetype::PoweredInfantry => {
                if self.unit(id)?.all_locations_destroyed() {
                    self.destroy_unit(id, DestructionCause::SquadWiped, false, false);
                }
            }
            UnitArchetype::Vehicle if role == LocationRole::Rotor => {
                self.rotor_lost(id)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn sever_limb(
        &mut self,
        id: UnitId,
        limb: usize,
        position: Option<Coords>,
    ) -> Result<(), DamageError> {
        self.location_mut(id, limb)?.destroy();
        debug!(unit = %id, location = limb, "limb severed");
        self.push(ReportEvent::LimbSevered {
            unit: id,
            location: limb,
        });
        if let Some(position) = position {
            let events = self.ctx.place_debris(id, position);
            self.report.extend(events);
        }
        Ok(())
    }

    /// Cargo falls out and takes part of the overflow with it
    fn drop_cargo(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
        carried: UnitId,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        self.unit_mut(id)?.cargo.retain(|c| c.unit != carried);
        self.push(ReportEvent::CargoDropped {
            carrier: id,
            cargo: carried,
        });

        let amount = self.interception(carried, state.damage);
        if amount == 0 {
            return Ok(());
        }
        self.strike(request, carried, amount)?;
        state.damage -= amount;
        Ok(())
    }

    /// Rotor-mounted equipment goes down with the rotor, and so does the craft
    fn rotor_lost(&mut self, id: UnitId) -> Result<(), DamageError> {
        let unit = self.unit_mut(id)?;
        let mut lost = Vec::new();
        for (index, location) in unit.locations.iter_mut().enumerate() {
            for component in location.components.iter_mut() {
                if component.rotor_mounted && !component.destroyed {
                    component.destroyed = true;
                    lost.push((index, component.name.clone()));
                }
            }
        }
        for (location, component) in lost {
            self.push(ReportEvent::RotorEquipmentDestroyed {
                unit: id,
                location,
                component,
            });
        }
        self.destroy_unit(id, DestructionCause::RotorLost, true, false);
        Ok(())
    }

    /// The transfer chain reached the unit-wide terminal
    pub(super) fn destroy_from_location(
        &mut self,
        request: &DamageRequest,
        state: &HitState,
        index: usize,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let unit = self.unit(id)?;
        if unit.destroyed {
            return Ok(());
        }
        let archetype = unit.archetype;
        let location = &unit.locations[index];
        let role = location.role;
        let contained = location.containment.is_present();
        let crew_active = unit.crew.is_active();
        let can_eject = unit.can_eject();
        let skin_of_the_teeth = unit.crew.skin_of_the_teeth;
        let options = &self.rules.options;

        if options.engine_explosions && archetype.has_engine_explosion_check() {
            let roll = self.ctx.roll_dice(Dice::TWO_D6);
            if roll >= self.rules.constants.engine_explosion_target {
                info!(unit = %id, roll, "engine explosion");
                self.push(ReportEvent::EngineExplosion { unit: id });
                self.destroy_unit(id, DestructionCause::EngineCollapse, false, true);
            }
        }
        if !self.is_destroyed(id) {
            let (cause, salvageable) = if request.ammo_explosion {
                (DestructionCause::AmmunitionExplosion, !role.is_body_equivalent())
            } else {
                (DestructionCause::LocationLost, true)
            };
            self.destroy_unit(id, cause, salvageable, false);
        }

        if crew_active && (role.is_head_equivalent() || role.is_torso_equivalent()) {
            if self.rules.options.skin_of_the_teeth && skin_of_the_teeth && can_eject {
                let headshot = role.is_head_equivalent();
                let events = self.ctx.eject_crew(self.roster, id, true, headshot);
                self.report.extend(events);
            } else {
                self.unit_mut(id)?.crew.doomed = true;
                self.push(ReportEvent::CrewDoomed { unit: id });
            }
        }

        if request.ammo_explosion && self.rules.options.advanced_ammunition && !contained {
            self.secondary_explosion(id, state.original);
        }
        Ok(())
    }

    /// Ammunition explosion inside a vehicle: containment stuns, otherwise it kills
    pub(super) fn vehicle_ammo_explosion(
        &mut self,
        request: &DamageRequest,
        state: &HitState,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let index = request.hit.location;
        let contained = self.location(id, index)?.containment.is_present();

        if contained {
            let turns = self.rules.constants.crew_stun_turns;
            let crew = &mut self.unit_mut(id)?.crew;
            crew.stunned_turns = crew.stunned_turns.max(turns);
            self.push(ReportEvent::CrewStunned { unit: id, turns });
            self.push(ReportEvent::DamageVented {
                unit: id,
                location: index,
                damage: state.damage,
            });
            return Ok(());
        }

        let crew = &mut self.unit_mut(id)?.crew;
        if !crew.dead && !crew.ejected {
            crew.dead = true;
            self.push(ReportEvent::CrewKilled { unit: id });
        }
        self.destroy_unit(id, DestructionCause::AmmunitionExplosion, false, false);
        if self.rules.options.advanced_ammunition {
            self.secondary_explosion(id, state.original);
        }
        Ok(())
    }

    /// Blast around the wreck at a tenth and a twentieth of the damage
    fn secondary_explosion(&mut self, id: UnitId, damage: u32) {
        let position = self.roster.get(id).and_then(|u| u.position);
        let levels = vec![damage / 10, damage / 20];
        debug!(unit = %id, ?levels, "secondary explosion");
        let events = self.ctx.area_explosion(self.roster, id, levels, position);
        self.report.extend(events);
    }
}
