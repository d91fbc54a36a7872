//! Transfer loop - Armor, structure and onward transfer location by location

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::GameContext;
use crate::damage::DamageRequest;
use crate::defense::{apply_structure, StructureHit};
use crate::report::ReportEvent;
use crate::unit::Transfer;
use tracing::{debug, trace};

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// Walk the transfer chain until the damage is spent or a terminal is hit.
    ///
    /// Each location is visited at most once per chain; the graph was checked
    /// for cycles up front, the visit bound catches anything else. Damage that
    /// arrives through structure exhaustion owes a guaranteed critical check
    /// at the first surviving location it reaches.
    pub(super) fn transfer_loop(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let limit = self.unit(id)?.locations.len();
        let mut current = request.hit.location;
        let mut first = true;
        let mut exhausted = false;
        let mut visits = 0;

        while state.damage > 0 && !self.is_destroyed(id) {
            visits += 1;
            if visits > limit {
                return Err(DamageError::TransferCycle {
                    unit: id,
                    location: current,
                });
            }
            self.report.locations_visited += 1;

            let (destroyed, transfer) = {
                let location = self.location(id, current)?;
                (location.destroyed, location.transfer)
            };
            if destroyed {
                trace!(unit = %id, location = current, "passing through destroyed location");
                match self.follow_transfer(request, state, current, transfer)? {
                    Some(next) => {
                        current = next;
                        continue;
                    }
                    None => break,
                }
            }

            if !first {
                self.modular_armor(request, current, state)?;
                if state.damage == 0 {
                    if exhausted {
                        self.location_criticals(request, state, current, 0, false, true)?;
                    }
                    break;
                }
            }
            first = false;

            let entering = state.damage;
            let armor = self.material_armor(request, current, state)?;
            let structure = if state.damage > 0 {
                Some(self.structure(request, current, state)?)
            } else {
                None
            };
            let penetrated = structure.map_or(false, |s| s.loss > 0);
            let destroyed_here = structure.map_or(false, |s| s.destroyed);

            if !destroyed_here {
                let guaranteed = penetrated || exhausted;
                self.location_criticals(request, state, current, entering, armor.held, guaranteed)?;
            }
            self.breach(request, current, armor.destroyed || penetrated, destroyed_here);

            if !destroyed_here {
                break;
            }
            self.location_destroyed(request, state, current)?;
            exhausted = true;
            match self.follow_transfer(request, state, current, transfer)? {
                Some(next) => current = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Internal structure at `index`; leaves the overflow in `state.damage`
    fn structure(
        &mut self,
        request: &DamageRequest,
        index: usize,
        state: &mut HitState,
    ) -> Result<StructureHit, DamageError> {
        let id = request.unit;
        let location = self.location_mut(id, index)?;
        let hit = apply_structure(location.structure, location.structure_material, state.damage);
        location.structure = hit.remaining;
        if hit.loss > 0 {
            location.internal_damaged = true;
        }
        if hit.destroyed {
            location.destroy();
        }

        state.damage = hit.overflow;
        if hit.loss > 0 {
            state.struck = true;
            state.internal_damage = true;
            self.report.structure_damage += hit.loss;
            self.push(ReportEvent::StructureDamaged {
                unit: id,
                location: index,
                damage: hit.loss,
                remaining: hit.remaining,
            });
        }
        if hit.destroyed {
            debug!(unit = %id, location = index, overflow = hit.overflow, "location destroyed");
            self.push(ReportEvent::LocationDestroyed {
                unit: id,
                location: index,
            });
        }
        Ok(hit)
    }

    /// Resolve what happens to the overflow at a destroyed location.
    ///
    /// Returns the next location to visit, if any.
    fn follow_transfer(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
        index: usize,
        transfer: Transfer,
    ) -> Result<Option<usize>, DamageError> {
        let id = request.unit;
        match transfer {
            Transfer::None => {
                if state.damage > 0 {
                    self.push(ReportEvent::DamageLost {
                        unit: id,
                        location: index,
                        damage: state.damage,
                    });
                    state.damage = 0;
                }
                Ok(None)
            }
            Transfer::Destroyed => {
                self.destroy_from_location(request, state, index)?;
                Ok(None)
            }
            Transfer::Location(next) => {
                let contained = self.location(id, index)?.containment.is_present();
                if request.ammo_explosion && contained {
                    if state.damage > 0 {
                        self.push(ReportEvent::DamageVented {
                            unit: id,
                            location: index,
                            damage: state.damage,
                        });
                        state.damage = 0;
                    }
                    return Ok(None);
                }
                if state.damage == 0 {
                    return Ok(None);
                }
                self.push(ReportEvent::DamageTransferred {
                    unit: id,
                    from: index,
                    to: next,
                    damage: state.damage,
                });
                Ok(Some(next))
            }
        }
    }

    /// Seal check for a location exposed under water or in vacuum
    fn breach(&mut self, request: &DamageRequest, index: usize, exposed: bool, destroyed: bool) {
        if destroyed || !exposed {
            return;
        }
        if !request.underwater && !self.rules.environment.vacuum {
            return;
        }
        let id = request.unit;
        let eligible = self.roster.get(id).map_or(false, |u| {
            !u.archetype.is_infantry() && u.location(index).map_or(false, |l| !l.breached)
        });
        if !eligible {
            return;
        }
        let events = self
            .ctx
            .breach_check(self.roster, self.rules, id, index, request.underwater);
        self.report.extend(events);
    }
}
