//! Damage engine - Entry point, recursion guard and dispatcher

use super::{DamageError, DamageReport};
use crate::config::RulesConfig;
use crate::context::{GameContext, StandardContext};
use crate::damage::{apply_pre_modifiers, DamageRequest};
use crate::report::{DestructionCause, ReportEvent};
use crate::types::{UnitArchetype, UnitId};
use crate::unit::{Location, Transfer, Unit, UnitRoster};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Apply one damage request, returning the ordered report of everything it
/// caused (including riders, swarmers, cargo and detonations it hit in turn).
///
/// Units are mutated as the cascade proceeds. Contract violations (unknown
/// unit, bad location index, cyclic transfer graph) are detected before any
/// mutation and returned as [`DamageError`].
pub fn damage_entity<C: GameContext + ?Sized>(
    roster: &mut UnitRoster,
    ctx: &mut C,
    rules: &RulesConfig,
    request: &DamageRequest,
) -> Result<DamageReport, DamageError> {
    let mut engine = DamageEngine::new(roster, ctx, rules);
    engine.resolve(request)?;
    Ok(engine.report)
}

/// Apply damage with a provided RNG and the standard collaborators
pub fn damage_entity_with_rng(
    roster: &mut UnitRoster,
    rules: &RulesConfig,
    request: &DamageRequest,
    rng: &mut impl Rng,
) -> Result<DamageReport, DamageError> {
    let mut ctx = StandardContext::new(rng);
    damage_entity(roster, &mut ctx, rules, request)
}

/// Per-hit working state carried through the cascade of one unit
#[derive(Debug, Clone)]
pub(super) struct HitState {
    /// Damage still to be placed
    pub damage: u32,
    /// Damage after pre-modifiers, before any layer absorbed it
    pub original: u32,
    pub threshold_damage: u32,
    pub rear: bool,
    /// Armor or structure of this unit took damage
    pub struck: bool,
    pub internal_damage: bool,
    pub critical_occurred: bool,
}

impl HitState {
    fn new(request: &DamageRequest, damage: u32, threshold_damage: u32) -> Self {
        HitState {
            damage,
            original: damage,
            threshold_damage,
            rear: request.hit.rear,
            struck: false,
            internal_damage: false,
            critical_occurred: false,
        }
    }
}

/// Mutable view of the game for the duration of one top-level call
pub(super) struct DamageEngine<'a, C: GameContext + ?Sized> {
    pub roster: &'a mut UnitRoster,
    pub ctx: &'a mut C,
    pub rules: &'a RulesConfig,
    pub report: DamageReport,
    depth: u32,
}

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    fn new(roster: &'a mut UnitRoster, ctx: &'a mut C, rules: &'a RulesConfig) -> Self {
        DamageEngine {
            roster,
            ctx,
            rules,
            report: DamageReport::new(),
            depth: 0,
        }
    }

    // === Lookups ===

    pub(super) fn unit(&self, id: UnitId) -> Result<&Unit, DamageError> {
        self.roster.get(id).ok_or(DamageError::UnknownUnit(id))
    }

    pub(super) fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit, DamageError> {
        self.roster.get_mut(id).ok_or(DamageError::UnknownUnit(id))
    }

    pub(super) fn location(&self, id: UnitId, index: usize) -> Result<&Location, DamageError> {
        self.unit(id)?
            .location(index)
            .ok_or(DamageError::InvalidLocation {
                unit: id,
                location: index,
            })
    }

    pub(super) fn location_mut(
        &mut self,
        id: UnitId,
        index: usize,
    ) -> Result<&mut Location, DamageError> {
        self.unit_mut(id)?
            .location_mut(index)
            .ok_or(DamageError::InvalidLocation {
                unit: id,
                location: index,
            })
    }

    pub(super) fn is_destroyed(&self, id: UnitId) -> bool {
        self.roster.get(id).map_or(true, |u| u.destroyed)
    }

    pub(super) fn push(&mut self, event: ReportEvent) {
        self.report.push(event);
    }

    /// Destroy a unit through the context
    pub(super) fn destroy_unit(
        &mut self,
        id: UnitId,
        cause: DestructionCause,
        salvageable: bool,
        devastating: bool,
    ) {
        debug!(unit = %id, ?cause, salvageable, "unit destroyed");
        let events = self
            .ctx
            .destroy_unit(self.roster, id, cause, salvageable, devastating);
        self.report.extend(events);
    }

    // === Recursion ===

    /// Entry for every request, top-level or nested
    pub(super) fn resolve(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        let limit = self.rules.constants.max_recursion_depth;
        if self.depth >= limit {
            warn!(unit = %request.unit, depth = self.depth, "damage recursion limit reached");
            return Err(DamageError::RecursionLimit(limit));
        }
        self.depth += 1;
        let result = self.dispatch(request);
        self.depth -= 1;
        result
    }

    /// Reject requests the engine cannot apply consistently
    fn validate(&self, request: &DamageRequest) -> Result<(), DamageError> {
        let unit = self.unit(request.unit)?;
        let location = request.hit.location;
        if location >= unit.locations.len() {
            return Err(DamageError::InvalidLocation {
                unit: unit.id,
                location,
            });
        }

        if unit.archetype == UnitArchetype::Squadron {
            match unit.squadron.get(location) {
                Some(member) if self.roster.contains(*member) => {}
                _ => {
                    return Err(DamageError::InvalidSquadronMember {
                        squadron: unit.id,
                        slot: location,
                    })
                }
            }
        }

        let related = unit
            .passengers
            .iter()
            .map(|p| p.unit)
            .chain(unit.swarmed_by)
            .chain(unit.cargo.iter().map(|c| c.unit));
        for id in related {
            if !self.roster.contains(id) {
                return Err(DamageError::UnknownUnit(id));
            }
        }

        check_transfers(unit)
    }

    // === Dispatcher ===

    fn dispatch(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        self.validate(request)?;

        let id = request.unit;
        let index = request.hit.location;
        let unit = self.unit(id)?;
        let archetype = unit.archetype;
        let destroyed = unit.destroyed;
        let near_miss = unit.near_miss == Some(index);
        let location_destroyed = unit.locations[index].destroyed;
        let troopers = unit.living_locations();

        debug!(
            unit = %id,
            %archetype,
            location = index,
            damage = request.damage,
            depth = self.depth,
            "dispatching damage"
        );

        if destroyed {
            self.push(ReportEvent::UnitAlreadyDestroyed { unit: id });
            return Ok(());
        }
        if request.damage == 0 {
            self.push(ReportEvent::NoDamage { unit: id });
            return Ok(());
        }

        match archetype {
            UnitArchetype::Squadron => return self.redirect_to_craft(request),
            UnitArchetype::PoweredInfantry if request.area_saturation => {
                trace!(unit = %id, troopers = troopers.len(), "area attack on every trooper");
                for trooper in troopers {
                    if self.is_destroyed(id) {
                        break;
                    }
                    self.resolve_hit(&request.redirected(id, trooper, request.damage))?;
                }
                return Ok(());
            }
            _ => {}
        }

        if near_miss {
            return self.near_miss(id);
        }
        if location_destroyed {
            self.push(ReportEvent::LocationAlreadyDestroyed {
                unit: id,
                location: index,
            });
            return Ok(());
        }
        self.resolve_hit(request)
    }

    /// Squadron hits land on the member craft in the struck slot
    fn redirect_to_craft(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        let squadron = self.unit(request.unit)?;
        let slot = request.hit.location;
        let craft = match squadron.squadron.get(slot) {
            Some(craft) => *craft,
            None => {
                return Err(DamageError::InvalidSquadronMember {
                    squadron: squadron.id,
                    slot,
                })
            }
        };

        let member = self
            .roster
            .get(craft)
            .ok_or(DamageError::UnknownUnit(craft))?;
        let location = if member.destroyed {
            None
        } else {
            self.ctx.roll_location(member, request.hit.rear)
        };
        let location = match location {
            Some(l) => l,
            None => {
                self.push(ReportEvent::UnitAlreadyDestroyed { unit: craft });
                return Ok(());
            }
        };

        self.push(ReportEvent::SquadronRedirect {
            squadron: request.unit,
            craft,
            location,
        });
        self.resolve(&request.redirected(craft, location, request.damage))
    }

    fn near_miss(&mut self, id: UnitId) -> Result<(), DamageError> {
        self.push(ReportEvent::NearMiss { unit: id });
        let unit = self.unit_mut(id)?;
        if unit.glider {
            unit.wing_hits += 1;
            let wing_hits = unit.wing_hits;
            self.push(ReportEvent::WingDamaged { unit: id, wing_hits });
        }
        Ok(())
    }

    /// Pre-modifiers, then the archetype handler, then crew feedback
    pub(super) fn resolve_hit(&mut self, request: &DamageRequest) -> Result<(), DamageError> {
        let unit = self.unit(request.unit)?;
        let location = self.location(request.unit, request.hit.location)?;
        let modified = apply_pre_modifiers(unit, request, location, self.rules);
        let archetype = unit.archetype;

        trace!(
            unit = %request.unit,
            raw = request.damage,
            modified = modified.damage,
            threshold = modified.threshold_damage,
            "pre-modifiers applied"
        );
        self.report.extend(modified.events);
        if modified.damage == 0 {
            self.push(ReportEvent::NoDamage { unit: request.unit });
            return Ok(());
        }

        let mut state = HitState::new(request, modified.damage, modified.threshold_damage);
        match archetype {
            UnitArchetype::ConventionalInfantry => self.platoon_damage(request, &mut state)?,
            UnitArchetype::Aerospace => self.aero_damage(request, &mut state)?,
            UnitArchetype::Vehicle if request.ammo_explosion => {
                self.vehicle_ammo_explosion(request, &state)?
            }
            _ => {
                if self.outer_layers(request, &mut state)? {
                    self.transfer_loop(request, &mut state)?;
                }
            }
        }

        self.neural_feedback(request, &state);
        Ok(())
    }
}

/// Every transfer chain must end in a terminal within the location count
fn check_transfers(unit: &Unit) -> Result<(), DamageError> {
    let count = unit.locations.len();
    for start in 0..count {
        let mut current = start;
        let mut steps = 0;
        while let Transfer::Location(next) = unit.locations[current].transfer {
            if next >= count {
                return Err(DamageError::InvalidLocation {
                    unit: unit.id,
                    location: next,
                });
            }
            steps += 1;
            if steps > count {
                return Err(DamageError::TransferCycle {
                    unit: unit.id,
                    location: start,
                });
            }
            current = next;
        }
    }
    Ok(())
}
