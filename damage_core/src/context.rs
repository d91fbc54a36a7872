//! GameContext - Collaborators the engine calls out to
//!
//! The engine never rolls dice or touches game-level consequences directly.
//! Everything outside the damage cascade goes through this trait: dice,
//! ammunition detonation, unit destruction, crew effects, critical hits,
//! secondary explosions and hull breaches. Only [`GameContext::roll_dice`]
//! is required; the other methods carry the standard rules as defaults.

use crate::config::RulesConfig;
use crate::report::{DestructionCause, ReportEvent};
use crate::types::{Coords, DamageCategory, Dice, UnitId};
use crate::unit::{ComponentKind, Unit, UnitRoster};
use rand::Rng;
use std::collections::VecDeque;

/// Engine hits that destroy a unit
pub const LETHAL_ENGINE_HITS: u32 = 3;

/// A detonated store: what was reported and the damage it releases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detonation {
    pub events: Vec<ReportEvent>,
    pub damage: u32,
}

/// One critical-component check requested by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalRequest {
    pub unit: UnitId,
    pub location: usize,
    pub rear: bool,
    pub modifier: i32,
    /// Damage of the hit before any modifier
    pub original_damage: u32,
    pub category: DamageCategory,
}

/// Result of a critical check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalOutcome {
    pub events: Vec<ReportEvent>,
    /// Stores that blew up, as (location, damage); the engine applies them
    pub detonations: Vec<(usize, u32)>,
}

/// Collaborator interface of the damage engine
pub trait GameContext {
    /// Roll a die expression
    fn roll_dice(&mut self, dice: Dice) -> u32;

    /// Detonate the store at `slot`, emptying it
    fn explode_store(
        &mut self,
        roster: &mut UnitRoster,
        unit: UnitId,
        location: usize,
        slot: usize,
    ) -> Detonation {
        let component = match roster
            .get_mut(unit)
            .and_then(|u| u.location_mut(location))
            .and_then(|l| l.components.get_mut(slot))
        {
            Some(c) => c,
            None => return Detonation::default(),
        };
        let name = component.name.clone();
        let damage = component.expend();
        if damage == 0 {
            return Detonation::default();
        }
        Detonation {
            events: vec![ReportEvent::AmmoExplosion {
                unit,
                location,
                component: name,
                damage,
            }],
            damage,
        }
    }

    /// Mark a unit destroyed
    fn destroy_unit(
        &mut self,
        roster: &mut UnitRoster,
        unit: UnitId,
        cause: DestructionCause,
        salvageable: bool,
        devastating: bool,
    ) -> Vec<ReportEvent> {
        let target = match roster.get_mut(unit) {
            Some(u) if !u.destroyed => u,
            _ => return Vec::new(),
        };
        target.destroyed = true;
        target.salvageable = salvageable;
        vec![ReportEvent::UnitDestroyed {
            unit,
            cause,
            salvageable,
            devastating,
        }]
    }

    /// Get the crew out of the unit
    fn eject_crew(
        &mut self,
        roster: &mut UnitRoster,
        unit: UnitId,
        forced: bool,
        headshot: bool,
    ) -> Vec<ReportEvent> {
        let target = match roster.get_mut(unit) {
            Some(u) if !u.crew.dead && !u.crew.ejected => u,
            _ => return Vec::new(),
        };
        target.crew.ejected = true;
        target.crew.doomed = false;
        vec![ReportEvent::CrewEjected {
            unit,
            forced,
            headshot,
        }]
    }

    /// Inflict injury points; a crew killed this way takes the unit with it
    fn injure_crew(
        &mut self,
        roster: &mut UnitRoster,
        rules: &RulesConfig,
        unit: UnitId,
        points: u32,
    ) -> Vec<ReportEvent> {
        let target = match roster.get_mut(unit) {
            Some(u) if points > 0 && !u.crew.dead && !u.crew.ejected => u,
            _ => return Vec::new(),
        };
        let killed = target.crew.injure(points, rules.constants.max_crew_injuries);
        let mut events = vec![ReportEvent::CrewInjured {
            unit,
            points,
            total: target.crew.injuries,
        }];
        if killed {
            events.push(ReportEvent::CrewKilled { unit });
            let cause = DestructionCause::CrewKilled;
            events.extend(self.destroy_unit(roster, unit, cause, true, false));
        }
        events
    }

    /// Roll on the critical table and apply the hits
    fn critical_check(
        &mut self,
        roster: &mut UnitRoster,
        rules: &RulesConfig,
        request: CriticalRequest,
    ) -> CriticalOutcome {
        let mut outcome = CriticalOutcome::default();
        let unit = request.unit;
        let location = request.location;

        let roll = self.roll_dice(Dice::TWO_D6);
        let hits = rules
            .constants
            .critical_hits_for(roll as i32 + request.modifier);
        outcome.events.push(ReportEvent::CriticalRoll {
            unit,
            location,
            roll,
            modifier: request.modifier,
            hits,
        });

        for _ in 0..hits {
            let slots = match roster.get(unit).and_then(|u| u.location(location)) {
                Some(l) => l.critical_slots(),
                None => break,
            };
            if slots.is_empty() {
                break;
            }
            let pick = self.roll_dice(Dice::new(1, slots.len() as u32));
            let slot = slots[(pick.max(1) as usize - 1).min(slots.len() - 1)];
            apply_critical_hit(self, roster, unit, location, slot, &mut outcome);
        }
        outcome
    }

    /// Secondary blast around a destroyed unit
    fn area_explosion(
        &mut self,
        _roster: &mut UnitRoster,
        unit: UnitId,
        damage_levels: Vec<u32>,
        position: Option<Coords>,
    ) -> Vec<ReportEvent> {
        vec![ReportEvent::AreaExplosion {
            unit,
            position,
            damage_levels,
        }]
    }

    /// Check whether an exposed location loses its seal
    fn breach_check(
        &mut self,
        roster: &mut UnitRoster,
        rules: &RulesConfig,
        unit: UnitId,
        location: usize,
        _underwater: bool,
    ) -> Vec<ReportEvent> {
        let roll = self.roll_dice(Dice::TWO_D6);
        if roll < rules.constants.breach_target {
            return Vec::new();
        }
        match roster.get_mut(unit).and_then(|u| u.location_mut(location)) {
            Some(l) if !l.breached && !l.destroyed => {
                l.breached = true;
                vec![ReportEvent::HullBreach { unit, location }]
            }
            _ => Vec::new(),
        }
    }

    /// Pick a hit location on a unit, used for squadron redirection
    fn roll_location(&mut self, unit: &Unit, _rear: bool) -> Option<usize> {
        let living = unit.living_locations();
        if living.is_empty() {
            return None;
        }
        let pick = self.roll_dice(Dice::new(1, living.len() as u32));
        Some(living[(pick.max(1) as usize - 1).min(living.len() - 1)])
    }

    /// Leave wreckage of a severed limb on the map
    fn place_debris(&mut self, unit: UnitId, position: Coords) -> Vec<ReportEvent> {
        vec![ReportEvent::DebrisPlaced { unit, position }]
    }
}

/// Destroy one component picked by a critical roll
fn apply_critical_hit<C: GameContext + ?Sized>(
    ctx: &mut C,
    roster: &mut UnitRoster,
    unit: UnitId,
    location: usize,
    slot: usize,
    outcome: &mut CriticalOutcome,
) {
    let kind = match roster
        .get(unit)
        .and_then(|u| u.location(location))
        .and_then(|l| l.components.get(slot))
    {
        Some(c) => c.kind,
        None => return,
    };

    if let ComponentKind::Ammo { .. } = kind {
        let detonation = ctx.explode_store(roster, unit, location, slot);
        outcome.events.extend(detonation.events);
        if detonation.damage > 0 {
            outcome.detonations.push((location, detonation.damage));
        }
        return;
    }

    let target = match roster.get_mut(unit) {
        Some(u) => u,
        None => return,
    };
    let component = match target
        .location_mut(location)
        .and_then(|l| l.components.get_mut(slot))
    {
        Some(c) => c,
        None => return,
    };
    component.destroyed = true;
    outcome.events.push(ReportEvent::ComponentDestroyed {
        unit,
        location,
        component: component.name.clone(),
    });

    match kind {
        ComponentKind::Engine => {
            target.engine_hits += 1;
            let total = target.engine_hits;
            outcome.events.push(ReportEvent::EngineHit { unit, total });
            if total >= LETHAL_ENGINE_HITS {
                outcome.events.extend(ctx.destroy_unit(
                    roster,
                    unit,
                    DestructionCause::EngineHits,
                    true,
                    false,
                ));
            }
        }
        ComponentKind::Cockpit => {
            if !target.crew.dead && !target.crew.ejected {
                target.crew.dead = true;
                outcome.events.push(ReportEvent::CrewKilled { unit });
                outcome.events.extend(ctx.destroy_unit(
                    roster,
                    unit,
                    DestructionCause::CrewKilled,
                    true,
                    false,
                ));
            }
        }
        _ => {}
    }
}

/// Dice backed by any `rand` generator
#[derive(Debug)]
pub struct StandardContext<R: Rng> {
    rng: R,
}

impl<R: Rng> StandardContext<R> {
    pub fn new(rng: R) -> Self {
        StandardContext { rng }
    }
}

impl<R: Rng> GameContext for StandardContext<R> {
    fn roll_dice(&mut self, dice: Dice) -> u32 {
        (0..dice.count)
            .map(|_| self.rng.gen_range(1..=dice.sides.max(1)))
            .sum()
    }
}

/// Replays a fixed sequence of die results (for deterministic testing)
///
/// Every roll consumes the next scripted value, clamped to what the die
/// expression can produce. Once the script runs out, `fallback` is used.
#[derive(Debug, Clone)]
pub struct ScriptedContext {
    rolls: VecDeque<u32>,
    fallback: u32,
    /// Every roll made so far, in order
    pub history: Vec<(Dice, u32)>,
}

impl ScriptedContext {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        ScriptedContext {
            rolls: rolls.into_iter().collect(),
            fallback: 2,
            history: Vec::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl GameContext for ScriptedContext {
    fn roll_dice(&mut self, dice: Dice) -> u32 {
        let raw = self.rolls.pop_front().unwrap_or(self.fallback);
        let value = raw.clamp(dice.min(), dice.max().max(dice.min()));
        self.history.push((dice, value));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocationRole;
    use crate::unit::templates::{self, walker};
    use crate::unit::{Component, Location};
    use rand::SeedableRng;

    #[test]
    fn test_scripted_rolls_are_clamped() {
        let mut ctx = ScriptedContext::new([13, 0, 4]);
        assert_eq!(ctx.roll_dice(Dice::TWO_D6), 12);
        assert_eq!(ctx.roll_dice(Dice::TWO_D6), 2);
        assert_eq!(ctx.roll_dice(Dice::D6), 4);
        assert_eq!(ctx.roll_dice(Dice::D6), 2);
        assert_eq!(ctx.history.len(), 4);
    }

    #[test]
    fn test_standard_rolls_in_range() {
        let mut ctx = StandardContext::new(rand::rngs::StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let roll = ctx.roll_dice(Dice::TWO_D6);
            assert!((2..=12).contains(&roll));
        }
    }

    #[test]
    fn test_destroy_unit_once() {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(UnitId(1), "Awesome"));
        let mut ctx = ScriptedContext::new([]);

        let cause = DestructionCause::LocationLost;
        let events = ctx.destroy_unit(&mut roster, UnitId(1), cause, true, false);
        assert_eq!(events.len(), 1);
        let again = ctx.destroy_unit(&mut roster, UnitId(1), cause, true, false);
        assert!(again.is_empty());
        assert!(roster.get(UnitId(1)).map_or(false, |u| u.destroyed));
    }

    #[test]
    fn test_lethal_injury_destroys_unit() {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(UnitId(1), "Rifleman"));
        let rules = RulesConfig::default();
        let mut ctx = ScriptedContext::new([]);

        let events = ctx.injure_crew(&mut roster, &rules, UnitId(1), 6);
        assert!(events.contains(&ReportEvent::CrewKilled { unit: UnitId(1) }));
        assert!(roster.get(UnitId(1)).map_or(false, |u| u.destroyed));
    }

    #[test]
    fn test_critical_roll_below_threshold() {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(UnitId(1), "Crab"));
        let rules = RulesConfig::default();
        let mut ctx = ScriptedContext::new([7]);

        let outcome = ctx.critical_check(
            &mut roster,
            &rules,
            CriticalRequest {
                unit: UnitId(1),
                location: walker::CENTER_TORSO,
                rear: false,
                modifier: 0,
                original_damage: 10,
                category: DamageCategory::Energy,
            },
        );
        assert_eq!(outcome.events.len(), 1);
        assert!(outcome.detonations.is_empty());
    }

    #[test]
    fn test_critical_on_ammo_detonates() {
        let mut roster = UnitRoster::new();
        let mut unit = Unit::new(UnitId(1), "Ammo Carrier", crate::types::UnitArchetype::Walker);
        unit.locations.push(
            Location::new("Bay", LocationRole::SideTorso, 5, 5)
                .with_component(Component::ammo("AC/10 Ammo", 10, 10)),
        );
        roster.insert(unit);
        let rules = RulesConfig::default();
        // 2d6 = 8 for one hit, then 1d1 picks the only slot
        let mut ctx = ScriptedContext::new([8, 1]);

        let outcome = ctx.critical_check(
            &mut roster,
            &rules,
            CriticalRequest {
                unit: UnitId(1),
                location: 0,
                rear: false,
                modifier: 0,
                original_damage: 5,
                category: DamageCategory::Ballistic,
            },
        );
        assert_eq!(outcome.detonations, vec![(0, 100)]);
        assert!(matches!(outcome.events[1], ReportEvent::AmmoExplosion { damage: 100, .. }));
    }

    #[test]
    fn test_engine_hits_accumulate() {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(UnitId(1), "Stalker"));
        let rules = RulesConfig::default();
        // 12 → three hits; slots 1, 1, 1 pick the first intact engine each time
        let mut ctx = ScriptedContext::new([12, 1, 1, 1]);

        let outcome = ctx.critical_check(
            &mut roster,
            &rules,
            CriticalRequest {
                unit: UnitId(1),
                location: walker::CENTER_TORSO,
                rear: false,
                modifier: 0,
                original_damage: 20,
                category: DamageCategory::Ballistic,
            },
        );
        let unit = roster.get(UnitId(1)).map(|u| (u.engine_hits, u.destroyed));
        assert_eq!(unit, Some((3, true)));
        assert!(outcome.events.iter().any(|e| matches!(
            e,
            ReportEvent::UnitDestroyed {
                cause: DestructionCause::EngineHits,
                ..
            }
        )));
    }

    #[test]
    fn test_roll_location_skips_destroyed() {
        let mut unit = templates::walker(UnitId(1), "Jenner");
        for i in 0..7 {
            unit.locations[i].destroy();
        }
        let mut ctx = ScriptedContext::new([1]);
        assert_eq!(ctx.roll_location(&unit, false), Some(7));
    }
}
