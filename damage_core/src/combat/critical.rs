//! Critical counters - Guaranteed and special critical checks, crew feedback

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::{CriticalRequest, GameContext};
use crate::damage::DamageRequest;
use crate::defense::{owes_bar_critical, special_critical_modifier};
use crate::report::ReportEvent;
use crate::types::{ArmorMaterial, Dice, NeuralInterface};
use tracing::{debug, trace};

/// Largest bonus the damage-scaled critical rule can add
const MAX_DAMAGE_BONUS: u32 = 4;

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// Critical checks owed by one surviving location.
    ///
    /// Structure penetration, here or at a location that transferred into
    /// this one, owes one guaranteed check. Without it, an extra-chance hit
    /// stopped by eligible armor and a barrier rating exceeded by the
    /// original damage each owe a special check.
    pub(super) fn location_criticals(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
        index: usize,
        entering: u32,
        armor_held: bool,
        penetrated: bool,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let location = self.location(id, index)?;

        let guaranteed = u32::from(penetrated);
        let mut special = 0;
        if !penetrated && entering > 0 {
            if armor_held
                && request.hit.extra_critical_chance
                && !location.armor_material.blocks_special_criticals()
            {
                special += 1;
            }
            if owes_bar_critical(location, entering) {
                special += 1;
            }
        }
        if guaranteed == 0 && special == 0 {
            return Ok(());
        }

        let guaranteed_modifier = self.guaranteed_modifier(request, state, index)?;
        let special_modifier =
            special_critical_modifier(location, &request.hit, &self.rules.options);
        trace!(unit = %id, location = index, guaranteed, special, "critical counters");

        for _ in 0..guaranteed {
            self.critical(request, state, index, guaranteed_modifier)?;
        }
        for _ in 0..special {
            if self.is_destroyed(id) {
                break;
            }
            self.critical(request, state, index, special_modifier)?;
        }
        Ok(())
    }

    fn guaranteed_modifier(
        &self,
        request: &DamageRequest,
        state: &HitState,
        index: usize,
    ) -> Result<i32, DamageError> {
        let defender = self.unit(request.unit)?;
        let location = self.location(request.unit, index)?;

        let mut modifier = request.hit.critical_modifier;
        if self.rules.options.damage_scaled_critical_bonus {
            let bonus = (state.original.saturating_sub(1) / 5).min(MAX_DAMAGE_BONUS);
            modifier += bonus as i32;
        }
        let expert = request
            .hit
            .attacker
            .and_then(|a| self.roster.get(a))
            .and_then(|a| a.crew.expert_targeting);
        if expert == Some(defender.archetype) {
            modifier += 1;
        }
        if location.armor_material == ArmorMaterial::Hardened {
            modifier -= 2;
        }
        Ok(modifier)
    }

    /// One critical check through the context; detonations recurse
    pub(super) fn critical(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
        index: usize,
        modifier: i32,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let check = CriticalRequest {
            unit: id,
            location: index,
            rear: state.rear,
            modifier,
            original_damage: state.original,
            category: request.hit.category,
        };
        debug!(unit = %id, location = index, modifier, "critical check");

        let outcome = self.ctx.critical_check(self.roster, self.rules, check);
        self.report.critical_checks += 1;
        if outcome.events.iter().any(|e| {
            matches!(
                e,
                ReportEvent::ComponentDestroyed { .. } | ReportEvent::AmmoExplosion { .. }
            )
        }) {
            state.critical_occurred = true;
        }
        self.report.extend(outcome.events);

        for (location, damage) in outcome.detonations {
            if self.is_destroyed(id) {
                break;
            }
            self.resolve(&DamageRequest::ammo_explosion(id, location, damage))?;
        }
        Ok(())
    }

    /// Feedback injury to a crew wired into the unit
    pub(super) fn neural_feedback(&mut self, request: &DamageRequest, state: &HitState) {
        let id = request.unit;
        let interface = match self.roster.get(id) {
            Some(u) if state.struck && u.crew.is_active() => match u.neural_interface {
                Some(interface) => interface,
                None => return,
            },
            _ => return,
        };
        let constants = &self.rules.constants;

        let injured = match interface {
            NeuralInterface::Direct | NeuralInterface::Buffered => {
                if !state.internal_damage {
                    return;
                }
                self.ctx.roll_dice(Dice::TWO_D6) >= constants.neural_injury_target
            }
            NeuralInterface::Prototype => {
                let target = if state.internal_damage || state.critical_occurred {
                    constants.prototype_internal_target
                } else {
                    constants.prototype_armor_target
                };
                self.ctx.roll_dice(Dice::TWO_D6) < target
            }
        };
        if !injured {
            return;
        }

        debug!(unit = %id, ?interface, "neural feedback injures crew");
        let events = self.ctx.injure_crew(self.roster, self.rules, id, 1);
        self.report.extend(events);
    }
}
