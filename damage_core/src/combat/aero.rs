//! Aerospace handler - Armor, then structural integrity and thresholds

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::GameContext;
use crate::damage::DamageRequest;
use crate::report::{DestructionCause, ReportEvent};
use tracing::{debug, warn};

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// Aerospace craft never transfer between locations: whatever gets past
    /// the armor lands on the structural integrity pool
    pub(super) fn aero_damage(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let index = request.hit.location;

        if self.outer_layers(request, state)? {
            self.report.locations_visited += 1;
            self.material_armor(request, index, state)?;
            if state.damage > 0 {
                self.structural_integrity(request, state)?;
            }
        }

        let threshold = self.location(id, index)?.damage_threshold;
        if let Some(threshold) = threshold {
            if state.threshold_damage > threshold {
                debug!(
                    unit = %id,
                    location = index,
                    damage = state.threshold_damage,
                    threshold,
                    "damage threshold exceeded"
                );
                self.push(ReportEvent::ThresholdExceeded {
                    unit: id,
                    location: index,
                    damage: state.threshold_damage,
                    threshold,
                });
                self.critical(request, state, index, request.hit.critical_modifier)?;
            }
        }
        Ok(())
    }

    fn structural_integrity(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let full = request.ammo_explosion
            || request.nuclear_ship_to_ship
            || self.rules.options.strict_aero_damage;
        let applied = if full {
            state.damage
        } else {
            (state.damage + 1) / 2
        };

        let unit = self.unit_mut(id)?;
        let (loss, remaining) = match unit.aero.as_mut() {
            Some(aero) => {
                let loss = applied.min(aero.structural_integrity);
                aero.structural_integrity -= loss;
                (loss, aero.structural_integrity)
            }
            None => {
                warn!(unit = %id, "aerospace unit without structural integrity");
                (0, 0)
            }
        };

        state.damage = 0;
        state.struck = true;
        state.internal_damage = true;
        self.report.structure_damage += loss;
        self.push(ReportEvent::StructuralIntegrityDamaged {
            unit: id,
            damage: loss,
            remaining,
        });
        if remaining == 0 {
            self.destroy_unit(id, DestructionCause::StructuralIntegrity, true, false);
        }
        Ok(())
    }
}
