//! Conventional infantry handler - Divisor, then the armor kit and men pools

use super::engine::{DamageEngine, HitState};
use super::DamageError;
use crate::context::GameContext;
use crate::damage::DamageRequest;
use crate::report::{Adjustment, DestructionCause, ReportEvent};
use tracing::debug;

/// Split damage between the armor kit and the men; the odd point goes to
/// whichever pool has more left, men on a tie
pub(super) fn split_platoon_damage(damage: u32, armor: u32, men: u32) -> (u32, u32) {
    let half = damage / 2;
    if damage % 2 == 0 {
        (half, half)
    } else if armor > men {
        (half + 1, half)
    } else {
        (half, half + 1)
    }
}

impl<'a, C: GameContext + ?Sized> DamageEngine<'a, C> {
    /// A platoon is a single location: armor kit points and men
    pub(super) fn platoon_damage(
        &mut self,
        request: &DamageRequest,
        state: &mut HitState,
    ) -> Result<(), DamageError> {
        let id = request.unit;
        let index = request.hit.location;

        let divisor = self
            .unit(id)?
            .infantry
            .as_ref()
            .map_or(1.0, |p| p.damage_divisor);
        if divisor > 0.0 && (divisor - 1.0).abs() > f64::EPSILON {
            let divided = (state.damage as f64 / divisor).ceil() as u32;
            if divided != state.damage {
                self.push(ReportEvent::DamageAdjusted {
                    unit: id,
                    reason: Adjustment::InfantryDivisor,
                    before: state.damage,
                    after: divided,
                });
                state.damage = divided;
            }
        }
        if state.damage == 0 {
            self.push(ReportEvent::NoDamage { unit: id });
            return Ok(());
        }
        self.report.locations_visited += 1;

        let location = self.location_mut(id, index)?;
        let armor_before = location.armor;
        let (armor_share, men_share) =
            split_platoon_damage(state.damage, location.armor, location.structure);
        let soaked = armor_share.min(location.armor);
        location.set_armor_value(false, armor_before - soaked);

        let to_men = men_share + (armor_share - soaked);
        let casualties = to_men.min(location.structure);
        location.structure -= casualties;
        if casualties > 0 {
            location.internal_damaged = true;
        }
        let men_left = location.structure;
        let armor_left = location.armor;
        let wiped = men_left == 0;
        if wiped {
            location.destroy();
        }

        debug!(unit = %id, soaked, casualties, men_left, "platoon damage");
        state.damage = 0;
        state.struck = true;
        self.report.armor_damage += soaked;
        self.report.structure_damage += casualties;

        if soaked > 0 {
            self.push(ReportEvent::ArmorDamaged {
                unit: id,
                location: index,
                rear: false,
                damage: soaked,
                remaining: armor_left,
            });
            if armor_left == 0 {
                self.push(ReportEvent::ArmorDestroyed {
                    unit: id,
                    location: index,
                    rear: false,
                });
            }
        }
        if casualties > 0 {
            state.internal_damage = true;
            self.push(ReportEvent::StructureDamaged {
                unit: id,
                location: index,
                damage: casualties,
                remaining: men_left,
            });
        }
        if wiped {
            self.push(ReportEvent::LocationDestroyed {
                unit: id,
                location: index,
            });
            self.destroy_unit(id, DestructionCause::SquadWiped, false, false);
        }
        Ok(())
    }
}
