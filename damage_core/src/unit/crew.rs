//! Crew record of a unit

use crate::types::UnitArchetype;
use serde::{Deserialize, Serialize};

/// Pilot or crew of a unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crew {
    /// Injury points taken so far
    #[serde(default)]
    pub injuries: u32,
    /// Will die at the end of the phase
    #[serde(default)]
    pub doomed: bool,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub ejected: bool,
    #[serde(default)]
    pub stunned_turns: u32,

    // === Abilities ===
    /// Eligible for automatic ejection instead of a fatal blow
    #[serde(default)]
    pub skin_of_the_teeth: bool,
    /// Archetype this crew is trained to pick apart
    #[serde(default)]
    pub expert_targeting: Option<UnitArchetype>,
}

impl Crew {
    /// Crew still inside the unit and alive
    pub fn is_active(&self) -> bool {
        !self.dead && !self.ejected && !self.doomed
    }

    /// Apply injury points, returning true if this killed the crew
    pub fn injure(&mut self, points: u32, lethal: u32) -> bool {
        if self.dead {
            return false;
        }
        self.injuries = (self.injuries + points).min(lethal);
        if self.injuries >= lethal {
            self.dead = true;
            return true;
        }
        false
    }
}
