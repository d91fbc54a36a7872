//! Structure - Internal structure loss by material

use crate::types::StructureMaterial;

/// Result of damage meeting internal structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureHit {
    /// Structure points lost
    pub loss: u32,
    pub remaining: u32,
    /// Damage carried past the location
    pub overflow: u32,
    pub destroyed: bool,
}

/// Apply `damage` to `structure` points of the given material.
///
/// The location survives only while its structure strictly exceeds the
/// converted damage.
pub fn apply_structure(structure: u32, material: StructureMaterial, damage: u32) -> StructureHit {
    let (converted, overflow) = match material {
        StructureMaterial::Standard => (damage, damage.saturating_sub(structure)),
        StructureMaterial::Composite => (
            damage * 2,
            damage.saturating_sub((structure + 1) / 2),
        ),
        StructureMaterial::Reinforced => (
            damage / 2 + damage % 2,
            damage.saturating_sub(structure * 2),
        ),
    };

    if structure > converted {
        StructureHit {
            loss: converted,
            remaining: structure - converted,
            overflow: 0,
            destroyed: false,
        }
    } else {
        StructureHit {
            loss: structure,
            remaining: 0,
            overflow,
            destroyed: true,
        }
    }
}
