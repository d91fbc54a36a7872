//! Defense arithmetic - Armor materials, structure materials, outer layers
//!
//! Everything here is a pure function; the engine in `combat` applies the
//! results to unit state and reports them.

mod armour;
mod layers;
mod structure;

pub use armour::{
    absorb, owes_bar_critical, special_critical_modifier, transform_damage, Absorption,
    MaterialEffect, MaterialInput,
};
pub use layers::{cowl_share, deflector_share, modular_share};
pub use structure::{apply_structure, StructureHit};
