//! Damage input - HitDescriptor, DamageRequest and the pre-modifier stage

mod hit;
mod modifiers;
mod request;

pub use hit::HitDescriptor;
pub use modifiers::{apply_pre_modifiers, ModifiedDamage};
pub use request::DamageRequest;
