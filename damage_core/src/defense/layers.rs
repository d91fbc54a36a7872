//! Outer defensive layers: deflector field, head cowl and modular armor

use crate::types::DeflectorKind;

/// Portion of `damage` a deflector of `kind` takes, rounded up and capped
/// at the field's remaining `points`
pub fn deflector_share(kind: DeflectorKind, points: u32, damage: u32) -> u32 {
    let (num, den) = kind.fraction();
    let share = damage.saturating_mul(num).div_ceil(den);
    share.min(points)
}

/// Damage a cowl absorbs given its capacity and what it already took
pub fn cowl_share(capacity: u32, spent: u32, damage: u32) -> u32 {
    capacity.saturating_sub(spent).min(damage)
}

/// Damage consumed by add-on plating
pub fn modular_share(plating: u32, damage: u32) -> u32 {
    plating.min(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deflector_fractions_round_up() {
        assert_eq!(deflector_share(DeflectorKind::Light, 50, 10), 3);
        assert_eq!(deflector_share(DeflectorKind::Medium, 50, 9), 5);
        assert_eq!(deflector_share(DeflectorKind::Heavy, 50, 10), 8);
    }

    #[test]
    fn test_deflector_capped_by_points() {
        assert_eq!(deflector_share(DeflectorKind::Heavy, 2, 20), 2);
        assert_eq!(deflector_share(DeflectorKind::Heavy, 0, 20), 0);
    }

    #[test]
    fn test_huge_damage_saturates() {
        assert_eq!(deflector_share(DeflectorKind::Heavy, 50, u32::MAX), 50);
    }

    #[test]
    fn test_cowl_capacity() {
        assert_eq!(cowl_share(3, 0, 10), 3);
        assert_eq!(cowl_share(3, 2, 10), 1);
        assert_eq!(cowl_share(3, 3, 10), 0);
        assert_eq!(cowl_share(3, 0, 2), 2);
    }

    #[test]
    fn test_modular_share() {
        assert_eq!(modular_share(5, 3), 3);
        assert_eq!(modular_share(5, 8), 5);
    }
}
