//! Property tests: conservation, termination and the no-op paths

use damage_core::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TARGET: UnitId = UnitId(1);

fn single_location(armor: u32, structure: u32, material: ArmorMaterial) -> UnitRoster {
    let mut unit = Unit::new(TARGET, "Block", UnitArchetype::Emplacement);
    unit.locations.push(
        Location::new("Block", LocationRole::Hull, armor, structure)
            .with_armor_material(material)
            .with_transfer(Transfer::None),
    );
    let mut roster = UnitRoster::new();
    roster.insert(unit);
    roster
}

/// Locations 0..n, each transferring to the next; the last has no target
fn chain(points: &[(u32, u32)]) -> UnitRoster {
    let mut unit = Unit::new(TARGET, "Chain", UnitArchetype::Emplacement);
    let last = points.len() - 1;
    for (i, (armor, structure)) in points.iter().enumerate() {
        let transfer = if i == last {
            Transfer::None
        } else {
            Transfer::Location(i + 1)
        };
        unit.locations.push(
            Location::new(&format!("Link {}", i), LocationRole::Hull, *armor, *structure)
                .with_transfer(transfer),
        );
    }
    let mut roster = UnitRoster::new();
    roster.insert(unit);
    roster
}

fn apply(roster: &mut UnitRoster, request: &DamageRequest) -> DamageReport {
    let mut ctx = ScriptedContext::new([]);
    damage_entity(roster, &mut ctx, &RulesConfig::default(), request).unwrap()
}

proptest! {
    #[test]
    fn prop_single_location_conserves_damage(
        armor in 0u32..40,
        structure in 1u32..40,
        damage in 1u32..120,
    ) {
        let mut roster = single_location(armor, structure, ArmorMaterial::Standard);
        let request = DamageRequest::new(TARGET, HitDescriptor::new(0), damage);

        let report = apply(&mut roster, &request);

        let location = &roster.get(TARGET).unwrap().locations[0];
        let absorbed = (armor - location.armor) + (structure - location.structure);
        prop_assert_eq!(absorbed, damage.min(armor + structure));
        prop_assert_eq!(report.armor_damage + report.structure_damage, absorbed);

        let lost: u32 = report
            .events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::DamageLost { damage, .. } => Some(*damage),
                _ => None,
            })
            .sum();
        prop_assert_eq!(absorbed + lost, damage);
    }

    #[test]
    fn prop_chain_visits_each_location_once(
        points in prop::collection::vec((0u32..6, 1u32..6), 1..8),
    ) {
        let total: u32 = points.iter().map(|(a, s)| a + s).sum();
        let mut roster = chain(&points);
        let request = DamageRequest::new(TARGET, HitDescriptor::new(0), total + 1);

        let report = apply(&mut roster, &request);

        prop_assert_eq!(report.locations_visited as usize, points.len());
        prop_assert!(roster.get(TARGET).unwrap().locations.iter().all(|l| l.destroyed));
    }

    #[test]
    fn prop_zero_damage_changes_nothing(location in 0usize..8) {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(TARGET, "Archer"));
        let before = roster.get(TARGET).unwrap().clone();
        let request = DamageRequest::new(TARGET, HitDescriptor::new(location), 0);

        let report = apply(&mut roster, &request);

        prop_assert_eq!(report.events, vec![ReportEvent::NoDamage { unit: TARGET }]);
        let after = roster.get(TARGET).unwrap();
        prop_assert_eq!(after.total_armor(), before.total_armor());
        prop_assert_eq!(after.total_structure(), before.total_structure());
    }

    #[test]
    fn prop_hardened_double_threshold_empties_armor(armor in 1u32..30, structure in 1u32..20) {
        let mut roster = single_location(armor, structure, ArmorMaterial::Hardened);
        let request = DamageRequest::new(TARGET, HitDescriptor::new(0), armor * 2);

        apply(&mut roster, &request);

        let location = &roster.get(TARGET).unwrap().locations[0];
        prop_assert_eq!(location.armor, 0);
        prop_assert!(location.armor_destroyed);
        prop_assert!(!location.hardened_half_point);
        prop_assert_eq!(location.structure, structure);
    }

    #[test]
    fn prop_random_dice_never_restore_points(
        seed in any::<u64>(),
        location in 0usize..8,
        damage in 0u32..80,
        rear in any::<bool>(),
    ) {
        let mut roster = UnitRoster::new();
        roster.insert(templates::walker(TARGET, "Archer"));
        let before = roster.get(TARGET).unwrap().clone();
        let mut hit = HitDescriptor::new(location);
        hit.rear = rear;
        let request = DamageRequest::new(TARGET, hit, damage);
        let mut rng = StdRng::seed_from_u64(seed);

        let rules = RulesConfig::default();
        let result = damage_entity_with_rng(&mut roster, &rules, &request, &mut rng);

        prop_assert!(result.is_ok());
        let after = roster.get(TARGET).unwrap();
        prop_assert!(after.total_armor() <= before.total_armor());
        prop_assert!(after.total_structure() <= before.total_structure());
    }
}
