#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::config::CombatConfig;
    use crate::constants::*;
    use crate::entity::Entity;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::Notification;
    use crate::items::{Inventory, ItemKind, ItemStack};
    use crate::types::{wrap_angle, EntityId, Facing, Position};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ---- Entity names ----

    #[test]
    fn test_mob_kind_parses_snake_case_names() {
        assert_eq!("zombie".parse::<MobKind>().unwrap(), MobKind::Zombie);
        assert_eq!(
            "wither_skeleton".parse::<MobKind>().unwrap(),
            MobKind::WitherSkeleton
        );
        assert_eq!("Creeper".parse::<MobKind>().unwrap(), MobKind::Creeper);
        assert!("dragon_of_doom".parse::<MobKind>().is_err());
        assert_eq!(MobKind::MagmaCube.to_string(), "magma_cube");
    }

    #[test]
    fn test_entity_kind_accessors() {
        let zombie = Entity::mob(1, MobKind::Zombie, Position::default());
        assert_eq!(zombie.mob_kind(), Some(MobKind::Zombie));
        assert_eq!(zombie.projectile_kind(), None);

        let arrow = Entity::projectile(2, ProjectileKind::Arrow, Position::default());
        assert_eq!(arrow.projectile_kind(), Some(ProjectileKind::Arrow));
        assert_eq!(arrow.mob_kind(), None);

        let raf = Entity::player(3, "Raf", Position::new(1.0, 64.0, 1.0));
        assert_eq!(raf.label(), "Raf");
        assert!(approx(raf.head().y, 64.0 + DEFAULT_ENTITY_HEIGHT));
    }

    // ---- Item tables ----

    #[test]
    fn test_weapon_ranking_prefers_swords_then_material() {
        let inv = Inventory::new(vec![
            ItemStack::new(ItemKind::NetheriteAxe, 1),
            ItemStack::new(ItemKind::StoneSword, 1),
            ItemStack::new(ItemKind::Bread, 3),
        ]);
        assert_eq!(inv.best_weapon(), Some(ItemKind::StoneSword));

        let inv = Inventory::new(vec![ItemStack::new(ItemKind::IronAxe, 1)]);
        assert_eq!(inv.best_weapon(), Some(ItemKind::IronAxe));

        assert_eq!(Inventory::default().best_weapon(), None);
    }

    #[test]
    fn test_food_priority_golden_over_cooked_over_raw() {
        let inv = Inventory::new(vec![
            ItemStack::new(ItemKind::Beef, 5),
            ItemStack::new(ItemKind::CookedChicken, 2),
        ]);
        assert_eq!(inv.best_food(), Some(ItemKind::CookedChicken));

        let inv = Inventory::new(vec![
            ItemStack::new(ItemKind::CookedBeef, 5),
            ItemStack::new(ItemKind::GoldenApple, 1),
            ItemStack::new(ItemKind::EnchantedGoldenApple, 1),
        ]);
        assert_eq!(inv.best_food(), Some(ItemKind::EnchantedGoldenApple));
    }

    #[test]
    fn test_empty_stacks_are_ignored() {
        let mut inv = Inventory::new(vec![ItemStack::new(ItemKind::Bread, 1)]);
        assert!(inv.has_food());
        assert!(inv.consume(ItemKind::Bread));
        assert!(!inv.has_food());
        assert!(!inv.consume(ItemKind::Bread));
    }

    #[test]
    fn test_best_armor_per_slot() {
        let inv = Inventory::new(vec![
            ItemStack::new(ItemKind::LeatherHelmet, 1),
            ItemStack::new(ItemKind::IronHelmet, 1),
            ItemStack::new(ItemKind::DiamondBoots, 1),
        ]);
        assert_eq!(
            inv.best_armor(EquipSlot::Head),
            Some((ItemKind::IronHelmet, 3))
        );
        assert_eq!(
            inv.best_armor(EquipSlot::Feet),
            Some((ItemKind::DiamondBoots, 4))
        );
        assert_eq!(inv.best_armor(EquipSlot::Torso), None);
    }

    // ---- Geometry ----

    #[test]
    fn test_yaw_convention_matches_facing_forward() {
        let origin = Position::default();
        // Looking north (-z) is yaw 0.
        assert!(approx(origin.yaw_to(&Position::new(0.0, 0.0, -5.0)).abs(), 0.0));
        // West (-x) is a quarter turn to the left.
        assert!(approx(origin.yaw_to(&Position::new(-5.0, 0.0, 0.0)), FRAC_PI_2));

        let facing = Facing::new(0.0, 0.0);
        let fwd = facing.forward();
        assert!(approx(fwd.z, -1.0));
        assert!(approx(fwd.x.abs(), 0.0));
    }

    #[test]
    fn test_relative_angle_wraps() {
        let facing = Facing::new(3.0 * PI / 4.0, 0.0);
        let rel = facing.relative_angle(-3.0 * PI / 4.0);
        assert!(approx(rel, PI / 2.0));
        assert!(approx(wrap_angle(-PI), PI));
        assert!(approx(wrap_angle(5.0 * PI / 2.0), PI / 2.0));
    }

    #[test]
    fn test_away_from_points_opposite() {
        let me = Position::new(0.0, 64.0, 0.0);
        let threat = Position::new(3.0, 64.0, 0.0);
        let goal = me.away_from(&threat, 20.0);
        assert!(approx(goal.x, -20.0));
        assert!(approx(goal.z, 0.0));
        assert!(approx(goal.y, 64.0));

        // Coincident: falls back to +x
        let goal = me.away_from(&me, 10.0);
        assert!(approx(goal.x, 10.0));
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = CombatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.forgive_ms, 4000);
        assert_eq!(config.attack_cooldown_ms, 500);
        assert!(approx(config.escape_health, 6.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CombatConfig::from_json_str(r#"{ "chase_range": 30.0 }"#).unwrap();
        assert!(approx(config.chase_range, 30.0));
        assert!(approx(config.attack_reach, ATTACK_REACH));
    }

    #[test]
    fn test_inverted_health_thresholds_rejected() {
        let err = CombatConfig::from_json_str(r#"{ "escape_health": 16.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_positive_range_rejected() {
        let err = CombatConfig::from_json_str(r#"{ "detect_range": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CombatConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // ---- Notifications ----

    #[test]
    fn test_notification_tagged_json() {
        let n = Notification::TargetCleared {
            target: EntityId(7),
            reason: ClearReason::OutOfRange,
        };
        let json = serde_json::to_string(&n).unwrap();
        assert!(json.contains(r#""type":"TargetCleared""#));
        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(n, back);
    }
}
