//! Tests for adversary FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::*;
    use crate::combat::Damageable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_behavior_boundaries_inclusive() {
        let config = AdversaryConfig::default();

        assert_eq!(select_behavior(2.5, &config), AdversaryState::Attacking);
        assert_eq!(select_behavior(2.51, &config), AdversaryState::Chasing);
        assert_eq!(select_behavior(15.0, &config), AdversaryState::Chasing);
        assert_eq!(select_behavior(15.01, &config), AdversaryState::Idle);
        assert_eq!(select_behavior(0.0, &config), AdversaryState::Attacking);
    }

    #[test]
    fn test_bite_inside_bite_range() {
        let config = AdversaryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..20 {
            assert_eq!(choose_attack(1.2, &config, &mut rng), AttackVariant::Bite);
        }
    }

    #[test]
    fn test_light_and_hard_both_occur_outside_bite_range() {
        let config = AdversaryConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let variants: Vec<_> = (0..64).map(|_| choose_attack(2.0, &config, &mut rng)).collect();
        assert!(variants.contains(&AttackVariant::Light));
        assert!(variants.contains(&AttackVariant::Hard));
        assert!(!variants.contains(&AttackVariant::Bite));
    }

    #[test]
    fn test_attack_damage_table() {
        let config = AdversaryConfig::default();
        assert_eq!(AttackVariant::Light.damage(&config), 15);
        assert_eq!(AttackVariant::Hard.damage(&config), 25);
        assert_eq!(AttackVariant::Bite.damage(&config), 35);
    }

    #[test]
    fn test_pending_hit_blocks_next_attack() {
        let mut attack = AttackState::default();
        assert!(attack.can_attack());

        // Cooldown уже снят, но прошлый удар ещё в полёте
        attack.hit_pending = true;
        assert!(!attack.can_attack());

        attack.hit_pending = false;
        attack.cooling_down = true;
        assert!(!attack.can_attack());
    }

    #[test]
    fn test_hit_reaction_threshold() {
        let mut vitals = AdversaryVitals::default();

        assert_eq!(vitals.take_damage(25.0), Some(AdversaryHit::Light));
        assert_eq!(vitals.take_damage(30.0), Some(AdversaryHit::Hard));
        assert_eq!(vitals.health.current, 45);
    }

    #[test]
    fn test_four_body_shots_kill() {
        let mut vitals = AdversaryVitals::default();

        for _ in 0..3 {
            assert_eq!(vitals.take_damage(25.0), Some(AdversaryHit::Light));
        }
        assert_eq!(vitals.take_damage(25.0), Some(AdversaryHit::Killed));
        assert!(vitals.is_dead());

        // Dead: терминально
        assert_eq!(vitals.take_damage(25.0), None);
        assert_eq!(vitals.health.current, 0);
    }

    #[test]
    fn test_non_positive_damage_ignored() {
        let mut vitals = AdversaryVitals::default();
        assert_eq!(vitals.take_damage(0.0), None);
        assert_eq!(vitals.take_damage(-10.0), None);
        assert_eq!(vitals.take_damage(0.49), None);
        assert_eq!(vitals.health.current, 100);
    }

    #[test]
    fn test_headshot_kills_and_drops_brain_once() {
        let mut vitals = AdversaryVitals::default();

        let first = vitals.headshot();
        assert!(first.killed);
        assert!(first.drop_brain);
        assert_eq!(vitals.health.current, 0);

        let second = vitals.headshot();
        assert!(!second.killed);
        assert!(!second.drop_brain);
    }

    #[test]
    fn test_headshot_on_corpse_still_drops_brain() {
        let mut vitals = AdversaryVitals::default();
        vitals.take_damage(500.0);

        let outcome = vitals.headshot();
        assert!(!outcome.killed);
        assert!(outcome.drop_brain);
        assert!(vitals.brain_dropped());
    }

    #[test]
    fn test_brain_impulse_points_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..32 {
            let impulse = brain_impulse(&mut rng, 4.0);
            assert!((impulse.length() - 4.0).abs() < 1e-3);
            // up + разброс ≤ 0.4 → всегда вверх
            assert!(impulse.y > 0.0);
        }
    }
}
