//! Tests for Firearm / Ammo.

#[cfg(test)]
mod tests {
    use super::super::weapon::*;

    #[test]
    fn test_fire_rate_limit() {
        let mut firearm = Firearm::default();
        let mut ammo = Ammo::default();

        assert_eq!(firearm.try_fire(0.0, &mut ammo), FireGate::Fired);
        // 10 выстрелов/сек → следующий не раньше 0.1
        assert_eq!(firearm.try_fire(0.05, &mut ammo), FireGate::RateLimited);
        assert_eq!(firearm.try_fire(0.1, &mut ammo), FireGate::Fired);
        assert_eq!(ammo.magazine, 28);
    }

    #[test]
    fn test_thirty_five_shots_without_reload() {
        let mut firearm = Firearm::default();
        let mut ammo = Ammo::default();
        let interval = firearm.fire_interval();

        let fired = (0..35)
            .filter(|i| firearm.try_fire(*i as f32 * interval * 2.0, &mut ammo) == FireGate::Fired)
            .count();

        assert_eq!(fired, 30);
        assert_eq!(ammo.magazine, 0);
        assert_eq!(ammo.reserve, 90);
    }

    #[test]
    fn test_empty_magazine_blocks_and_keeps_timestamp() {
        let mut firearm = Firearm::default();
        let mut ammo = Ammo::default();
        ammo.set_ammo(0, 90);

        assert_eq!(firearm.try_fire(1.0, &mut ammo), FireGate::EmptyMagazine);
        assert_eq!(firearm.next_fire_time, 0.0);
    }

    #[test]
    fn test_infinite_ammo_never_consumes() {
        let mut firearm = Firearm {
            infinite_ammo: true,
            ..Firearm::default()
        };
        let mut ammo = Ammo::default();
        ammo.set_ammo(0, 0);

        assert_eq!(firearm.try_fire(0.0, &mut ammo), FireGate::Fired);
        assert_eq!(ammo.magazine, 0);
    }

    #[test]
    fn test_reloading_blocks_fire() {
        let mut firearm = Firearm::default();
        let mut ammo = Ammo::default();
        firearm.reloading = true;

        assert_eq!(firearm.try_fire(5.0, &mut ammo), FireGate::Reloading);
        assert_eq!(ammo.magazine, 30);
    }

    #[test]
    fn test_reload_moves_missing_rounds() {
        let mut ammo = Ammo::default();
        ammo.set_ammo(12, 90);

        assert_eq!(ammo.reload(), 18);
        assert_eq!(ammo.magazine, 30);
        assert_eq!(ammo.reserve, 72);
    }

    #[test]
    fn test_reload_limited_by_reserve() {
        let mut ammo = Ammo::default();
        ammo.set_ammo(25, 3);

        assert_eq!(ammo.reload(), 3);
        assert_eq!(ammo.magazine, 28);
        assert_eq!(ammo.reserve, 0);
        assert!(!ammo.can_reload());
    }

    #[test]
    fn test_cannot_reload_full_magazine() {
        let mut ammo = Ammo::default();
        assert!(!ammo.can_reload());
        assert_eq!(ammo.reload(), 0);
        assert_eq!(ammo.reserve, 90);
    }

    #[test]
    fn test_add_reserve_clamps() {
        let mut ammo = Ammo::default();
        ammo.set_ammo(30, 80);

        assert_eq!(ammo.add_reserve(30), 10);
        assert_eq!(ammo.reserve, 90);
    }

    #[test]
    fn test_set_ammo_clamps() {
        let mut ammo = Ammo::default();
        ammo.set_ammo(500, 500);
        assert_eq!(ammo.magazine, 30);
        assert_eq!(ammo.reserve, 90);
    }

    #[test]
    fn test_recoil_kick_and_recovery() {
        let mut recoil = WeaponRecoil::default();
        for _ in 0..10 {
            recoil.apply_shot();
        }
        assert_eq!(recoil.kick, recoil.max_kick);

        recoil.recover(10.0);
        assert_eq!(recoil.kick, 0.0);
    }
}
