//! Tests for PlayerLedger.

#[cfg(test)]
mod tests {
    use super::super::ledger::*;
    use crate::combat::Damageable;
    use crate::components::Inventory;

    fn ledger() -> PlayerLedger {
        PlayerLedger::default()
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut ledger = ledger();
        assert!(ledger.buy_vest());

        let outcome = ledger.take_damage(35.0).unwrap();
        assert_eq!(outcome.absorbed, 35);
        assert_eq!(outcome.health_lost, 0);
        assert_eq!(ledger.shield.current, 15);
        assert_eq!(ledger.health.current, 100);

        // 15 shield + 20 health
        let outcome = ledger.take_damage(35.0).unwrap();
        assert_eq!(outcome.absorbed, 15);
        assert_eq!(outcome.health_lost, 20);
        assert_eq!(ledger.shield.current, 0);
        assert_eq!(ledger.health.current, 80);
    }

    #[test]
    fn test_damage_equal_to_shield_leaves_health() {
        let mut ledger = ledger();
        ledger.buy_vest();

        let outcome = ledger.take_damage(50.0).unwrap();
        assert_eq!(outcome.absorbed, 50);
        assert_eq!(ledger.shield.current, 0);
        assert_eq!(ledger.health.current, 100);
        assert!(!outcome.killed);
    }

    #[test]
    fn test_lethal_damage_kills_once() {
        let mut ledger = ledger();
        ledger.buy_vest();

        let outcome = ledger.take_damage(150.0).unwrap();
        assert!(outcome.killed);
        assert!(ledger.is_dead());
        assert_eq!(ledger.health.current, 0);

        // Мертвый ledger больше ничего не принимает
        assert!(ledger.take_damage(10.0).is_none());
        assert_eq!(ledger.health.current, 0);
    }

    #[test]
    fn test_overkill_clamps_health_at_zero() {
        let mut ledger = ledger();
        let outcome = ledger.take_damage(1000.0).unwrap();
        assert!(outcome.killed);
        assert_eq!(outcome.health_lost, 100);
        assert_eq!(ledger.health.current, 0);
    }

    #[test]
    fn test_non_positive_damage_is_noop() {
        let mut ledger = ledger();
        assert!(ledger.take_damage(0.0).is_none());
        assert!(ledger.take_damage(-5.0).is_none());
        // 0.4 округляется в 0
        assert!(ledger.take_damage(0.4).is_none());
        assert!(ledger.take_damage(f32::NAN).is_none());
        assert_eq!(ledger.health.current, 100);
    }

    #[test]
    fn test_fractional_damage_rounds() {
        let mut ledger = ledger();
        ledger.take_damage(14.6);
        assert_eq!(ledger.health.current, 85);
    }

    #[test]
    fn test_armor_purchase_is_one_shot() {
        let mut ledger = ledger();
        assert!(ledger.buy_vest());
        assert!(!ledger.buy_vest_and_helmet());
        assert_eq!(ledger.shield.current, 50);

        let mut ledger = PlayerLedger::default();
        assert!(ledger.buy_vest_and_helmet());
        assert!(!ledger.buy_vest());
        assert_eq!(ledger.shield.current, 100);
    }

    #[test]
    fn test_armor_not_rebuyable_after_depletion() {
        let mut ledger = ledger();
        ledger.buy_vest();
        ledger.take_damage(50.0);
        assert_eq!(ledger.shield.current, 0);
        assert!(!ledger.buy_vest());
        assert_eq!(ledger.shield.current, 0);
    }

    #[test]
    fn test_cheat_bypasses_purchase_gate() {
        let mut ledger = ledger();
        ledger.buy_vest();
        ledger.take_damage(30.0);

        ledger.grant_full_shield();
        assert_eq!(ledger.shield.current, 100);
        assert!(ledger.shield.purchased);
    }

    #[test]
    fn test_medkit_restores_full_health() {
        let mut ledger = ledger();
        let mut inventory = Inventory::with_medkits(2);
        ledger.take_damage(60.0);

        assert!(ledger.use_medkit(&mut inventory, false));
        assert_eq!(ledger.health.current, 100);
        assert_eq!(inventory.medkits, 1);
    }

    #[test]
    fn test_medkit_noop_cases() {
        let mut inventory = Inventory::with_medkits(1);

        // Полное здоровье
        let mut ledger = ledger();
        assert!(!ledger.use_medkit(&mut inventory, false));
        assert_eq!(inventory.medkits, 1);

        // Пауза
        ledger.take_damage(10.0);
        assert!(!ledger.use_medkit(&mut inventory, true));
        assert_eq!(inventory.medkits, 1);
        assert_eq!(ledger.health.current, 90);

        // Нет medkit'ов
        let mut empty = Inventory::default();
        assert!(!ledger.use_medkit(&mut empty, false));

        // Мертв
        ledger.take_damage(500.0);
        assert!(!ledger.use_medkit(&mut inventory, false));
        assert_eq!(inventory.medkits, 1);
        assert_eq!(ledger.health.current, 0);
    }
}
