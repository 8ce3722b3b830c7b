//! Unit tests for contact-type configuration and the contact lifecycle.

use ccs_core::{ContactId, SimRng, SimTime};

use crate::{ContactError, ContactStatus, ContactTypeConfig, HtDistro, ServeTerms};

fn basic_config() -> ContactTypeConfig {
    ContactTypeConfig::new(10.0, 0.0).unwrap()
}

fn new_contact(arrival: f64, config: &ContactTypeConfig, rng: &mut SimRng) -> crate::Contact {
    crate::Contact::new(ContactId(0), SimTime(arrival), "basic", config, rng)
}

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn rejects_non_positive_base() {
        assert!(ContactTypeConfig::new(0.0, 0.0).is_err());
        assert!(ContactTypeConfig::new(-1.0, 0.0).is_err());
        assert!(ContactTypeConfig::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn rejects_negative_increment() {
        assert!(ContactTypeConfig::new(10.0, -0.5).is_err());
    }

    #[test]
    fn rejects_bad_thresholds() {
        let cfg = basic_config();
        assert!(cfg.with_patience(0.0).is_err());
        assert!(cfg.with_auto_solve(-2.0).is_err());
    }

    #[test]
    fn aht_curve() {
        let cfg = ContactTypeConfig::new(10.0, 4.0).unwrap();
        assert_eq!(cfg.aht_at(1), 10.0);
        assert_eq!(cfg.aht_at(2), 14.0);
        assert_eq!(cfg.aht_at(3), 18.0);
        // Concurrency 0 is evaluated (only) in rescale denominators.
        assert_eq!(cfg.aht_at(0), 6.0);
    }
}

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn no_patience_means_infinite() {
        let mut rng = SimRng::new(1);
        let c = new_contact(0.0, &basic_config(), &mut rng);
        assert_eq!(c.patience, f64::INFINITY);
        assert_eq!(c.auto_solve_time, f64::INFINITY);
        assert_eq!(c.status, ContactStatus::Created);
        assert_eq!(c.handling_time, None);
    }

    #[test]
    fn patience_is_whole_and_deterministic() {
        let cfg = basic_config().with_patience(5.0).unwrap();
        let mut r1 = SimRng::new(42);
        let mut r2 = SimRng::new(42);
        let a = new_contact(0.0, &cfg, &mut r1);
        let b = new_contact(0.0, &cfg, &mut r2);
        assert_eq!(a.patience, b.patience);
        assert_eq!(a.patience, a.patience.round());
        assert!(a.patience >= 0.0);
    }
}

#[cfg(test)]
mod materialise {
    use super::*;

    #[test]
    fn handled_on_time() {
        let mut rng = SimRng::new(7);
        let mut c = new_contact(5.0, &basic_config(), &mut rng);
        let status = c.materialise_handling(
            Some(SimTime(5.0)),
            Some(ServeTerms { aht: 10.0, concurrency: 1 }),
            &mut rng,
        );
        assert_eq!(status, ContactStatus::Handled);
        assert_eq!(c.waiting_time, 0.0);
        let ht = c.handling_time.unwrap();
        assert!((0.1..=150.0).contains(&ht));
        assert_eq!(c.concurrency_at_arrival, Some(1));
        assert_eq!(c.concurrency_history.len(), 1);
        assert_eq!(c.concurrency_history[0].time, SimTime(5.0));
        assert_eq!(c.end_at(), Some(SimTime(5.0) + ht));
    }

    #[test]
    fn abandons_past_patience() {
        let mut rng = SimRng::new(7);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        c.patience = 2.0;
        let status = c.materialise_handling(
            Some(SimTime(3.0)),
            Some(ServeTerms { aht: 10.0, concurrency: 1 }),
            &mut rng,
        );
        assert_eq!(status, ContactStatus::Abandoned);
        assert_eq!(c.waiting_time, 2.0);
        assert_eq!(c.handling_time, None);
        assert!(c.concurrency_history.is_empty());
    }

    #[test]
    fn auto_solves_past_threshold() {
        let cfg = basic_config().with_auto_solve(4.0).unwrap();
        let mut rng = SimRng::new(7);
        let mut c = new_contact(0.0, &cfg, &mut rng);
        let status = c.materialise_handling(Some(SimTime(6.0)), None, &mut rng);
        assert_eq!(status, ContactStatus::AutoSolved);
        assert_eq!(c.waiting_time, 4.0);
    }

    #[test]
    fn patience_wins_over_auto_solve() {
        // Both thresholds exceeded: the patience branch is checked first.
        let mut rng = SimRng::new(7);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        c.patience = 1.0;
        c.auto_solve_time = 2.0;
        let status = c.materialise_handling(Some(SimTime(10.0)), None, &mut rng);
        assert_eq!(status, ContactStatus::Abandoned);
        assert_eq!(c.waiting_time, 1.0);
    }

    #[test]
    fn clamp_floor_dominates_tiny_aht() {
        // ceiling = 15·aht = 0.015 < floor 0.1, so the draw always lands
        // on the 0.1 floor.
        let mut rng = SimRng::new(3);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        c.materialise_handling(
            Some(SimTime(0.0)),
            Some(ServeTerms { aht: 0.001, concurrency: 1 }),
            &mut rng,
        );
        assert_eq!(c.handling_time, Some(0.1));
    }

    #[test]
    fn exponential_distro_draws() {
        let mut rng = SimRng::new(9);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        c.ht_distro = HtDistro::Exponential;
        c.materialise_handling(
            Some(SimTime(0.0)),
            Some(ServeTerms { aht: 10.0, concurrency: 1 }),
            &mut rng,
        );
        let ht = c.handling_time.unwrap();
        assert!((0.1..=150.0).contains(&ht));
    }

    #[test]
    fn no_start_means_zero_waiting() {
        let mut rng = SimRng::new(7);
        let mut c = new_contact(5.0, &basic_config(), &mut rng);
        c.materialise_handling(None, Some(ServeTerms { aht: 10.0, concurrency: 1 }), &mut rng);
        assert_eq!(c.status, ContactStatus::Handled);
        assert_eq!(c.waiting_time, 0.0);
    }
}

#[cfg(test)]
mod update {
    use super::*;

    /// A contact mid-handling: arrived at 0, served immediately, 10 units drawn.
    fn handled_contact(rng: &mut SimRng) -> crate::Contact {
        let mut c = new_contact(0.0, &basic_config(), rng);
        c.materialise_handling(
            Some(SimTime::ZERO),
            Some(ServeTerms { aht: 10.0, concurrency: 1 }),
            rng,
        );
        c.handling_time = Some(10.0);
        c
    }

    #[test]
    fn rescales_only_the_remaining_tail() {
        let mut rng = SimRng::new(5);
        let mut c = handled_contact(&mut rng);
        // 3 units served, 7 remaining; stretch the tail by 1.4.
        c.update_handling(SimTime(3.0), 1.4, 2).unwrap();
        let ht = c.handling_time.unwrap();
        assert!((ht - (3.0 + 7.0 * 1.4)).abs() < 1e-9, "got {ht}");
        assert_eq!(c.end_at(), Some(SimTime(3.0 + 7.0 * 1.4)));
        assert_eq!(c.waiting_time, 0.0);
        assert_eq!(c.current_concurrency().unwrap().concurrency, 2);
    }

    #[test]
    fn shrink_factor_pulls_end_in() {
        let mut rng = SimRng::new(5);
        let mut c = handled_contact(&mut rng);
        c.update_handling(SimTime(4.0), 0.5, 1).unwrap();
        let ht = c.handling_time.unwrap();
        assert!((ht - (4.0 + 6.0 * 0.5)).abs() < 1e-9, "got {ht}");
    }

    #[test]
    fn ends_in_past_is_rejected() {
        let mut rng = SimRng::new(5);
        let mut c = handled_contact(&mut rng);
        let err = c.update_handling(SimTime(11.0), 1.4, 2).unwrap_err();
        assert!(matches!(err, ContactError::EndsInPast { .. }));
        // Skipped update leaves the projection untouched.
        assert_eq!(c.handling_time, Some(10.0));
        assert_eq!(c.concurrency_history.len(), 1);
    }

    #[test]
    fn whole_rounding_tolerates_fractional_overshoot() {
        let mut rng = SimRng::new(5);
        let mut c = handled_contact(&mut rng);
        // present 10.3 rounds to 10, equal to the rounded end — allowed.
        c.update_handling(SimTime(10.3), 2.0, 2).unwrap();
        assert_eq!(c.concurrency_history.len(), 2);
    }

    #[test]
    fn not_handled_is_rejected() {
        let mut rng = SimRng::new(5);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        let err = c.update_handling(SimTime(1.0), 1.5, 2).unwrap_err();
        assert!(matches!(err, ContactError::NotHandled { .. }));
    }
}

#[cfg(test)]
mod missed {
    use super::*;

    #[test]
    fn check_missed_on_either_threshold() {
        let mut rng = SimRng::new(5);
        let mut c = new_contact(0.0, &basic_config(), &mut rng);
        c.patience = 5.0;
        c.auto_solve_time = 3.0;
        assert!(!c.check_missed(SimTime(2.0)));
        assert!(c.check_missed(SimTime(4.0))); // auto-solve exceeded
        assert!(c.check_missed(SimTime(6.0))); // both exceeded
    }

    #[test]
    fn infinite_thresholds_never_miss() {
        let mut rng = SimRng::new(5);
        let c = new_contact(0.0, &basic_config(), &mut rng);
        assert!(!c.check_missed(SimTime(1e12)));
    }
}
