//! Unit tests for ccs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ContactId, LineRef};

    #[test]
    fn index_roundtrip() {
        let id = ContactId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ContactId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(ContactId(100) > ContactId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ContactId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent-7");
        assert_eq!(ContactId(3).to_string(), "contact-3");
        assert_eq!(LineRef::new(AgentId(2), 1).to_string(), "agent-2/line-1");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
    }

    #[test]
    fn total_order() {
        assert!(SimTime(1.0) < SimTime(2.0));
        assert!(SimTime(2.0) < SimTime::INFINITY);
        let mut v = vec![SimTime(3.0), SimTime(1.0), SimTime(2.0)];
        v.sort();
        assert_eq!(v, vec![SimTime(1.0), SimTime(2.0), SimTime(3.0)]);
    }

    #[test]
    fn rounding() {
        assert_eq!(SimTime(1.234_9).round2(), SimTime(1.23));
        assert_eq!(SimTime(1.235_1).round2(), SimTime(1.24));
        assert_eq!(SimTime(4.6).round_whole(), 5.0);
    }

    #[test]
    fn negative_instants_order_before_zero() {
        // Wrapup scheduling can place agent-out events before t=0.
        assert!(SimTime(-0.5) < SimTime::ZERO);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r1 = SimRng::new(1);
        let mut r2 = SimRng::new(2);
        let a: u64 = r1.random();
        let b: u64 = r2.random();
        assert_ne!(a, b);
    }

    #[test]
    fn sample_exp_positive() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.sample_exp(10.0);
            assert!(v >= 0.0 && v.is_finite());
        }
    }

    #[test]
    fn sample_exp_mean_approx() {
        let mut rng = SimRng::new(7);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| rng.sample_exp(5.0)).sum();
        let mean = total / n as f64;
        assert!((mean - 5.0).abs() < 0.25, "got {mean}");
    }

    #[test]
    fn sample_gamma_positive() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.sample_gamma(2.0, 5.0);
            assert!(v > 0.0 && v.is_finite());
        }
    }

    #[test]
    fn sample_gamma_mean_approx() {
        // Gamma(shape=2, scale=s) has mean 2s.
        let mut rng = SimRng::new(11);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| rng.sample_gamma(2.0, 5.0)).sum();
        let mean = total / n as f64;
        assert!((mean - 10.0).abs() < 0.5, "got {mean}");
    }

    #[test]
    fn shuffle_and_choose_deterministic() {
        let mut r1 = SimRng::new(99);
        let mut r2 = SimRng::new(99);
        let mut a = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut b = a.clone();
        r1.shuffle(&mut a);
        r2.shuffle(&mut b);
        assert_eq!(a, b);
        assert_eq!(r1.choose(&a), r2.choose(&b));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
    }
}
