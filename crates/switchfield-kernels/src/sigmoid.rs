//! Logistic curves used by the switching and forcing terms.
//!
//! Both are evaluated in the literal `1 / (1 + exp(-z))` form. For large
//! negative `z`, `exp(-z)` overflows to `+inf` and the quotient saturates
//! to exactly `0.0`; for large positive `z` it underflows to `0.0` and the
//! curve saturates to exactly `1.0`. Neither case panics.

/// Inflection time of the default influence curve.
pub const DEFAULT_INFLUENCE_MIDPOINT: f64 = 100.0;

/// `sigmoid(x) = 1 / (1 + exp(-k_sig * x))`.
///
/// Turns the signed switching potential into a smooth weight in `[0, 1]`,
/// equal to `0.5` at `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchingSigmoid {
    k_sig: f64,
}

impl SwitchingSigmoid {
    /// Create a switching sigmoid with steepness `k_sig`.
    ///
    /// Steepness is validated by the simulation config, not here.
    pub fn new(k_sig: f64) -> Self {
        Self { k_sig }
    }

    /// Steepness.
    pub fn k_sig(&self) -> f64 {
        self.k_sig
    }

    /// Evaluate at `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        1.0 / (1.0 + (-self.k_sig * x).exp())
    }
}

/// `bounded_influence(t) = max_strength / (1 + exp(-k * (t - midpoint)))`.
///
/// Forcing strength as a function of simulated time: monotonically
/// increasing from `0` towards `max_strength`, with `max_strength / 2` at
/// `t = midpoint`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedInfluence {
    max_strength: f64,
    k: f64,
    midpoint: f64,
}

impl BoundedInfluence {
    /// Influence curve with inflection at [`DEFAULT_INFLUENCE_MIDPOINT`].
    pub fn new(max_strength: f64, k: f64) -> Self {
        Self::with_midpoint(max_strength, k, DEFAULT_INFLUENCE_MIDPOINT)
    }

    /// Influence curve with an explicit inflection time.
    pub fn with_midpoint(max_strength: f64, k: f64, midpoint: f64) -> Self {
        Self {
            max_strength,
            k,
            midpoint,
        }
    }

    /// Upper asymptote.
    pub fn max_strength(&self) -> f64 {
        self.max_strength
    }

    /// Steepness.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Inflection time.
    pub fn midpoint(&self) -> f64 {
        self.midpoint
    }

    /// Forcing strength at simulated time `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> f64 {
        self.max_strength / (1.0 + (-self.k * (t - self.midpoint)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sigmoid_midpoint_is_half() {
        assert_eq!(SwitchingSigmoid::new(5.0).eval(0.0), 0.5);
        assert_eq!(SwitchingSigmoid::new(50.0).eval(0.0), 0.5);
    }

    #[test]
    fn sigmoid_saturates_without_panicking() {
        let s = SwitchingSigmoid::new(5.0);
        assert_eq!(s.eval(-1.0e6), 0.0);
        assert_eq!(s.eval(f64::NEG_INFINITY), 0.0);
        assert_eq!(s.eval(1.0e6), 1.0);
        assert_eq!(s.eval(f64::INFINITY), 1.0);
    }

    #[test]
    fn steep_sigmoid_approximates_step() {
        let s = SwitchingSigmoid::new(50.0);
        assert!(s.eval(1.0) > 1.0 - 1e-12);
        assert!(s.eval(-1.0) < 1e-20);
    }

    #[test]
    fn influence_half_strength_at_midpoint() {
        let b = BoundedInfluence::new(10.0, 0.02);
        assert_eq!(b.eval(100.0), 5.0);
        let shifted = BoundedInfluence::with_midpoint(4.0, 1.0, -3.0);
        assert_eq!(shifted.eval(-3.0), 2.0);
    }

    #[test]
    fn influence_limits() {
        let b = BoundedInfluence::new(10.0, 0.02);
        assert_eq!(b.eval(f64::NEG_INFINITY), 0.0);
        assert_eq!(b.eval(-1.0e6), 0.0);
        assert_eq!(b.eval(1.0e6), 10.0);
        assert_eq!(b.eval(f64::INFINITY), 10.0);
    }

    #[test]
    fn zero_strength_is_always_zero() {
        let b = BoundedInfluence::new(0.0, 0.02);
        for t in [-1.0e6, 0.0, 100.0, 1.0e6] {
            assert_eq!(b.eval(t), 0.0);
        }
    }

    proptest! {
        #[test]
        fn sigmoid_in_unit_interval(k in 0.01f64..100.0, x in -1.0e4f64..1.0e4) {
            let v = SwitchingSigmoid::new(k).eval(x);
            prop_assert!((0.0..=1.0).contains(&v));
        }

        #[test]
        fn sigmoid_monotone(k in 0.01f64..100.0, a in -50.0f64..50.0, b in -50.0f64..50.0) {
            let s = SwitchingSigmoid::new(k);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.eval(lo) <= s.eval(hi));
        }

        #[test]
        fn influence_bounded(
            max in 0.0f64..1.0e3,
            k in 0.001f64..10.0,
            t in -1.0e5f64..1.0e5,
        ) {
            let v = BoundedInfluence::new(max, k).eval(t);
            prop_assert!(v >= 0.0 && v <= max);
        }

        #[test]
        fn influence_monotone(k in 0.001f64..1.0, a in 0.0f64..500.0, b in 0.0f64..500.0) {
            let curve = BoundedInfluence::new(10.0, k);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(curve.eval(lo) <= curve.eval(hi));
        }
    }
}
