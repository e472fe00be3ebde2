// src/simulation/sampler.rs

//! Truncated normal sampling.
//!
//! The bounds are standardized to `a = (lower - mean) / std` and
//! `b = (upper - mean) / std`, a value is drawn from the standard normal
//! truncated to `[a, b]` and then shifted and scaled back by `(mean, std)`.
//!
//! The truncated standard normal uses the accept-reject scheme of Robert
//! (1995), picking per interval the proposal that keeps acceptance high:
//! - plain normal draws when the interval straddles 0 and is wide,
//! - uniform proposals on short intervals,
//! - translated exponential proposals on one-sided tails.

use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Exp1, StandardNormal};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::RangeError;

const SQRT_2PI: f64 = 2.506_628_274_631_000_2;

/// A normal distribution restricted to the inclusive range `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedNormal {
    mean: f64,
    std: f64,
    lower: f64,
    upper: f64,
}

impl TruncatedNormal {
    /// Argument order follows `normal(mean, std, upper, lower)`.
    ///
    /// The mean must be finite. It is checked against the bounds before the
    /// standard deviation, so a mean outside `[lower, upper]` is always
    /// reported as such.
    pub fn new(mean: f64, std: f64, upper: f64, lower: f64) -> Result<Self, RangeError> {
        if mean.is_nan() || upper.is_nan() || lower.is_nan() {
            return Err(RangeError::NotANumber);
        }
        if !mean.is_finite() {
            return Err(RangeError::NonFiniteMean(mean));
        }
        if mean > upper {
            return Err(RangeError::MeanTooHigh { mean, upper });
        }
        if mean < lower {
            return Err(RangeError::MeanTooLow { mean, lower });
        }
        if !(std.is_finite() && std > 0.0) {
            return Err(RangeError::InvalidStdDev(std));
        }
        Ok(Self {
            mean,
            std,
            lower,
            upper,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Draws one value and converts it to a decimal.
    pub fn sample_decimal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Decimal, RangeError> {
        let value = self.sample(rng);
        debug!(
            mean = self.mean,
            std = self.std,
            lower = self.lower,
            upper = self.upper,
            value,
            "Sampler | truncated normal draw"
        );
        Decimal::from_f64(value).ok_or(RangeError::NotRepresentable(value))
    }
}

impl Distribution<f64> for TruncatedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.lower == self.upper {
            return self.mean;
        }
        let a = (self.lower - self.mean) / self.std;
        let b = (self.upper - self.mean) / self.std;
        let z = standard_truncated(rng, a, b);
        // Scaling back can land an ulp outside the bounds.
        (self.mean + self.std * z).clamp(self.lower, self.upper)
    }
}

/// Draws from the standard normal truncated to `[a, b]`, `a <= b`.
fn standard_truncated<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    if a >= 0.0 {
        upper_tail(rng, a, b)
    } else if b <= 0.0 {
        -upper_tail(rng, -b, -a)
    } else if b - a >= SQRT_2PI {
        loop {
            let z: f64 = rng.sample(StandardNormal);
            if a <= z && z <= b {
                return z;
            }
        }
    } else {
        loop {
            let z = rng.gen_range(a..=b);
            if rng.gen::<f64>() < (-z * z / 2.0).exp() {
                return z;
            }
        }
    }
}

/// Interval `[a, b]` with `0 <= a`.
fn upper_tail<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    let root = (a * a + 4.0).sqrt();
    let alpha = (a + root) / 2.0;
    let uniform_limit =
        a + 2.0 * std::f64::consts::E.sqrt() / (a + root) * ((a * a - a * root) / 4.0).exp();

    if b <= uniform_limit {
        loop {
            let z = rng.gen_range(a..=b);
            if rng.gen::<f64>() < ((a * a - z * z) / 2.0).exp() {
                return z;
            }
        }
    }

    loop {
        let e: f64 = rng.sample(Exp1);
        let z = a + e / alpha;
        if z <= b && rng.gen::<f64>() < (-(z - alpha) * (z - alpha) / 2.0).exp() {
            return z;
        }
    }
}

/// Draws one truncated normal value from the thread-local RNG.
///
/// Fails with a [`RangeError`] before sampling when the mean is outside
/// `[lower, upper]`.
pub fn normal(mean: f64, std: f64, upper: f64, lower: f64) -> Result<Decimal, RangeError> {
    normal_with(&mut thread_rng(), mean, std, upper, lower)
}

/// Like [`normal`], drawing from the given RNG.
pub fn normal_with<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    std: f64,
    upper: f64,
    lower: f64,
) -> Result<Decimal, RangeError> {
    TruncatedNormal::new(mean, std, upper, lower)?.sample_decimal(rng)
}
