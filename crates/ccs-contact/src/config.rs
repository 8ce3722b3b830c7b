//! Per-type handling configuration.
//!
//! A `ContactTypeConfig` describes how one class of contact behaves: the
//! AHT curve (`base` + `increment` per extra concurrent contact), how long
//! callers tolerate waiting, and whether unattended contacts resolve
//! themselves.  Validation happens here, at registration time, so the
//! kernel never has to re-check numeric preconditions mid-loop.

use crate::ConfigError;

/// Configuration for one contact type, keyed by name in the simulation's
/// registry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactTypeConfig {
    /// Average handling time at concurrency 1.  Always positive.
    pub base: f64,

    /// Additive AHT cost per extra concurrent contact.  Never negative.
    pub increment: f64,

    /// Mean of the exponential patience draw.  `None` = infinite patience.
    pub average_patience: Option<f64>,

    /// Waiting threshold past which a contact resolves itself.
    /// `None` = never auto-solves.
    pub auto_solve_time: Option<f64>,
}

impl ContactTypeConfig {
    /// Create a validated configuration with no patience limit and no
    /// auto-solve threshold.
    pub fn new(base: f64, increment: f64) -> Result<Self, ConfigError> {
        if !(base > 0.0 && base.is_finite()) {
            return Err(ConfigError::NonPositiveBase(base));
        }
        if !(increment >= 0.0 && increment.is_finite()) {
            return Err(ConfigError::NegativeIncrement(increment));
        }
        Ok(Self {
            base,
            increment,
            average_patience: None,
            auto_solve_time: None,
        })
    }

    /// Set the mean patience.
    pub fn with_patience(mut self, average_patience: f64) -> Result<Self, ConfigError> {
        if !(average_patience > 0.0 && average_patience.is_finite()) {
            return Err(ConfigError::NonPositivePatience(average_patience));
        }
        self.average_patience = Some(average_patience);
        Ok(self)
    }

    /// Set the auto-solve threshold.
    pub fn with_auto_solve(mut self, auto_solve_time: f64) -> Result<Self, ConfigError> {
        if !(auto_solve_time > 0.0 && auto_solve_time.is_finite()) {
            return Err(ConfigError::NonPositiveAutoSolve(auto_solve_time));
        }
        self.auto_solve_time = Some(auto_solve_time);
        Ok(self)
    }

    /// The unscaled AHT at the given concurrency: `base + (c − 1)·increment`.
    ///
    /// Callers multiply by the agent's performance factor for the effective
    /// value.  The rescale denominators evaluate this at `concurrency = 0`,
    /// where the result is `base − increment` (possibly ≤ 0); the kernel
    /// only does so when the factor is applied to an empty line set.
    #[inline]
    pub fn aht_at(&self, concurrency: u32) -> f64 {
        self.base + (concurrency as f64 - 1.0) * self.increment
    }
}
