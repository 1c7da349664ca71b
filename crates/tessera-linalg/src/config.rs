// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Numeric tolerances and the singular-input policy.
//!
//! The defaults reproduce the legacy constants exactly, so
//! `NumericConfig::default()` is behaviourally identical to the plain
//! `inverse()` / `invert()` entry points.

use crate::scalar::{equivalent_within, EPSILON, FEQ_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What `*_with` entry points do with degenerate input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SingularPolicy {
    /// Return the documented fallback value (identity, clamped determinant,
    /// unchanged matrix).
    #[default]
    Legacy,
    /// Return a [`crate::MatrixError`].
    Strict,
}

/// Tolerances used by the comparison, symmetry, and LU routines.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NumericConfig {
    /// Open-interval tolerance of [`NumericConfig::equivalent`] and
    /// `Matrix::equivalent_with`.
    pub equivalence_epsilon: f64,
    /// Tolerance of `is_symmetric_within`, gating LU inversion.
    pub symmetry_epsilon: f64,
    /// Value substituted for an exactly-zero LU pivot.
    pub pivot_floor: f64,
    /// Degenerate-input behaviour.
    pub singular_policy: SingularPolicy,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            equivalence_epsilon: EPSILON,
            symmetry_epsilon: FEQ_EPSILON,
            pivot_floor: FEQ_EPSILON,
            singular_policy: SingularPolicy::Legacy,
        }
    }
}

impl NumericConfig {
    /// Default tolerances with [`SingularPolicy::Strict`].
    pub fn strict() -> Self {
        Self {
            singular_policy: SingularPolicy::Strict,
            ..Self::default()
        }
    }

    /// Returns `true` when degenerate input must be reported as an error.
    pub fn is_strict(&self) -> bool {
        self.singular_policy == SingularPolicy::Strict
    }

    /// [`equivalent_within`] at `equivalence_epsilon`.
    pub fn equivalent(&self, a: f64, b: f64) -> bool {
        equivalent_within(a, b, self.equivalence_epsilon)
    }

    /// Checks that every tolerance is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("equivalence_epsilon", self.equivalence_epsilon),
            ("symmetry_epsilon", self.symmetry_epsilon),
            ("pivot_floor", self.pivot_floor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl NumericConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Error type for config parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Serialization/deserialization failure.
    #[cfg(feature = "serde")]
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
