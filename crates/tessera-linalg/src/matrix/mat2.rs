// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::debug;

use super::Mat2;
use crate::config::NumericConfig;
use crate::error::MatrixError;
use crate::scalar::FEQ_EPSILON;
use crate::vector::Components;

impl Mat2 {
    /// Counter-clockwise rotation by `angle` radians: `[[cos, -sin], [sin, cos]]`.
    pub fn rotation(angle: f64) -> Self {
        let mut m = Self::identity();
        m.set_rotation(angle);
        m
    }

    /// Overwrites all four coefficients with a rotation by `angle` radians.
    pub fn set_rotation(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.set(0, 0, c);
        self.set(0, 1, -s);
        self.set(1, 0, s);
        self.set(1, 1, c);
    }

    /// Sets both diagonal entries to `s`; off-diagonal entries are kept.
    pub fn set_scale(&mut self, s: f64) {
        self.set_diagonal(&[s, s]);
    }

    /// Sets the diagonal to `s`; off-diagonal entries are kept.
    pub fn set_scale_vec<V: Components<2>>(&mut self, s: V) {
        self.set_diagonal(&s.to_components());
    }

    /// `a00 * a11 - a10 * a01`.
    pub fn determinant(&self) -> f64 {
        self.at(0, 0) * self.at(1, 1) - self.at(1, 0) * self.at(0, 1)
    }

    fn adjugate_over(&self, d: f64) -> Self {
        let r = 1.0 / d;
        Self::from_rows([
            [self.at(1, 1) * r, -self.at(0, 1) * r],
            [-self.at(1, 0) * r, self.at(0, 0) * r],
        ])
    }

    /// Closed-form inverse.
    ///
    /// A zero determinant is replaced by `1`, so a singular input yields its
    /// adjugate instead of an error. Use [`Mat2::checked_inverse`] to detect
    /// that case.
    pub fn inverse(&self) -> Self {
        let mut d = self.determinant();
        if d == 0.0 {
            debug!("mat2 inverse: zero determinant, returning adjugate");
            d = 1.0;
        }
        self.adjugate_over(d)
    }

    /// Closed-form inverse, `Singular` on a zero determinant.
    pub fn checked_inverse(&self) -> Result<Self, MatrixError> {
        let d = self.determinant();
        if d == 0.0 {
            return Err(MatrixError::Singular);
        }
        Ok(self.adjugate_over(d))
    }

    /// [`Mat2::inverse`] or [`Mat2::checked_inverse`] depending on the policy.
    pub fn inverse_with(&self, config: &NumericConfig) -> Result<Self, MatrixError> {
        if config.is_strict() {
            self.checked_inverse()
        } else {
            Ok(self.inverse())
        }
    }

    /// Re-orthonormalizes the columns.
    ///
    /// Column 0 is normalized and column 1 becomes its counter-clockwise
    /// perpendicular. A degenerate column 0 (length ≤ [`FEQ_EPSILON`]) turns
    /// both columns to zero.
    pub fn gram_schmidt(&mut self) {
        let [x, y] = self.col(0);
        let len = x.hypot(y);
        let c0 = if len <= FEQ_EPSILON {
            [0.0, 0.0]
        } else {
            [x / len, y / len]
        };
        self.set_col(0, c0);
        self.set_col(1, [-c0[1], c0[0]]);
    }

    /// Writes the matrix into a 3×3 column-major buffer (9 values); the third
    /// row and column are zero-filled.
    pub fn write_values_3x3(&self, out: &mut [f64]) -> Result<(), MatrixError> {
        MatrixError::check_len(9, out.len())?;
        out.copy_from_slice(&[
            self.at(0, 0),
            self.at(1, 0),
            0.0,
            self.at(0, 1),
            self.at(1, 1),
            0.0,
            0.0,
            0.0,
            0.0,
        ]);
        Ok(())
    }

    /// Reads the upper-left 2×2 block of a 3×3 column-major buffer (9 values).
    pub fn set_values_3x3(&mut self, values: &[f64]) -> Result<(), MatrixError> {
        MatrixError::check_len(9, values.len())?;
        self.set(0, 0, values[0]);
        self.set(1, 0, values[1]);
        self.set(0, 1, values[3]);
        self.set(1, 1, values[4]);
        Ok(())
    }
}
