// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::debug;

use super::Mat3;
use crate::config::NumericConfig;
use crate::error::MatrixError;
use crate::vector::Components;

impl Mat3 {
    /// Rotation from Euler angles in radians.
    ///
    /// `yaw` turns clockwise about +Y, `pitch` counter-clockwise about +X and
    /// `roll` clockwise about +Z.
    pub fn from_euler(yaw: f64, pitch: f64, roll: f64) -> Self {
        let mut m = Self::identity();
        m.set_euler(yaw, pitch, roll);
        m
    }

    /// Overwrites all nine coefficients with the rotation of
    /// [`Mat3::from_euler`].
    pub fn set_euler(&mut self, yaw: f64, pitch: f64, roll: f64) {
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let (sr, cr) = roll.sin_cos();

        let cc = cy * cr;
        let cs = cy * sr;
        let sc = sy * cr;
        let ss = sy * sr;
        *self = Self::from_rows([
            [cc + sp * ss, cs - sp * sc, -sy * cp],
            [-cp * sr, cp * cr, -sp],
            [sc - sp * cs, ss + sp * cc, cy * cp],
        ]);
    }

    /// Sets the diagonal to `s`; off-diagonal entries are kept.
    pub fn set_scale(&mut self, s: f64) {
        self.set_diagonal(&[s, s, s]);
    }

    /// Sets the diagonal to `s`; off-diagonal entries are kept.
    pub fn set_scale_vec<V: Components<3>>(&mut self, s: V) {
        self.set_diagonal(&s.to_components());
    }

    /// Has no effect: a 3×3 linear map has no translation column.
    ///
    /// Kept so transform-building code can target `Mat3` and [`super::Mat4`]
    /// through the same call; the argument is ignored.
    #[deprecated(note = "Mat3 carries no translation; this call does nothing")]
    pub fn set_translate<V: Components<3>>(&mut self, _t: V) {}

    /// Cofactor expansion along the first column.
    pub fn determinant(&self) -> f64 {
        let e = |r, c| self.at(r, c);
        e(0, 0) * e(1, 1) * e(2, 2) - e(0, 0) * e(2, 1) * e(1, 2) + e(1, 0) * e(2, 1) * e(0, 2)
            - e(1, 0) * e(0, 1) * e(2, 2)
            + e(2, 0) * e(0, 1) * e(1, 2)
            - e(2, 0) * e(1, 1) * e(0, 2)
    }

    fn adjugate_over(&self, d: f64) -> Self {
        let e = |r, c| self.at(r, c);
        Self::from_rows([
            [
                (e(1, 1) * e(2, 2) - e(1, 2) * e(2, 1)) / d,
                -(e(0, 1) * e(2, 2) - e(0, 2) * e(2, 1)) / d,
                (e(0, 1) * e(1, 2) - e(0, 2) * e(1, 1)) / d,
            ],
            [
                -(e(1, 0) * e(2, 2) - e(1, 2) * e(2, 0)) / d,
                (e(0, 0) * e(2, 2) - e(0, 2) * e(2, 0)) / d,
                -(e(0, 0) * e(1, 2) - e(0, 2) * e(1, 0)) / d,
            ],
            [
                (e(1, 0) * e(2, 1) - e(1, 1) * e(2, 0)) / d,
                -(e(0, 0) * e(2, 1) - e(0, 1) * e(2, 0)) / d,
                (e(0, 0) * e(1, 1) - e(0, 1) * e(1, 0)) / d,
            ],
        ])
    }

    /// Adjugate divided by the determinant.
    ///
    /// A zero determinant is replaced by `1`, so a singular input yields its
    /// adjugate. Use [`Mat3::checked_inverse`] to detect that case.
    pub fn inverse(&self) -> Self {
        let mut d = self.determinant();
        if d == 0.0 {
            debug!("mat3 inverse: zero determinant, returning adjugate");
            d = 1.0;
        }
        self.adjugate_over(d)
    }

    /// Adjugate divided by the determinant, `Singular` when it is zero.
    pub fn checked_inverse(&self) -> Result<Self, MatrixError> {
        let d = self.determinant();
        if d == 0.0 {
            return Err(MatrixError::Singular);
        }
        Ok(self.adjugate_over(d))
    }

    /// [`Mat3::inverse`] or [`Mat3::checked_inverse`] depending on the policy.
    pub fn inverse_with(&self, config: &NumericConfig) -> Result<Self, MatrixError> {
        if config.is_strict() {
            self.checked_inverse()
        } else {
            Ok(self.inverse())
        }
    }

    /// Writes the matrix into a 4×4 column-major buffer (16 values). The
    /// fourth row and column are zero-filled, `[15]` included.
    pub fn write_values_4x4(&self, out: &mut [f64]) -> Result<(), MatrixError> {
        MatrixError::check_len(16, out.len())?;
        out.fill(0.0);
        for j in 0..3 {
            for i in 0..3 {
                out[j * 4 + i] = self.at(i, j);
            }
        }
        Ok(())
    }

    /// Reads the upper-left 3×3 block of a 4×4 column-major buffer (16 values).
    pub fn set_values_4x4(&mut self, values: &[f64]) -> Result<(), MatrixError> {
        MatrixError::check_len(16, values.len())?;
        for j in 0..3 {
            for i in 0..3 {
                self.set(i, j, values[j * 4 + i]);
            }
        }
        Ok(())
    }
}
