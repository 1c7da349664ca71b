// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use tracing::debug;

use super::{Mat3, Mat4};
use crate::config::NumericConfig;
use crate::error::MatrixError;
use crate::vector::Components;

/// Why a Gauss-Jordan pass gave up.
enum Degenerate {
    ZeroRowScale(usize),
    ZeroPivot(usize),
}

impl Mat4 {
    /// Translation by `t`; translation occupies column 3.
    ///
    /// # Examples
    /// ```
    /// use tessera_linalg::Mat4;
    /// let t = Mat4::from_translation([5.0, -3.0, 2.0]);
    /// assert_eq!(t.mult_matrix_point([2.0, 4.0, -1.0]), [7.0, 1.0, 1.0]);
    /// ```
    pub fn from_translation<V: Components<3>>(t: V) -> Self {
        let mut m = Self::identity();
        m.set_translate(t);
        m
    }

    /// Non-uniform scale by `s`.
    pub fn from_scale<V: Components<3>>(s: V) -> Self {
        let mut m = Self::identity();
        m.set_scale_vec(s);
        m
    }

    /// Rotation about +X by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection to OpenGL clip space
    /// (`z_ndc` in `[-1, 1]`).
    ///
    /// `fovy` is the vertical field of view in radians; `near`/`far` are
    /// positive distances along -Z.
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy * 0.5).tan();
        let depth = far - near;
        Self::from_rows([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(far + near) / depth, -(2.0 * far * near) / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Embeds a linear map: `m` fills the upper-left block, the rest is
    /// identity.
    pub fn from_linear(m: &Mat3) -> Self {
        let mut out = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                out.set(i, j, m.at(i, j));
            }
        }
        out
    }

    /// Upper-left 3×3 block (rotation and scale, no translation).
    pub fn linear_part(&self) -> Mat3 {
        let mut out = Mat3::identity();
        for i in 0..3 {
            for j in 0..3 {
                out.set(i, j, self.at(i, j));
            }
        }
        out
    }

    /// Sets the first three diagonal entries to `s`. Everything else,
    /// `(3, 3)` included, is kept.
    pub fn set_scale(&mut self, s: f64) {
        self.set_diagonal(&[s, s, s]);
    }

    /// Sets the first three diagonal entries to `s`. Everything else is kept.
    pub fn set_scale_vec<V: Components<3>>(&mut self, s: V) {
        self.set_diagonal(&s.to_components());
    }

    /// Overwrites rows 0..3 of column 3 with `t`.
    pub fn set_translate<V: Components<3>>(&mut self, t: V) {
        for (i, x) in t.to_components().into_iter().enumerate() {
            self.set(i, 3, x);
        }
    }

    /// Rows 0..3 of column 3.
    pub fn translation(&self) -> [f64; 3] {
        [self.at(0, 3), self.at(1, 3), self.at(2, 3)]
    }

    /// Gauss-Jordan on `[M | I]` with scaled partial pivoting.
    ///
    /// Rows are swapped through an index permutation; the scratch block
    /// itself is never moved.
    fn gauss_jordan(&self) -> Result<Self, Degenerate> {
        let mut s = [[0.0_f64; 8]; 4];
        for (i, row) in s.iter_mut().enumerate() {
            for j in 0..4 {
                row[j] = self.at(i, j);
                row[j + 4] = if i == j { 1.0 } else { 0.0 };
            }
        }

        // Per-row scale: max |a(i, j)| over the left block.
        let mut scale = [0.0_f64; 4];
        for (i, row) in s.iter().enumerate() {
            scale[i] = row[..4].iter().fold(0.0, |acc: f64, v| acc.max(v.abs()));
            if scale[i] == 0.0 {
                return Err(Degenerate::ZeroRowScale(i));
            }
        }

        let mut order = [0_usize, 1, 2, 3];
        for i in 0..4 {
            let mut pivot_to = i;
            let mut best = (s[order[i]][i] / scale[order[i]]).abs();
            for p in (i + 1)..4 {
                let candidate = (s[order[p]][i] / scale[order[p]]).abs();
                if candidate > best {
                    best = candidate;
                    pivot_to = p;
                }
            }
            order.swap(i, pivot_to);

            let pivot_row = s[order[i]];
            if pivot_row[i] == 0.0 {
                return Err(Degenerate::ZeroPivot(i));
            }
            for &r in &order[(i + 1)..] {
                let m = s[r][i] / pivot_row[i];
                s[r][i] = 0.0;
                for k in (i + 1)..8 {
                    s[r][k] -= m * pivot_row[k];
                }
            }
        }

        // Upper triangular; clear above the diagonal.
        for i in (1..4).rev() {
            let pivot_row = s[order[i]];
            for j in (0..i).rev() {
                let r = order[j];
                let m = s[r][i] / pivot_row[i];
                for k in (j + 1)..8 {
                    s[r][k] -= m * pivot_row[k];
                }
            }
        }

        let mut inv = Self::identity();
        for i in 0..4 {
            let row = s[order[i]];
            for j in 0..4 {
                inv.set(i, j, row[j + 4] / row[i]);
            }
        }
        Ok(inv)
    }

    /// Gauss-Jordan inverse with scaled partial pivoting.
    ///
    /// Returns the identity when a row of `self` is entirely zero or an
    /// elimination pivot is exactly zero; callers cannot tell that apart from
    /// a genuine identity result. Use [`Mat4::checked_inverse`] to detect it.
    ///
    /// # Examples
    /// ```
    /// use tessera_linalg::Mat4;
    /// assert_eq!(Mat4::zero().inverse(), Mat4::identity());
    /// ```
    pub fn inverse(&self) -> Self {
        match self.gauss_jordan() {
            Ok(inv) => inv,
            Err(Degenerate::ZeroRowScale(row)) => {
                debug!(row, "mat4 inverse: zero row, returning identity");
                Self::identity()
            }
            Err(Degenerate::ZeroPivot(step)) => {
                debug!(step, "mat4 inverse: zero pivot, returning identity");
                Self::identity()
            }
        }
    }

    /// Gauss-Jordan inverse, `Singular` where [`Mat4::inverse`] would fall
    /// back to the identity.
    pub fn checked_inverse(&self) -> Result<Self, MatrixError> {
        self.gauss_jordan().map_err(|_| MatrixError::Singular)
    }

    /// [`Mat4::inverse`] or [`Mat4::checked_inverse`] depending on the policy.
    pub fn inverse_with(&self, config: &NumericConfig) -> Result<Self, MatrixError> {
        if config.is_strict() {
            self.checked_inverse()
        } else {
            Ok(self.inverse())
        }
    }

    /// Homogeneous weight of `M * (p, 1)`.
    fn column_weight(&self, [x, y, z]: [f64; 3]) -> f64 {
        x * self.at(3, 0) + y * self.at(3, 1) + z * self.at(3, 2) + self.at(3, 3)
    }

    /// Homogeneous weight of `(p, 1) * M`.
    fn row_weight(&self, [x, y, z]: [f64; 3]) -> f64 {
        x * self.at(0, 3) + y * self.at(1, 3) + z * self.at(2, 3) + self.at(3, 3)
    }

    fn project_column(&self, [x, y, z]: [f64; 3], w: f64) -> [f64; 3] {
        core::array::from_fn(|i| {
            (x * self.at(i, 0) + y * self.at(i, 1) + z * self.at(i, 2) + self.at(i, 3)) / w
        })
    }

    fn project_row(&self, [x, y, z]: [f64; 3], w: f64) -> [f64; 3] {
        core::array::from_fn(|j| {
            (x * self.at(0, j) + y * self.at(1, j) + z * self.at(2, j) + self.at(3, j)) / w
        })
    }

    /// Transforms a point: `M * (p, 1)` followed by the divide by `w`.
    ///
    /// `w == 0` is a caller error: it trips a debug assertion, and release
    /// builds return non-finite components. Use
    /// [`Mat4::try_mult_matrix_point`] when `w` may vanish.
    pub fn mult_matrix_point<V: Components<3>>(&self, p: V) -> V {
        let p = p.to_components();
        let w = self.column_weight(p);
        debug_assert!(w != 0.0, "mult_matrix_point: homogeneous weight is zero");
        V::from_components(self.project_column(p, w))
    }

    /// [`Mat4::mult_matrix_point`] returning `ZeroWeight` instead of asserting.
    pub fn try_mult_matrix_point<V: Components<3>>(&self, p: V) -> Result<V, MatrixError> {
        let p = p.to_components();
        let w = self.column_weight(p);
        if w == 0.0 {
            return Err(MatrixError::ZeroWeight);
        }
        Ok(V::from_components(self.project_column(p, w)))
    }

    /// Transforms a point as a row vector: `(p, 1) * M` followed by the
    /// divide by `w`. Same `w == 0` contract as [`Mat4::mult_matrix_point`].
    pub fn mult_point_matrix<V: Components<3>>(&self, p: V) -> V {
        let p = p.to_components();
        let w = self.row_weight(p);
        debug_assert!(w != 0.0, "mult_point_matrix: homogeneous weight is zero");
        V::from_components(self.project_row(p, w))
    }

    /// `p = M * (p, 1)` with the divide by `w`.
    pub fn mult_matrix_point_in_place<V: Components<3>>(&self, p: &mut V) {
        *p = self.mult_matrix_point(*p);
    }

    /// `p = (p, 1) * M` with the divide by `w`.
    pub fn mult_point_matrix_in_place<V: Components<3>>(&self, p: &mut V) {
        *p = self.mult_point_matrix(*p);
    }

    /// Transforms a direction with the upper-left 3×3 block only;
    /// translation and the projective row are ignored.
    pub fn mult_matrix_dir<V: Components<3>>(&self, d: V) -> V {
        let [x, y, z] = d.to_components();
        V::from_components(core::array::from_fn(|i| {
            x * self.at(i, 0) + y * self.at(i, 1) + z * self.at(i, 2)
        }))
    }

    /// Row-vector form of [`Mat4::mult_matrix_dir`]: `d * M3x3`.
    pub fn mult_dir_matrix<V: Components<3>>(&self, d: V) -> V {
        let [x, y, z] = d.to_components();
        V::from_components(core::array::from_fn(|j| {
            x * self.at(0, j) + y * self.at(1, j) + z * self.at(2, j)
        }))
    }

    /// `d = M3x3 * d`.
    pub fn mult_matrix_dir_in_place<V: Components<3>>(&self, d: &mut V) {
        *d = self.mult_matrix_dir(*d);
    }

    /// `d = d * M3x3`.
    pub fn mult_dir_matrix_in_place<V: Components<3>>(&self, d: &mut V) {
        *d = self.mult_dir_matrix(*d);
    }
}
