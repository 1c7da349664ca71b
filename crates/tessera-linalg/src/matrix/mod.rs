// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The generic square matrix and its size-specific fast paths.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

use crate::config::NumericConfig;
use crate::error::MatrixError;
use crate::layout::{ColMajor, Layout, RowMajor};
use crate::scalar::{approx_eq, FEQ_EPSILON};
use crate::vector::{Coefficient, Components};

mod mat2;
mod mat3;
mod mat4;
mod ops;

/// 2×2 matrix, row-major storage.
pub type Mat2 = Matrix<2>;

/// 3×3 matrix, row-major storage.
pub type Mat3 = Matrix<3>;

/// 4×4 homogeneous transform, column-major storage.
pub type Mat4 = Matrix<4, ColMajor>;

/// N×N matrix, row-major storage.
pub type MatN<const N: usize> = Matrix<N>;

/// Square `N`×`N` matrix of `f64` coefficients.
///
/// - Plain value type: `Copy`, no heap, no aliasing.
/// - Addressed by `(row, col)`; `L` only fixes the physical order seen
///   through [`Matrix::as_slice`].
/// - `Matrix::default()` is the identity.
/// - `==` is exact element-wise comparison; use [`Matrix::approx_eq`] for
///   tolerances.
///
/// # Examples
/// ```
/// use tessera_linalg::{Mat4, Mat3};
/// let t = Mat4::from_translation([1.0, 2.0, 3.0]);
/// assert_eq!(t.mult_matrix_point([0.0, 0.0, 0.0]), [1.0, 2.0, 3.0]);
/// assert_eq!(Mat3::default(), Mat3::identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize, L: Layout = RowMajor> {
    data: [[f64; N]; N],
    layout: PhantomData<L>,
}

impl<const N: usize, L: Layout> Default for Matrix<N, L> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize, L: Layout> Matrix<N, L> {
    /// Number of coefficients, `N * N`.
    pub const LEN: usize = N * N;

    /// Matrix with every coefficient set to `value`.
    pub const fn filled(value: f64) -> Self {
        Self {
            data: [[value; N]; N],
            layout: PhantomData,
        }
    }

    /// Zero matrix.
    pub const fn zero() -> Self {
        Self::filled(0.0)
    }

    /// Identity matrix.
    pub fn identity() -> Self {
        let mut m = Self::zero();
        for i in 0..N {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Builds a matrix from logical rows.
    pub fn from_rows(rows: [[f64; N]; N]) -> Self {
        let mut m = Self::zero();
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m.set(i, j, v);
            }
        }
        m
    }

    /// Builds a matrix from logical columns.
    pub fn from_cols(cols: [[f64; N]; N]) -> Self {
        Self::from_rows(cols).transpose()
    }

    /// Builds a matrix from a column-major flat buffer of `N * N` values.
    pub fn from_values(values: &[f64]) -> Result<Self, MatrixError> {
        let mut m = Self::identity();
        m.set_values(values)?;
        Ok(m)
    }

    /// Coefficient at `(row, col)`.
    ///
    /// # Panics
    /// When `row` or `col` is not below `N`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        let (outer, inner) = L::slot(row, col);
        self.data[outer][inner]
    }

    /// Mutable coefficient at `(row, col)`.
    ///
    /// # Panics
    /// When `row` or `col` is not below `N`.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        let (outer, inner) = L::slot(row, col);
        &mut self.data[outer][inner]
    }

    /// Stores `value` at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        *self.at_mut(row, col) = value;
    }

    /// Sets every coefficient to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data = [[value; N]; N];
    }

    /// Physical storage, `N * N` values in `L` order.
    ///
    /// Row-major for [`Mat2`]/[`Mat3`]/[`MatN`], column-major for [`Mat4`].
    pub fn as_slice(&self) -> &[f64] {
        self.data.as_flattened()
    }

    /// Mutable physical storage in `L` order.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.data.as_flattened_mut()
    }

    /// Overwrites the matrix from a column-major flat buffer.
    ///
    /// The buffer must hold exactly `N * N` values; the matrix is untouched
    /// otherwise.
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), MatrixError> {
        self.set_values_as(values)
    }

    /// Like [`Matrix::set_values`] for any [`Coefficient`] element type.
    pub fn set_values_as<T: Coefficient>(&mut self, values: &[T]) -> Result<(), MatrixError> {
        MatrixError::check_len(Self::LEN, values.len())?;
        let mut it = values.iter();
        for j in 0..N {
            for i in 0..N {
                if let Some(v) = it.next() {
                    self.set(i, j, v.to_f64());
                }
            }
        }
        Ok(())
    }

    /// Writes the matrix into a column-major flat buffer of `N * N` values.
    pub fn write_values(&self, out: &mut [f64]) -> Result<(), MatrixError> {
        self.write_values_as(out)
    }

    /// Like [`Matrix::write_values`] for any [`Coefficient`] element type.
    pub fn write_values_as<T: Coefficient>(&self, out: &mut [T]) -> Result<(), MatrixError> {
        MatrixError::check_len(Self::LEN, out.len())?;
        let mut it = out.iter_mut();
        for j in 0..N {
            for i in 0..N {
                if let Some(slot) = it.next() {
                    *slot = T::from_f64(self.at(i, j));
                }
            }
        }
        Ok(())
    }

    /// Column-major copy of the coefficients.
    pub fn to_values(&self) -> Vec<f64> {
        (0..N)
            .flat_map(|j| (0..N).map(move |i| (i, j)))
            .map(|(i, j)| self.at(i, j))
            .collect()
    }

    /// Logical row `r`.
    pub fn row(&self, r: usize) -> [f64; N] {
        core::array::from_fn(|j| self.at(r, j))
    }

    /// Logical column `c`.
    pub fn col(&self, c: usize) -> [f64; N] {
        core::array::from_fn(|i| self.at(i, c))
    }

    /// Overwrites row `r`.
    pub fn set_row<V: Components<N>>(&mut self, r: usize, v: V) {
        for (j, x) in v.to_components().into_iter().enumerate() {
            self.set(r, j, x);
        }
    }

    /// Overwrites column `c`.
    pub fn set_col<V: Components<N>>(&mut self, c: usize, v: V) {
        for (i, x) in v.to_components().into_iter().enumerate() {
            self.set(i, c, x);
        }
    }

    /// Overwrites the leading diagonal entries with `diag`; off-diagonal
    /// entries (and any trailing diagonal ones) are left as they are.
    pub(crate) fn set_diagonal(&mut self, diag: &[f64]) {
        for (i, &d) in diag.iter().enumerate().take(N) {
            self.set(i, i, d);
        }
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zero();
        for i in 0..N {
            for j in 0..N {
                t.set(i, j, self.at(j, i));
            }
        }
        t
    }

    /// Copy with column `j` multiplied by `s[j]` (i.e. `self * diag(s)`).
    pub fn scaled<V: Components<N>>(&self, s: V) -> Self {
        let s = s.to_components();
        let mut out = *self;
        for i in 0..N {
            for (j, &sj) in s.iter().enumerate() {
                out.set(i, j, self.at(i, j) * sj);
            }
        }
        out
    }

    /// In place `self = self * rhs`.
    pub fn mult_right(&mut self, rhs: &Self) -> &mut Self {
        let lhs = *self;
        self.fill(0.0);
        for i in 0..N {
            for j in 0..N {
                for c in 0..N {
                    *self.at_mut(i, j) += lhs.at(i, c) * rhs.at(c, j);
                }
            }
        }
        self
    }

    /// In place `self = lhs * self`.
    pub fn mult_left(&mut self, lhs: &Self) -> &mut Self {
        let rhs = *self;
        self.fill(0.0);
        for i in 0..N {
            for j in 0..N {
                for c in 0..N {
                    *self.at_mut(i, j) += lhs.at(i, c) * rhs.at(c, j);
                }
            }
        }
        self
    }

    /// Returns `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = *self;
        out.mult_right(rhs);
        out
    }

    /// Column-vector product `M * v` (no homogeneous divide).
    pub fn mult_matrix_vec<V: Components<N>>(&self, v: V) -> V {
        let src = v.to_components();
        V::from_components(core::array::from_fn(|i| {
            let mut acc = 0.0;
            for (j, &x) in src.iter().enumerate() {
                acc += self.at(i, j) * x;
            }
            acc
        }))
    }

    /// Row-vector product `v * M` (no homogeneous divide).
    pub fn mult_vec_matrix<V: Components<N>>(&self, v: V) -> V {
        let src = v.to_components();
        V::from_components(core::array::from_fn(|j| {
            let mut acc = 0.0;
            for (i, &x) in src.iter().enumerate() {
                acc += x * self.at(i, j);
            }
            acc
        }))
    }

    /// `v = M * v`.
    pub fn mult_matrix_vec_in_place<V: Components<N>>(&self, v: &mut V) {
        *v = self.mult_matrix_vec(*v);
    }

    /// `v = v * M`.
    pub fn mult_vec_matrix_in_place<V: Components<N>>(&self, v: &mut V) {
        *v = self.mult_vec_matrix(*v);
    }

    /// Symmetry check with the default tolerance ([`FEQ_EPSILON`]).
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric_within(FEQ_EPSILON)
    }

    /// `true` when `|a(i,j) - a(j,i)| < eps` for every `i < j`.
    pub fn is_symmetric_within(&self, eps: f64) -> bool {
        (0..N).all(|i| ((i + 1)..N).all(|j| approx_eq(self.at(i, j), self.at(j, i), eps)))
    }

    /// Element-wise `|a - b| < eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(&a, &b)| approx_eq(a, b, eps))
    }

    /// Element-wise [`crate::scalar::equivalent_within`] using the config's
    /// `equivalence_epsilon`.
    pub fn equivalent_with(&self, other: &Self, config: &NumericConfig) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(&a, &b)| config.equivalent(a, b))
    }
}

impl<const N: usize, L: Layout> Index<(usize, usize)> for Matrix<N, L> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        let (outer, inner) = L::slot(row, col);
        &self.data[outer][inner]
    }
}

impl<const N: usize, L: Layout> IndexMut<(usize, usize)> for Matrix<N, L> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        self.at_mut(row, col)
    }
}

/// One row per line, bracketed by `|`. Informational only.
impl<const N: usize, L: Layout> fmt::Display for Matrix<N, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..N {
            write!(f, "| ")?;
            for j in 0..N {
                write!(f, "{} ", self.at(i, j))?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat4_storage_is_column_major() {
        let m = Mat4::from_rows([
            [0.0, 1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0, 7.0],
            [8.0, 9.0, 10.0, 11.0],
            [12.0, 13.0, 14.0, 15.0],
        ]);
        // flat index row + col * 4
        assert_eq!(m.as_slice()[1], 4.0);
        assert_eq!(m.as_slice()[4], 1.0);
        assert_eq!(m.as_slice()[13], 7.0);
    }

    #[test]
    fn mat3_storage_is_row_major() {
        let m = Mat3::from_rows([[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]]);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn bulk_exchange_is_column_major_for_every_layout() {
        let rows = [[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(Mat2::from_rows(rows).to_values(), vec![1.0, 3.0, 2.0, 4.0]);
        let m4 = Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(&m4.to_values()[..4], &[1.0, 5.0, 9.0, 13.0]);
    }

    #[test]
    fn display_brackets_rows() {
        let m = Mat2::from_rows([[1.0, 2.5], [-3.0, 4.0]]);
        assert_eq!(m.to_string(), "| 1 2.5 |\n| -3 4 |\n");
    }
}
