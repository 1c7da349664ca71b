// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! LU decomposition with scaled partial pivoting, and the inversion and
//! linear solves built on it.
//!
//! The free functions are the raw two-step protocol: [`decompose`] rewrites a
//! matrix into its combined L/U factors, then [`back_substitute`] solves one
//! right-hand side against them. Nothing stops a caller from solving against
//! a matrix that was never decomposed; [`LuFactors`] closes that gap by only
//! existing once decomposition succeeded.

use tracing::debug;

use crate::config::NumericConfig;
use crate::error::MatrixError;
use crate::layout::{Layout, RowMajor};
use crate::matrix::Matrix;
use crate::scalar::FEQ_EPSILON;
use crate::vector::Components;

/// [`decompose_with`] using [`FEQ_EPSILON`] as the substitute pivot.
pub fn decompose<const N: usize, L: Layout>(
    a: &mut Matrix<N, L>,
    pivots: &mut [usize; N],
) -> Result<f64, MatrixError> {
    decompose_with(a, pivots, FEQ_EPSILON)
}

/// In-place Crout decomposition with scaled partial pivoting.
///
/// On success `a` holds L (unit diagonal, implied) below the diagonal and U on
/// and above it, `pivots[j]` records the row swapped into position `j`, and
/// the return value is the permutation parity (`1.0` or `-1.0`).
///
/// An exactly-zero pivot is replaced by `pivot_floor` instead of failing.
/// A row that is entirely zero yields `Singular` and leaves `a` untouched.
/// [`LuFactors::floored_pivot`] tells whether the substitution happened.
pub fn decompose_with<const N: usize, L: Layout>(
    a: &mut Matrix<N, L>,
    pivots: &mut [usize; N],
    pivot_floor: f64,
) -> Result<f64, MatrixError> {
    factorize(a, pivots, pivot_floor).map(|d| d.parity)
}

struct Decomposition {
    parity: f64,
    /// First column whose pivot was replaced by the floor.
    floored: Option<usize>,
}

fn factorize<const N: usize, L: Layout>(
    a: &mut Matrix<N, L>,
    pivots: &mut [usize; N],
    pivot_floor: f64,
) -> Result<Decomposition, MatrixError> {
    // Implicit row scaling: 1 / max |a(i, j)|.
    let mut scale = [0.0_f64; N];
    for (i, s) in scale.iter_mut().enumerate() {
        let big = a.row(i).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if big == 0.0 {
            debug!(row = i, "lu decompose: zero row, matrix is singular");
            return Err(MatrixError::Singular);
        }
        *s = 1.0 / big;
    }

    let mut parity = 1.0;
    let mut floored = None;
    for j in 0..N {
        for i in 0..j {
            let mut sum = a.at(i, j);
            for k in 0..i {
                sum -= a.at(i, k) * a.at(k, j);
            }
            a.set(i, j, sum);
        }

        let mut big = 0.0;
        let mut imax = j;
        for i in j..N {
            let mut sum = a.at(i, j);
            for k in 0..j {
                sum -= a.at(i, k) * a.at(k, j);
            }
            a.set(i, j, sum);
            // `>=`: ties go to the later row.
            let figure = scale[i] * sum.abs();
            if figure >= big {
                big = figure;
                imax = i;
            }
        }

        if imax != j {
            let (upper, lower) = (a.row(j), a.row(imax));
            a.set_row(j, lower);
            a.set_row(imax, upper);
            parity = -parity;
            scale[imax] = scale[j];
        }
        pivots[j] = imax;

        if a.at(j, j) == 0.0 {
            debug!(column = j, pivot_floor, "lu decompose: zero pivot, substituting floor");
            a.set(j, j, pivot_floor);
            floored.get_or_insert(j);
        }
        if j + 1 < N {
            let r = 1.0 / a.at(j, j);
            for i in (j + 1)..N {
                *a.at_mut(i, j) *= r;
            }
        }
    }
    Ok(Decomposition { parity, floored })
}

/// Solves `A x = rhs` in place against factors produced by [`decompose`].
///
/// Forward substitution replays the recorded row swaps and skips the leading
/// zeros of `rhs`; back substitution then walks U from the bottom row up.
/// The result is meaningless if `a` was not decomposed with these `pivots`.
pub fn back_substitute<const N: usize, L: Layout>(
    a: &Matrix<N, L>,
    pivots: &[usize; N],
    rhs: &mut [f64; N],
) {
    let mut first_nonzero: Option<usize> = None;
    for (i, &ip) in pivots.iter().enumerate() {
        let mut sum = rhs[ip];
        rhs[ip] = rhs[i];
        if let Some(start) = first_nonzero {
            for j in start..i {
                sum -= a.at(i, j) * rhs[j];
            }
        } else if sum != 0.0 {
            first_nonzero = Some(i);
        }
        rhs[i] = sum;
    }

    for i in (0..N).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..N {
            sum -= a.at(i, j) * rhs[j];
        }
        rhs[i] = sum / a.at(i, i);
    }
}

/// A successfully decomposed matrix, ready for any number of solves.
///
/// # Examples
/// ```
/// use tessera_linalg::{LuFactors, MatN};
/// let a = MatN::<3>::from_rows([[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]]);
/// let lu = LuFactors::new(&a)?;
/// let x = lu.solve([5.0_f64, -2.0, 9.0]);
/// assert!((x[2] - 2.0).abs() < 1e-12);
/// assert!((lu.determinant() + 16.0).abs() < 1e-12);
/// # Ok::<(), tessera_linalg::MatrixError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuFactors<const N: usize, L: Layout = RowMajor> {
    factors: Matrix<N, L>,
    pivots: [usize; N],
    parity: f64,
    floored: Option<usize>,
}

impl<const N: usize, L: Layout> LuFactors<N, L> {
    /// Decomposes a copy of `m` with the default pivot floor.
    pub fn new(m: &Matrix<N, L>) -> Result<Self, MatrixError> {
        Self::with_pivot_floor(m, FEQ_EPSILON)
    }

    /// Decomposes a copy of `m`, substituting `pivot_floor` for zero pivots.
    pub fn with_pivot_floor(m: &Matrix<N, L>, pivot_floor: f64) -> Result<Self, MatrixError> {
        let mut factors = *m;
        let mut pivots = [0; N];
        let Decomposition { parity, floored } = factorize(&mut factors, &mut pivots, pivot_floor)?;
        Ok(Self {
            factors,
            pivots,
            parity,
            floored,
        })
    }

    /// Decomposes with the config's pivot floor.
    ///
    /// Under [`crate::SingularPolicy::Strict`] a zero pivot is `Singular`
    /// rather than floored.
    pub fn with_config(m: &Matrix<N, L>, config: &NumericConfig) -> Result<Self, MatrixError> {
        let lu = Self::with_pivot_floor(m, config.pivot_floor)?;
        match lu.floored {
            Some(column) if config.is_strict() => {
                debug!(column, "lu decompose: zero pivot refused");
                Err(MatrixError::Singular)
            }
            _ => Ok(lu),
        }
    }

    /// First column whose exactly-zero pivot was replaced by the floor, if
    /// any. `Some` means the matrix is singular and the factors are not
    /// exact.
    pub fn floored_pivot(&self) -> Option<usize> {
        self.floored
    }

    /// Solution `x` of `A x = b`.
    pub fn solve<V: Components<N>>(&self, b: V) -> V {
        let mut x = b.to_components();
        back_substitute(&self.factors, &self.pivots, &mut x);
        V::from_components(x)
    }

    /// Overwrites `b` with the solution of `A x = b`.
    pub fn solve_in_place<V: Components<N>>(&self, b: &mut V) {
        *b = self.solve(*b);
    }

    /// Parity times the product of U's diagonal.
    ///
    /// A substituted pivot floor shows up here as a tiny non-zero factor.
    pub fn determinant(&self) -> f64 {
        (0..N).fold(self.parity, |acc, i| acc * self.factors.at(i, i))
    }

    /// `1.0` for an even number of row swaps, `-1.0` for odd.
    pub fn parity(&self) -> f64 {
        self.parity
    }

    /// Row swapped into position `j` during decomposition, per `j`.
    pub fn pivots(&self) -> &[usize; N] {
        &self.pivots
    }

    /// Combined L (strictly lower, unit diagonal implied) and U factors.
    pub fn factors(&self) -> &Matrix<N, L> {
        &self.factors
    }

    /// Inverse assembled column by column from `N` unit right-hand sides.
    fn inverse(&self) -> Matrix<N, L> {
        let mut inv = Matrix::zero();
        for j in 0..N {
            let mut col = [0.0; N];
            col[j] = 1.0;
            back_substitute(&self.factors, &self.pivots, &mut col);
            inv.set_col(j, col);
        }
        inv
    }
}

impl<const N: usize, L: Layout> Matrix<N, L> {
    /// Inverts a symmetric matrix in place through one LU decomposition.
    ///
    /// A matrix that is not symmetric (see [`Matrix::is_symmetric`]) or has an
    /// all-zero row is left exactly as it was, with no error reported. Use
    /// [`Matrix::try_invert`] to find out. The zero-row case never writes
    /// inf/NaN; code that tested the result for non-finite values must compare
    /// against the input instead.
    ///
    /// A zero pivot without a zero row is floored (see [`decompose_with`]) and
    /// the resulting, inexact inverse is written.
    ///
    /// # Examples
    /// ```
    /// use tessera_linalg::MatN;
    /// let mut m = MatN::<3>::from_rows([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]);
    /// m.invert();
    /// assert_eq!(m.row(2), [0.0, 0.0, 0.125]);
    /// ```
    pub fn invert(&mut self) {
        if let Err(err) = self.invert_within(&NumericConfig::default()) {
            debug!(%err, "lu invert: matrix left unchanged");
        }
    }

    /// [`Matrix::invert`] that reports `NotSymmetric`, or `Singular` for a zero
    /// row or zero pivot, instead of falling back. `self` is untouched on
    /// error.
    pub fn try_invert(&mut self) -> Result<(), MatrixError> {
        self.invert_within(&NumericConfig::strict())
    }

    /// Inversion using the config's symmetry tolerance and pivot floor.
    ///
    /// Under [`crate::SingularPolicy::Legacy`] this always returns `Ok`, with
    /// the matrix unchanged when inversion was refused and zero pivots
    /// floored.
    pub fn invert_with(&mut self, config: &NumericConfig) -> Result<(), MatrixError> {
        match self.invert_within(config) {
            Err(err) if !config.is_strict() => {
                debug!(%err, "lu invert: matrix left unchanged");
                Ok(())
            }
            other => other,
        }
    }

    fn invert_within(&mut self, config: &NumericConfig) -> Result<(), MatrixError> {
        if !self.is_symmetric_within(config.symmetry_epsilon) {
            return Err(MatrixError::NotSymmetric);
        }
        let lu = LuFactors::with_config(self, config)?;
        *self = lu.inverse();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatN;

    fn sample() -> MatN<3> {
        MatN::from_rows([[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]])
    }

    #[test]
    fn zero_row_is_singular_and_untouched() {
        let mut a = MatN::<3>::from_rows([[1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [4.0, 5.0, 6.0]]);
        let before = a;
        let mut pivots = [0; 3];
        assert_eq!(decompose(&mut a, &mut pivots), Err(MatrixError::Singular));
        assert_eq!(a, before);
    }

    #[test]
    fn zero_pivot_takes_the_floor() {
        let mut a = MatN::<2>::filled(1.0);
        let mut pivots = [0; 2];
        let parity = decompose_with(&mut a, &mut pivots, 1e-6);
        assert_eq!(parity, Ok(-1.0));
        assert_eq!(pivots, [1, 1]);
        assert_eq!(a.at(1, 1), 1e-6);
    }

    #[test]
    fn floored_pivot_is_recorded() {
        let ones = MatN::<2>::filled(1.0);
        let lu = LuFactors::new(&ones).unwrap();
        assert_eq!(lu.floored_pivot(), Some(1));
        assert_eq!(
            LuFactors::with_config(&ones, &NumericConfig::strict()),
            Err(MatrixError::Singular)
        );
        assert_eq!(LuFactors::new(&sample()).unwrap().floored_pivot(), None);
    }

    #[test]
    fn back_substitute_solves_a_pivoted_system() {
        let mut a = sample();
        let mut pivots = [0; 3];
        decompose(&mut a, &mut pivots).unwrap();
        let mut rhs = [5.0, -2.0, 9.0];
        back_substitute(&a, &pivots, &mut rhs);
        for (got, want) in rhs.iter().zip([1.0, 1.0, 2.0]) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn factors_report_determinant() {
        let lu = LuFactors::new(&sample()).unwrap();
        assert!((lu.determinant() + 16.0).abs() < 1e-12);
        assert!(lu.parity() == 1.0 || lu.parity() == -1.0);
    }

    #[test]
    fn leading_zero_rhs_is_skipped() {
        let lu = LuFactors::new(&sample()).unwrap();
        let x = lu.solve([0.0, 0.0, 0.0]);
        assert_eq!(x, [0.0, 0.0, 0.0]);
    }
}
