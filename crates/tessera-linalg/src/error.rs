// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type for the strict matrix entry points.

use thiserror::Error;

/// Failures reported by strict operations.
///
/// Legacy operations never return these; they fall back to documented values
/// instead (see each method's docs).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// A flat coefficient buffer had the wrong number of elements.
    #[error("coefficient buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Required element count.
        expected: usize,
        /// Supplied element count.
        actual: usize,
    },
    /// Zero determinant, zero row, or zero elimination pivot.
    #[error("matrix is singular")]
    Singular,
    /// LU inversion requires a symmetric matrix.
    #[error("matrix is not symmetric")]
    NotSymmetric,
    /// A homogeneous point transform produced `w == 0`.
    #[error("homogeneous weight is zero")]
    ZeroWeight,
}

impl MatrixError {
    /// Returns `Ok(())` when `actual == expected`, else `LengthMismatch`.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, actual })
        }
    }
}
