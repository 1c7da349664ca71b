// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Physical storage order of a [`crate::Matrix`].
//!
//! Logical addressing is always `(row, col)`. The layout only decides which
//! index is the outer one in memory, which is what raw-buffer consumers
//! (e.g. `as_slice` handed to a graphics API) observe.

use core::fmt::Debug;

/// Storage order marker.
pub trait Layout: Copy + Clone + Debug + Default + PartialEq + Eq + 'static {
    /// `true` when consecutive memory walks down a column.
    const COLUMN_MAJOR: bool;

    /// Maps a logical `(row, col)` to `(outer, inner)` storage indices.
    fn slot(row: usize, col: usize) -> (usize, usize) {
        if Self::COLUMN_MAJOR {
            (col, row)
        } else {
            (row, col)
        }
    }
}

/// Rows are contiguous: flat index is `row * N + col`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Columns are contiguous: flat index is `row + col * N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColMajor;

impl Layout for RowMajor {
    const COLUMN_MAJOR: bool = false;
}

impl Layout for ColMajor {
    const COLUMN_MAJOR: bool = true;
}
