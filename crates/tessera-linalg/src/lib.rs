// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Dense small-matrix linear algebra for Tessera.

This crate provides:
- One generic square matrix, [`Matrix`], with compile-time size and storage
  layout, plus the aliases [`Mat2`], [`Mat3`], [`Mat4`] and [`MatN`].
- Size-specific fast paths: closed-form determinant/inverse for 2x2 and 3x3,
  scaled-pivot Gauss-Jordan inversion and homogeneous transforms for 4x4.
- An LU decomposition with scaled partial pivoting ([`lu`]) used to invert
  symmetric matrices of any size and to solve small linear systems.

Conventions:
- Coefficients are `f64`. `Mat2`/`Mat3`/`MatN` are stored row-major, `Mat4` is
  stored column-major to match column-major graphics APIs. Flat bulk exchange
  (`set_values`, `write_values`) always walks column-major order.
- Degenerate inputs produce documented fallback values by default. Every such
  entry point has a strict sibling returning [`MatrixError`].
- Vectors are not owned here; anything implementing [`Components`] (plain
  `[f64; K]` / `[f32; K]` arrays included) can be transformed.
"]

pub mod config;
pub mod error;
pub mod layout;
pub mod lu;
pub mod matrix;
pub mod scalar;
pub mod vector;

pub use config::{ConfigError, NumericConfig, SingularPolicy};
pub use error::MatrixError;
pub use layout::{ColMajor, Layout, RowMajor};
pub use lu::LuFactors;
pub use matrix::{Mat2, Mat3, Mat4, MatN, Matrix};
pub use vector::{Coefficient, Components};
