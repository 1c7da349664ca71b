// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seams to the caller's numeric types.
//!
//! Matrices never own vectors. They read and write anything that converts to
//! and from a fixed-length coefficient array, so engine-side vector types only
//! need a [`Components`] impl to be transformed.

/// Scalar element type accepted by typed bulk exchange and vector seams.
///
/// Conversions follow `as` semantics: `f64 -> f32` rounds to nearest.
pub trait Coefficient: Copy {
    /// Converts from the library's native `f64`.
    fn from_f64(value: f64) -> Self;

    /// Converts to the library's native `f64`.
    fn to_f64(self) -> f64;
}

impl Coefficient for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Coefficient for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// A fixed-length numeric tuple of `K` components.
///
/// Implemented for `[T; K]` with `T: Coefficient`; engine vector types can opt
/// in by converting through an array.
pub trait Components<const K: usize>: Copy {
    /// Returns the components widened to `f64`.
    fn to_components(self) -> [f64; K];

    /// Builds a value from `f64` components.
    fn from_components(components: [f64; K]) -> Self;
}

impl<T: Coefficient, const K: usize> Components<K> for [T; K] {
    fn to_components(self) -> [f64; K] {
        self.map(Coefficient::to_f64)
    }

    fn from_components(components: [f64; K]) -> Self {
        components.map(T::from_f64)
    }
}
