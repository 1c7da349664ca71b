// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar helpers shared by the matrix routines: tolerance comparisons and
//! angle conversions.

/// Default tolerance of [`equivalent`].
pub const EPSILON: f64 = 10e-6;

/// Default tolerance of the symmetry check and the LU pivot floor.
pub const FEQ_EPSILON: f64 = 1e-6;

/// Multiply degrees by this to get radians.
pub const DEG_TO_RAD: f64 = 0.017_453_292_519_943_295_769_236_907_684_886;

/// Multiply radians by this to get degrees.
pub const RAD_TO_DEG: f64 = 57.295_779_513_082_320_876_798_154_814_105;

/// Returns `true` when `a` lies in the open interval `(b - EPSILON, b + EPSILON)`.
pub fn equivalent(a: f64, b: f64) -> bool {
    equivalent_within(a, b, EPSILON)
}

/// Returns `true` when `a` lies in the open interval `(b - eps, b + eps)`.
///
/// NaN on either side never compares equivalent.
pub fn equivalent_within(a: f64, b: f64, eps: f64) -> bool {
    a < b + eps && a > b - eps
}

/// Absolute-difference comparison, `|a - b| < eps`.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// Converts degrees to radians.
pub fn deg_to_rad(value: f64) -> f64 {
    value * DEG_TO_RAD
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f64) -> f64 {
    value * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_is_an_open_interval() {
        assert!(equivalent(1.0, 1.0));
        assert!(equivalent(1.0 + 5e-6, 1.0));
        assert!(!equivalent(1.0 + 2e-5, 1.0));
        assert!(equivalent_within(0.5, 0.0, 0.6));
        assert!(!equivalent_within(0.5, 0.0, 0.5));
    }

    #[test]
    fn nan_is_never_equivalent() {
        assert!(!equivalent(f64::NAN, f64::NAN));
        assert!(!approx_eq(f64::NAN, 0.0, 1.0));
    }

    #[test]
    fn deg_rad_roundtrip() {
        for deg in [0.0, 45.0, 90.0, 180.0, -270.0] {
            assert!(approx_eq(rad_to_deg(deg_to_rad(deg)), deg, 1e-12));
        }
        assert!(approx_eq(deg_to_rad(180.0), core::f64::consts::PI, 1e-15));
    }
}
