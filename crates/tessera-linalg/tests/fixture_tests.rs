// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Pins the fallback values of the legacy inverse entry points.

use once_cell::sync::Lazy;
use serde::Deserialize;

use tessera_linalg::{Mat2, Mat3, Mat4, MatN};

static RAW_FIXTURES: &str = include_str!("fixtures/inverse-fixtures.json");

static FIXTURES: Lazy<InverseFixtures> = Lazy::new(|| {
    let fixtures: InverseFixtures =
        serde_json::from_str(RAW_FIXTURES).expect("failed to parse inverse fixtures");
    assert!(!fixtures.cases.is_empty(), "inverse fixtures must not be empty");
    fixtures
});

#[derive(Debug, Deserialize)]
struct InverseFixtures {
    tolerance: f64,
    cases: Vec<InverseCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Kind {
    Mat2Inverse,
    Mat3Inverse,
    Mat4Inverse,
    MatnInvert,
}

#[derive(Debug, Deserialize)]
struct InverseCase {
    name: String,
    kind: Kind,
    rows: Vec<Vec<f64>>,
    expected: Vec<Vec<f64>>,
}

fn fixed<const N: usize>(rows: &[Vec<f64>]) -> [[f64; N]; N] {
    assert_eq!(rows.len(), N, "expected {N} rows");
    core::array::from_fn(|i| {
        assert_eq!(rows[i].len(), N, "row {i} must have {N} values");
        core::array::from_fn(|j| rows[i][j])
    })
}

fn check<const N: usize>(case: &InverseCase, got: [[f64; N]; N], tol: f64) {
    let want = fixed::<N>(&case.expected);
    for i in 0..N {
        for j in 0..N {
            assert!(
                (got[i][j] - want[i][j]).abs() <= tol,
                "{} ({i},{j}): got {} want {}",
                case.name,
                got[i][j],
                want[i][j]
            );
        }
    }
}

fn rows_of<const N: usize, L: tessera_linalg::Layout>(m: &tessera_linalg::Matrix<N, L>) -> [[f64; N]; N] {
    core::array::from_fn(|i| m.row(i))
}

#[test]
fn inverse_fixtures_match() {
    let tol = FIXTURES.tolerance;
    for case in &FIXTURES.cases {
        match (&case.kind, case.rows.len()) {
            (Kind::Mat2Inverse, _) => {
                let inv = Mat2::from_rows(fixed(&case.rows)).inverse();
                check::<2>(case, rows_of(&inv), tol);
            }
            (Kind::Mat3Inverse, _) => {
                let inv = Mat3::from_rows(fixed(&case.rows)).inverse();
                check::<3>(case, rows_of(&inv), tol);
            }
            (Kind::Mat4Inverse, _) => {
                let inv = Mat4::from_rows(fixed(&case.rows)).inverse();
                check::<4>(case, rows_of(&inv), tol);
            }
            (Kind::MatnInvert, 3) => {
                let mut m = MatN::<3>::from_rows(fixed(&case.rows));
                m.invert();
                check::<3>(case, rows_of(&m), tol);
            }
            (Kind::MatnInvert, 4) => {
                let mut m = MatN::<4>::from_rows(fixed(&case.rows));
                m.invert();
                check::<4>(case, rows_of(&m), tol);
            }
            (Kind::MatnInvert, n) => panic!("{}: unsupported size {n}", case.name),
        }
    }
}
