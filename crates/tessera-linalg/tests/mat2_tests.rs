// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f64::consts::FRAC_PI_2;
use tessera_linalg::{Mat2, MatrixError, NumericConfig};

fn approx_eq2(a: [f64; 2], b: [f64; 2]) {
    const EPS: f64 = 1e-12;
    for i in 0..2 {
        assert!((a[i] - b[i]).abs() <= EPS, "index {i}: {a:?} vs {b:?}");
    }
}

#[test]
fn rotation_turns_x_into_y() {
    let r = Mat2::rotation(FRAC_PI_2);
    approx_eq2(r.mult_matrix_vec([1.0, 0.0]), [0.0, 1.0]);
    // row-vector form applies the inverse rotation
    approx_eq2(r.mult_vec_matrix([1.0, 0.0]), [0.0, -1.0]);
}

#[test]
fn closed_form_inverse_of_regular_matrix() {
    let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m.determinant(), -2.0);
    let inv = m.inverse();
    assert_eq!(inv, Mat2::from_rows([[-2.0, 1.0], [1.5, -0.5]]));
    assert_eq!(m.checked_inverse(), Ok(inv));
    assert!((m * inv).approx_eq(&Mat2::identity(), 1e-12));
}

#[test]
fn singular_inverse_falls_back_to_adjugate() {
    let m = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]);
    assert_eq!(m.determinant(), 0.0);
    assert_eq!(m.inverse(), Mat2::from_rows([[4.0, -2.0], [-2.0, 1.0]]));
    assert_eq!(m.checked_inverse(), Err(MatrixError::Singular));
}

#[test]
fn inverse_with_follows_policy() {
    let m = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]);
    assert_eq!(m.inverse_with(&NumericConfig::default()), Ok(m.inverse()));
    assert_eq!(
        m.inverse_with(&NumericConfig::strict()),
        Err(MatrixError::Singular)
    );
}

#[test]
fn gram_schmidt_orthonormalizes_columns() {
    let mut m = Mat2::from_cols([[3.0, 4.0], [7.0, -1.0]]);
    m.gram_schmidt();
    approx_eq2(m.col(0), [0.6, 0.8]);
    approx_eq2(m.col(1), [-0.8, 0.6]);
    assert!((m.determinant() - 1.0).abs() < 1e-12);
}

#[test]
fn gram_schmidt_of_degenerate_column_is_zero() {
    let mut m = Mat2::from_cols([[0.0, 0.0], [1.0, 1.0]]);
    m.gram_schmidt();
    assert_eq!(m, Mat2::zero());
}

#[test]
fn scale_keeps_off_diagonal() {
    let mut m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    m.set_scale(5.0);
    assert_eq!(m, Mat2::from_rows([[5.0, 2.0], [3.0, 5.0]]));
    m.set_scale_vec([6.0, 7.0]);
    assert_eq!(m, Mat2::from_rows([[6.0, 2.0], [3.0, 7.0]]));
}

#[test]
fn products_and_transpose() {
    let a = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    let b = Mat2::from_rows([[5.0, 6.0], [7.0, 8.0]]);
    assert_eq!(a * b, Mat2::from_rows([[19.0, 22.0], [43.0, 50.0]]));
    assert_eq!(a.transpose(), Mat2::from_rows([[1.0, 3.0], [2.0, 4.0]]));

    let mut left = b;
    left.mult_left(&a);
    assert_eq!(left, a * b);
    let mut right = a;
    right.mult_right(&b);
    assert_eq!(right, a * b);

    assert_eq!(a.mult_vec_matrix([1.0, 1.0]), [4.0, 6.0]);
    assert_eq!(a.mult_matrix_vec([1.0_f32, 2.0]), [5.0_f32, 11.0]);
}

#[test]
fn export_to_3x3_layout() {
    let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    let mut out = [9.0; 9];
    m.write_values_3x3(&mut out).unwrap();
    assert_eq!(out, [1.0, 3.0, 0.0, 2.0, 4.0, 0.0, 0.0, 0.0, 0.0]);

    let mut back = Mat2::identity();
    back.set_values_3x3(&out).unwrap();
    assert_eq!(back, m);

    assert_eq!(
        m.write_values_3x3(&mut [0.0; 8]),
        Err(MatrixError::LengthMismatch {
            expected: 9,
            actual: 8
        })
    );
}

#[test]
fn flat_values_are_column_major() {
    let m = Mat2::from_values(&[1.0, 3.0, 2.0, 4.0]).unwrap();
    assert_eq!(m, Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]));
    let mut out = [0.0_f32; 4];
    m.write_values_as(&mut out).unwrap();
    assert_eq!(out, [1.0, 3.0, 2.0, 4.0]);
    assert!(Mat2::from_values(&[1.0; 3]).is_err());
}
