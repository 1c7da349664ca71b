// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Matrix;
use crate::layout::Layout;

impl<const N: usize, L: Layout> Mul for Matrix<N, L> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl<const N: usize, L: Layout> Mul<&Matrix<N, L>> for &Matrix<N, L> {
    type Output = Matrix<N, L>;
    fn mul(self, rhs: &Matrix<N, L>) -> Self::Output {
        self.multiply(rhs)
    }
}

impl<const N: usize, L: Layout> MulAssign for Matrix<N, L> {
    fn mul_assign(&mut self, rhs: Self) {
        self.mult_right(&rhs);
    }
}

impl<const N: usize, L: Layout> MulAssign<&Matrix<N, L>> for Matrix<N, L> {
    fn mul_assign(&mut self, rhs: &Self) {
        self.mult_right(rhs);
    }
}

impl<const N: usize, L: Layout> MulAssign<f64> for Matrix<N, L> {
    fn mul_assign(&mut self, rhs: f64) {
        for v in self.as_mut_slice() {
            *v *= rhs;
        }
    }
}

impl<const N: usize, L: Layout> Mul<f64> for Matrix<N, L> {
    type Output = Self;
    fn mul(mut self, rhs: f64) -> Self::Output {
        self *= rhs;
        self
    }
}

impl<const N: usize, L: Layout> Mul<Matrix<N, L>> for f64 {
    type Output = Matrix<N, L>;
    fn mul(self, rhs: Matrix<N, L>) -> Self::Output {
        rhs * self
    }
}

impl<const N: usize, L: Layout> AddAssign for Matrix<N, L> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
            *a += *b;
        }
    }
}

impl<const N: usize, L: Layout> Add for Matrix<N, L> {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl<const N: usize, L: Layout> SubAssign for Matrix<N, L> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
            *a -= *b;
        }
    }
}

impl<const N: usize, L: Layout> Sub for Matrix<N, L> {
    type Output = Self;
    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl<const N: usize, L: Layout> Neg for Matrix<N, L> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for v in self.as_mut_slice() {
            *v = -*v;
        }
        self
    }
}
