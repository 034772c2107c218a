//! Dense 2-D matrix primitives.
//!
//! Every numeric routine in this crate goes through [`Matrix`]; nothing else
//! touches raw buffers. Values are `f32`, stored contiguously in row-major
//! order and addressed by `row * cols + col`. Each matrix exclusively owns its
//! backing storage.
//!
//! Shape contracts are enforced with `assert!`: calling a binary operation on
//! operands that violate its algebraic constraint is a programmer error and
//! aborts with a diagnostic. Shapes are never coerced.
//!
//! Two kinds of multiplication exist and are deliberately named apart:
//! - [`Matrix::dot`] is the true matrix product (`a.cols == b.rows`)
//! - [`Matrix::hadamard`] is the elementwise product (identical shapes)

use std::ops::Range;

use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// All-zero matrix.
    ///
    /// Panics if `rows == 0` or `cols == 0`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be > 0, got ({rows}, {cols})"
        );
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Matrix of independent uniform values in `[0, 1)` drawn from `rng`.
    ///
    /// This is the weight-initialization domain. Panics if `rows == 0` or
    /// `cols == 0`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        Self::random_range(rows, cols, 0.0..1.0, rng)
    }

    /// Matrix of independent uniform values drawn from `range`.
    ///
    /// Panics if `rows == 0`, `cols == 0`, or `range` is empty.
    pub fn random_range<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        range: Range<f32>,
        rng: &mut R,
    ) -> Self {
        let mut m = Self::zeros(rows, cols);
        for v in m.data.iter_mut() {
            *v = rng.gen_range(range.clone());
        }
        m
    }

    /// Build a matrix from a flat row-major buffer.
    ///
    /// Panics if `data.len() != rows * cols` or either dimension is zero.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix dimensions must be > 0, got ({rows}, {cols})"
        );
        assert_eq!(
            data.len(),
            rows * cols,
            "data length {} does not match shape ({rows}, {cols})",
            data.len()
        );
        Self { rows, cols, data }
    }

    /// Build a `(1, n)` row vector from a slice.
    ///
    /// Panics if `values` is empty.
    pub fn row(values: &[f32]) -> Self {
        Self::from_vec(1, values.len(), values.to_vec())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f32 {
        debug_assert!(r < self.rows && c < self.cols);
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: f32) {
        debug_assert!(r < self.rows && c < self.cols);
        self.data[r * self.cols + c] = value;
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// In-place elementwise addition: `self[i][j] += rhs[i][j]`.
    ///
    /// Panics unless both matrices have identical shapes.
    pub fn add_assign(&mut self, rhs: &Matrix) {
        assert!(
            self.rows == rhs.rows && self.cols == rhs.cols,
            "add_assign shape mismatch: ({}, {}) vs ({}, {})",
            self.rows,
            self.cols,
            rhs.rows,
            rhs.cols
        );
        for (a, &b) in self.data.iter_mut().zip(&rhs.data) {
            *a += b;
        }
    }

    /// Elementwise (Hadamard) product. Not matrix multiplication.
    ///
    /// Panics unless both matrices have identical shapes.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert!(
            self.rows == rhs.rows && self.cols == rhs.cols,
            "hadamard shape mismatch: ({}, {}) vs ({}, {})",
            self.rows,
            self.cols,
            rhs.rows,
            rhs.cols
        );
        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(&a, &b)| a * b)
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// True matrix product with shape `(self.rows, rhs.cols)`.
    ///
    /// Panics unless `self.cols == rhs.rows`.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        assert!(
            self.cols == rhs.rows,
            "dot shape mismatch: ({}, {}) x ({}, {})",
            self.rows,
            self.cols,
            rhs.rows,
            rhs.cols
        );
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                let row = k * rhs.cols;
                let out_row = i * rhs.cols;
                for j in 0..rhs.cols {
                    out.data[out_row + j] = a.mul_add(rhs.data[row + j], out.data[out_row + j]);
                }
            }
        }
        out
    }

    /// In-place scalar multiplication.
    pub fn scale(&mut self, k: f32) {
        for v in self.data.iter_mut() {
            *v *= k;
        }
    }

    /// New matrix with shape `(self.cols, self.rows)`.
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// In-place logistic function: `x -> 1 / (1 + e^-x)`.
    pub fn sigmoid(&mut self) {
        for v in self.data.iter_mut() {
            *v = sigmoid(*v);
        }
    }

    /// Derivative of the logistic function, expressed in terms of its output.
    ///
    /// Each element `y` of `self` is assumed to already be a sigmoid output;
    /// the result holds `y * (1 - y)`.
    pub fn sigmoid_derivative(&self) -> Matrix {
        let data = self.data.iter().map(|&y| y * (1.0 - y)).collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Subtract a one-hot vector from a single-row matrix.
    ///
    /// Returns a new `(1, cols)` matrix where column `target` holds
    /// `self[0][target] - 1` and every other column is unchanged. This
    /// materializes `output - one_hot(target)` without building the one-hot
    /// vector.
    ///
    /// Panics unless `self.rows == 1` and `target < self.cols`.
    pub fn sub_one_hot(&self, target: usize) -> Matrix {
        assert_eq!(
            self.rows, 1,
            "sub_one_hot requires a row vector, got ({}, {})",
            self.rows, self.cols
        );
        assert!(
            target < self.cols,
            "one-hot index {target} out of range for {} columns",
            self.cols
        );
        let mut out = self.clone();
        out.data[target] -= 1.0;
        out
    }

    /// Reshape a `(1, n)` row vector into an `(n, 1)` column vector.
    ///
    /// Panics unless `self.rows == 1`.
    pub fn to_column(&self) -> Matrix {
        assert_eq!(
            self.rows, 1,
            "to_column requires a row vector, got ({}, {})",
            self.rows, self.cols
        );
        Matrix {
            rows: self.cols,
            cols: 1,
            data: self.data.clone(),
        }
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    // Numerically stable logistic.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dot_produces_the_expected_shape_and_values() {
        let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = a.dot(&b);

        assert_eq!((c.rows(), c.cols()), (2, 2));
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    #[should_panic]
    fn dot_panics_on_mismatched_inner_dims() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let _ = a.dot(&b);
    }

    #[test]
    #[should_panic]
    fn hadamard_panics_on_shape_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        let _ = a.hadamard(&b);
    }

    #[test]
    #[should_panic]
    fn zero_dimension_is_rejected() {
        let _ = Matrix::zeros(0, 3);
    }

    #[test]
    fn hadamard_is_elementwise_not_matrix_product() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]);
        let h = a.hadamard(&b);
        assert_eq!(h.as_slice(), &[5.0, 12.0, 21.0, 32.0]);

        // The true product of the same operands differs.
        let d = a.dot(&b);
        assert_eq!(d.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn transpose_is_an_involution() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Matrix::random(3, 5, &mut rng);
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn transpose_swaps_shape() {
        let a = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]);
        let t = a.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 1));
        assert_eq!(t.get(1, 0), 2.0);
    }

    #[test]
    fn sigmoid_stays_strictly_inside_the_unit_interval() {
        let inputs: Vec<f32> = (-100..=100).map(|i| i as f32 * 0.1).collect();
        let mut m = Matrix::from_vec(1, inputs.len(), inputs);
        m.sigmoid();
        for &y in m.as_slice() {
            assert!(y > 0.0 && y < 1.0, "sigmoid output {y} escaped (0, 1)");
        }
    }

    #[test]
    fn sigmoid_derivative_matches_output_form() {
        let mut m = Matrix::from_vec(1, 3, vec![-2.0, 0.0, 2.0]);
        m.sigmoid();
        let d = m.sigmoid_derivative();

        for (y, g) in m.as_slice().iter().zip(d.as_slice()) {
            assert!((g - y * (1.0 - y)).abs() < 1e-6);
        }
        // Maximized at y = 0.5 with value 0.25.
        assert!((d.get(0, 1) - 0.25).abs() < 1e-6);
        assert!(d.get(0, 0) < 0.25 && d.get(0, 2) < 0.25);
    }

    #[test]
    fn sub_one_hot_only_touches_the_target_column() {
        let row = Matrix::row(&[0.2, 0.7, 0.1]);
        let err = row.sub_one_hot(1);

        assert_eq!((err.rows(), err.cols()), (1, 3));
        assert!((err.get(0, 0) - 0.2).abs() < 1e-6);
        assert!((err.get(0, 1) - (0.7 - 1.0)).abs() < 1e-6);
        assert!((err.get(0, 2) - 0.1).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn sub_one_hot_rejects_out_of_range_target() {
        let row = Matrix::row(&[0.2, 0.8]);
        let _ = row.sub_one_hot(2);
    }

    #[test]
    fn to_column_preserves_values() {
        let row = Matrix::row(&[1.0, 2.0, 3.0]);
        let col = row.to_column();
        assert_eq!((col.rows(), col.cols()), (3, 1));
        assert_eq!(col.as_slice(), row.as_slice());
    }

    #[test]
    fn random_values_fall_in_the_unit_interval() {
        let mut rng = StdRng::seed_from_u64(0);
        let m = Matrix::random(4, 4, &mut rng);
        for &v in m.as_slice() {
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn add_assign_and_scale_compose() {
        let mut a = Matrix::from_vec(1, 2, vec![1.0, 2.0]);
        let mut b = Matrix::from_vec(1, 2, vec![10.0, 20.0]);
        b.scale(0.5);
        a.add_assign(&b);
        assert_eq!(a.as_slice(), &[6.0, 12.0]);
    }
}
