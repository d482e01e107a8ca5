use rand::prelude::*;
use std::f64::consts::PI;
use std::ops::{Index, IndexMut};

/// Dense row-major matrix with flat storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(rows.iter().all(|r| r.len() == cols), "ragged matrix rows");
        Matrix { rows: rows.len(), cols, data: rows.into_iter().flatten().collect() }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
        // (0, 1] avoids log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Xavier (Glorot) initialization: N(0, sqrt(1 / fan_in)).
    ///
    /// `fan_in` is the number of input connections, which for the layer
    /// weight layout (input × output) is `rows`.
    pub fn xavier(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let std_dev = (1.0 / rows.max(1) as f64).sqrt();
        let data = (0..rows * cols)
            .map(|_| Matrix::sample_standard_normal(&mut rng) * std_dev)
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    /// Row vector times matrix: `v · M`, with `v.len() == rows`.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "vector length must equal row count");
        let mut out = vec![0.0; self.cols];
        for (r, &x) in v.iter().enumerate() {
            if x == 0.0 {
                continue;
            }
            for (o, w) in out.iter_mut().zip(self.row(r)) {
                *o += x * w;
            }
        }
        out
    }

    /// Matrix times column vector: `M · v`, with `v.len() == cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.cols, "vector length must equal column count");
        (0..self.rows)
            .map(|r| self.row(r).iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Accumulates the outer product `a ⊗ b` into `self`.
    pub fn add_outer(&mut self, a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), self.rows);
        assert_eq!(b.len(), self.cols);
        for (r, &x) in a.iter().enumerate() {
            let start = r * self.cols;
            for (cell, y) in self.data[start..start + self.cols].iter_mut().zip(b) {
                *cell += x * y;
            }
        }
    }

    /// `self += other * scale`, element-wise.
    pub fn add_scaled(&mut self, other: &Matrix, scale: f64) {
        assert_eq!((self.rows, self.cols), (other.rows, other.cols), "matrices are of incorrect sizes");
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b * scale;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.data.iter_mut().for_each(|x| *x *= factor);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        &self.data[r * self.cols + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        &mut self.data[r * self.cols + c]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_mul_and_mul_vec() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(m.vec_mul(&[1.0, 0.0, 1.0]), vec![6.0, 8.0]);
        assert_eq!(m.mul_vec(&[1.0, 1.0]), vec![3.0, 7.0, 11.0]);
    }

    #[test]
    fn test_add_outer_accumulates() {
        let mut m = Matrix::zeros(2, 2);
        m.add_outer(&[1.0, 2.0], &[3.0, 4.0]);
        m.add_outer(&[1.0, 0.0], &[1.0, 1.0]);
        assert_eq!(m.as_slice(), &[4.0, 5.0, 6.0, 8.0]);
    }

    #[test]
    fn test_xavier_shape() {
        let m = Matrix::xavier(4, 3);
        assert_eq!((m.rows, m.cols), (4, 3));
        assert_eq!(m.as_slice().len(), 12);
        assert!(m.as_slice().iter().all(|x| x.is_finite()));
    }
}
