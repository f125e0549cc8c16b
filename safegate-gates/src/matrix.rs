//! Gate matrices and their output formats
//!
//! A [`GateMatrix`] is the owned, mutable, row-major form a matrix takes once
//! it is stored in a cache. Lookups can hand it back in any [`MatrixFormat`]:
//!
//! - [`MatrixFormat::Native`]: the `GateMatrix` itself
//! - [`MatrixFormat::Flat`]: row-major `Vec<Complex64>`
//! - [`MatrixFormat::Sparse`]: coordinate list of the non-zero entries
//!
//! # Example
//!
//! ```rust
//! use safegate_gates::matrix::{GateMatrix, MatrixFormat};
//!
//! let x = GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]]);
//! let sparse = x.render(MatrixFormat::Sparse);
//!
//! assert_eq!(sparse.to_native(), x);
//! ```

use num_complex::Complex64;
use safegate_core::{QuantumError, Result};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Compile-time guard for fixed-size array literals
struct NonEmpty<const N: usize>;

impl<const N: usize> NonEmpty<N> {
    const CHECK: () = assert!(N > 0, "gate matrix must have at least one row");
}

/// Square complex matrix stored in row-major order
///
/// A matrix always has at least one row. Fixed-size literals with zero
/// rows are rejected at compile time:
///
/// ```compile_fail
/// use num_complex::Complex64;
/// use safegate_gates::matrix::GateMatrix;
///
/// let empty: [[Complex64; 0]; 0] = [];
/// let _ = GateMatrix::from(empty);
/// ```
///
/// ```compile_fail
/// use safegate_gates::matrix::GateMatrix;
///
/// let _ = GateMatrix::from_real::<0>([]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GateMatrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl GateMatrix {
    /// Build a matrix from nested rows
    ///
    /// # Errors
    /// Returns `EmptyMatrix` for zero rows and `NotSquare` if any row length
    /// differs from the number of rows.
    pub fn from_rows<R: AsRef<[Complex64]>>(rows: &[R]) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(QuantumError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(QuantumError::not_square(dim, i, row.len()));
            }
            data.extend_from_slice(row);
        }

        Ok(Self { dim, data })
    }

    /// Build a matrix from nested rows of real numbers
    pub fn from_real_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let complex: Vec<Vec<Complex64>> = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|&re| Complex64::new(re, 0.0)).collect())
            .collect();
        Self::from_rows(&complex)
    }

    /// Build a matrix from a fixed-size real array
    ///
    /// `N` must be non-zero; this is checked at compile time.
    pub fn from_real<const N: usize>(rows: [[f64; N]; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = NonEmpty::<N>::CHECK;
        Self {
            dim: N,
            data: rows
                .iter()
                .flatten()
                .map(|&re| Complex64::new(re, 0.0))
                .collect(),
        }
    }

    /// The `dim × dim` identity
    ///
    /// # Errors
    /// Returns `EmptyMatrix` when `dim` is zero.
    pub fn identity(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(QuantumError::EmptyMatrix);
        }
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Ok(Self { dim, data })
    }

    /// Side length of the matrix
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits the matrix acts on, if its side is a power of two
    pub fn num_qubits(&self) -> Option<usize> {
        self.dim
            .is_power_of_two()
            .then(|| self.dim.trailing_zeros() as usize)
    }

    /// Entry at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        (row < self.dim && col < self.dim).then(|| self.data[row * self.dim + col])
    }

    /// Mutable entry at `(row, col)`, or `None` when out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Complex64> {
        if row < self.dim && col < self.dim {
            Some(&mut self.data[row * self.dim + col])
        } else {
            None
        }
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        // A zero-sized chunk would panic; zero-dim matrices have no rows
        self.data.chunks_exact(self.dim.max(1))
    }

    /// Row-major view of all entries
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Consume into the row-major entries
    pub fn into_flat(self) -> Vec<Complex64> {
        self.data
    }

    /// Entry-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &GateMatrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Render this matrix in the requested format
    pub fn render(&self, format: MatrixFormat) -> FormattedMatrix {
        match format {
            MatrixFormat::Native => FormattedMatrix::Native(self.clone()),
            MatrixFormat::Flat => FormattedMatrix::Flat {
                dim: self.dim,
                data: self.data.clone(),
            },
            MatrixFormat::Sparse => FormattedMatrix::Sparse(SparseMatrix::from_dense(self)),
        }
    }
}

impl Index<(usize, usize)> for GateMatrix {
    type Output = Complex64;

    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        assert!(
            row < self.dim && col < self.dim,
            "index ({}, {}) out of bounds for {}×{} matrix",
            row,
            col,
            self.dim,
            self.dim
        );
        &self.data[row * self.dim + col]
    }
}

impl IndexMut<(usize, usize)> for GateMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Complex64 {
        assert!(
            row < self.dim && col < self.dim,
            "index ({}, {}) out of bounds for {}×{} matrix",
            row,
            col,
            self.dim,
            self.dim
        );
        &mut self.data[row * self.dim + col]
    }
}

impl<const N: usize> From<[[Complex64; N]; N]> for GateMatrix {
    fn from(rows: [[Complex64; N]; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = NonEmpty::<N>::CHECK;
        Self {
            dim: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }
}

impl<const N: usize> From<[[f64; N]; N]> for GateMatrix {
    fn from(rows: [[f64; N]; N]) -> Self {
        Self::from_real(rows)
    }
}

impl TryFrom<Vec<Vec<Complex64>>> for GateMatrix {
    type Error = QuantumError;

    fn try_from(rows: Vec<Vec<Complex64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl fmt::Display for GateMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

/// Coordinate-list representation of a square matrix
///
/// Entries are kept in row-major order and never hold an exact zero.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    dim: usize,
    entries: Vec<(usize, usize, Complex64)>,
}

impl SparseMatrix {
    pub fn from_dense(matrix: &GateMatrix) -> Self {
        let dim = matrix.dim();
        let entries = matrix
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != ZERO)
            .map(|(k, &value)| (k / dim, k % dim, value))
            .collect();
        Self { dim, entries }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Stored `(row, col, value)` triplets
    pub fn entries(&self) -> &[(usize, usize, Complex64)] {
        &self.entries
    }

    pub fn to_dense(&self) -> GateMatrix {
        let mut data = vec![ZERO; self.dim * self.dim];
        for &(row, col, value) in &self.entries {
            data[row * self.dim + col] = value;
        }
        GateMatrix {
            dim: self.dim,
            data,
        }
    }
}

/// Output format selector for matrix lookups
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatrixFormat {
    /// The cached [`GateMatrix`] itself
    #[default]
    Native,
    /// Row-major flattened entries
    Flat,
    /// Coordinate list of non-zero entries
    Sparse,
}

impl MatrixFormat {
    pub const ALL: [MatrixFormat; 3] = [MatrixFormat::Native, MatrixFormat::Flat, MatrixFormat::Sparse];

    pub fn as_str(self) -> &'static str {
        match self {
            MatrixFormat::Native => "native",
            MatrixFormat::Flat => "flat",
            MatrixFormat::Sparse => "sparse",
        }
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixFormat {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "native" | "dense" => Ok(MatrixFormat::Native),
            "flat" | "row-major" => Ok(MatrixFormat::Flat),
            "sparse" | "coo" => Ok(MatrixFormat::Sparse),
            _ => Err(QuantumError::UnknownFormat(s.to_string())),
        }
    }
}

/// A matrix rendered in one of the [`MatrixFormat`]s
#[derive(Clone, Debug, PartialEq)]
pub enum FormattedMatrix {
    Native(GateMatrix),
    Flat { dim: usize, data: Vec<Complex64> },
    Sparse(SparseMatrix),
}

impl FormattedMatrix {
    /// The format this matrix was rendered in
    pub fn format(&self) -> MatrixFormat {
        match self {
            FormattedMatrix::Native(_) => MatrixFormat::Native,
            FormattedMatrix::Flat { .. } => MatrixFormat::Flat,
            FormattedMatrix::Sparse(_) => MatrixFormat::Sparse,
        }
    }

    pub fn dim(&self) -> usize {
        match self {
            FormattedMatrix::Native(m) => m.dim(),
            FormattedMatrix::Flat { dim, .. } => *dim,
            FormattedMatrix::Sparse(s) => s.dim(),
        }
    }

    /// Borrow the native matrix, if this is the native format
    pub fn as_native(&self) -> Option<&GateMatrix> {
        match self {
            FormattedMatrix::Native(m) => Some(m),
            _ => None,
        }
    }

    /// Convert back to the native form
    pub fn to_native(&self) -> GateMatrix {
        match self {
            FormattedMatrix::Native(m) => m.clone(),
            FormattedMatrix::Flat { dim, data } => GateMatrix {
                dim: *dim,
                data: data.clone(),
            },
            FormattedMatrix::Sparse(s) => s.to_dense(),
        }
    }

    pub fn into_native(self) -> GateMatrix {
        match self {
            FormattedMatrix::Native(m) => m,
            FormattedMatrix::Flat { dim, data } => GateMatrix { dim, data },
            FormattedMatrix::Sparse(s) => s.to_dense(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_from_rows() {
        let m = GateMatrix::from_rows(&[[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]])
            .unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.num_qubits(), Some(1));
        assert_eq!(m[(0, 1)], c(0.0, -1.0));
        assert_eq!(m.get(1, 0), Some(c(0.0, 1.0)));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_empty_rows_rejected() {
        let rows: Vec<Vec<Complex64>> = Vec::new();
        assert_eq!(GateMatrix::try_from(rows), Err(QuantumError::EmptyMatrix));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = GateMatrix::from_real_rows(&[vec![1.0, 0.0], vec![0.0]]);
        assert_eq!(
            result,
            Err(QuantumError::NotSquare {
                rows: 2,
                row: 1,
                len: 1
            })
        );
    }

    #[test]
    fn test_rectangular_rejected() {
        let result = GateMatrix::from_real_rows(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(matches!(result, Err(QuantumError::NotSquare { rows: 2, row: 0, len: 3 })));
    }

    #[test]
    fn test_zero_dim_identity_rejected() {
        assert_eq!(GateMatrix::identity(0), Err(QuantumError::EmptyMatrix));
        assert_eq!(GateMatrix::identity(1).unwrap().rows().count(), 1);
    }

    #[test]
    fn test_zero_dim_flat_conversion_has_no_rows() {
        let m = FormattedMatrix::Flat {
            dim: 0,
            data: Vec::new(),
        }
        .into_native();
        assert_eq!(m.rows().count(), 0);
        assert_eq!(m.to_string(), "[]");
        assert_eq!(SparseMatrix::from_dense(&m).nnz(), 0);
    }

    #[test]
    fn test_non_power_of_two_is_accepted() {
        let m = GateMatrix::identity(3).unwrap();
        assert_eq!(m.dim(), 3);
        assert_eq!(m.num_qubits(), None);
    }

    #[test]
    fn test_mutable_form() {
        let mut m = GateMatrix::identity(2).unwrap();
        m[(0, 1)] = c(0.5, 0.0);
        if let Some(entry) = m.get_mut(1, 1) {
            *entry = c(-1.0, 0.0);
        }
        assert!(m.get_mut(5, 5).is_none());
        assert_eq!(m.as_slice(), &[c(1.0, 0.0), c(0.5, 0.0), c(0.0, 0.0), c(-1.0, 0.0)]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let m = GateMatrix::identity(2).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_sparse_skips_zeros() {
        let cnot = GateMatrix::from_real([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 0.0],
        ]);
        let sparse = SparseMatrix::from_dense(&cnot);
        assert_eq!(sparse.nnz(), 4);
        assert_eq!(sparse.entries()[2], (2, 3, c(1.0, 0.0)));
        assert_eq!(sparse.to_dense(), cnot);
    }

    #[test]
    fn test_all_formats_equivalent() {
        let h = GateMatrix::from_real([[FRAC_1_SQRT_2, FRAC_1_SQRT_2], [FRAC_1_SQRT_2, -FRAC_1_SQRT_2]]);
        for format in MatrixFormat::ALL {
            let rendered = h.render(format);
            assert_eq!(rendered.format(), format);
            assert_eq!(rendered.dim(), 2);
            assert_eq!(rendered.to_native(), h);
        }

        if let FormattedMatrix::Flat { data, .. } = h.render(MatrixFormat::Flat) {
            assert_relative_eq!(data[3].re, -FRAC_1_SQRT_2);
        } else {
            panic!("Expected flat rendering");
        }
    }

    #[test]
    fn test_approx_eq() {
        let a = GateMatrix::from_real([[1.0, 0.0], [0.0, 1.0]]);
        let b = GateMatrix::from_real([[1.0 + 1e-12, 0.0], [0.0, 1.0]]);
        assert!(a.approx_eq(&b, 1e-10));
        assert!(!a.approx_eq(&GateMatrix::identity(4).unwrap(), 1e-10));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("native".parse::<MatrixFormat>().unwrap(), MatrixFormat::Native);
        assert_eq!("Dense".parse::<MatrixFormat>().unwrap(), MatrixFormat::Native);
        assert_eq!("flat".parse::<MatrixFormat>().unwrap(), MatrixFormat::Flat);
        assert_eq!("coo".parse::<MatrixFormat>().unwrap(), MatrixFormat::Sparse);
        assert_eq!(
            "numpy".parse::<MatrixFormat>(),
            Err(QuantumError::UnknownFormat("numpy".to_string()))
        );
        assert_eq!(MatrixFormat::default(), MatrixFormat::Native);
        assert_eq!(MatrixFormat::Sparse.to_string(), "sparse");
    }

    #[test]
    fn test_display() {
        let m = GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(m.to_string(), "[[0+0i, 1+0i], [1+0i, 0+0i]]");
    }
}
