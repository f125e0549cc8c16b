//! Error types for SafeGate

use thiserror::Error;

/// Errors raised while registering, constructing or looking up named gates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantumError {
    /// Gate arity outside {1, 2, 3}
    #[error("Unsupported number of qubits: {0} (expected 1, 2 or 3)")]
    UnsupportedArity(i64),

    /// A matrix is already cached under this name and overwrites are rejected
    #[error("A matrix named '{0}' is already registered")]
    DuplicateName(String),

    /// No matrix is cached under this name
    #[error("No matrix registered under '{0}'")]
    MatrixNotFound(String),

    /// A row of a matrix literal does not match the number of rows
    #[error("Matrix is not square: {rows} rows, but row {row} has {len} entries")]
    NotSquare { rows: usize, row: usize, len: usize },

    /// Matrix literal with no rows
    #[error("Matrix must have at least one row")]
    EmptyMatrix,

    /// Output format selector not recognised
    #[error("Unknown matrix format '{0}' (expected native, flat or sparse)")]
    UnknownFormat(String),
}

impl QuantumError {
    /// Create an unsupported arity error
    pub fn unsupported_arity(arity: impl Into<i64>) -> Self {
        Self::UnsupportedArity(arity.into())
    }

    /// Create a missing matrix error
    pub fn matrix_not_found(name: impl Into<String>) -> Self {
        Self::MatrixNotFound(name.into())
    }

    /// Create a non-square matrix error
    pub fn not_square(rows: usize, row: usize, len: usize) -> Self {
        Self::NotSquare { rows, row, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_arity_message() {
        let err = QuantumError::unsupported_arity(4);
        let msg = format!("{}", err);
        assert!(msg.contains("Unsupported number of qubits"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_negative_arity_is_kept() {
        let err = QuantumError::unsupported_arity(-1);
        assert_eq!(err, QuantumError::UnsupportedArity(-1));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_not_square_message() {
        let err = QuantumError::not_square(2, 1, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("2 rows"));
        assert!(msg.contains("row 1 has 3"));
    }

    #[test]
    fn test_matrix_not_found_names_the_key() {
        let err = QuantumError::matrix_not_found("U_foo");
        assert!(err.to_string().contains("'U_foo'"));
    }
}
