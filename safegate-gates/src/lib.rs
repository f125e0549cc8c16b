//! Named custom gates for SafeGate
//!
//! This crate builds one-, two- and three-qubit gates from user supplied
//! matrices. Each matrix is stored under a name in a [`MatrixCache`] the
//! caller owns, and the returned gate looks its matrix up by that name
//! whenever asked.
//!
//! # Features
//!
//! - **Arity dispatch**: [`create_named_gate`] resolves 1, 2 or 3 to
//!   [`OneQubitGate`], [`TwoQubitGate`] or [`ThreeQubitGate`]
//! - **Late-bound lookup**: re-registering a name is visible to every gate
//!   bound to it
//! - **Output formats**: native, flat row-major and sparse coordinate form
//! - **Explicit overwrite policy**: replace (default) or reject duplicates
//! - **Shared cache**: [`SharedMatrixCache`] for registration from several owners
//!
//! # Example
//!
//! ```
//! use safegate_core::{Arity, Gate};
//! use safegate_gates::{create_named_gate, GateMatrix, MatrixCache, MatrixFormat, MatrixLookup};
//!
//! let mut cache = MatrixCache::new();
//!
//! let first = GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]]);
//! let second = GateMatrix::from_real([[1.0, 0.0], [0.0, -1.0]]);
//!
//! let gate = create_named_gate(&mut cache, 0, first, "U", 1).unwrap();
//! create_named_gate(&mut cache, 1, second.clone(), "U", 1).unwrap();
//!
//! // The first gate now reports the replacement
//! let matrix = gate.target_matrix(&cache, MatrixFormat::Native).unwrap();
//! assert_eq!(matrix.into_native(), second);
//! assert_eq!(gate.arity(), Arity::One);
//! ```

pub mod matrix;
pub mod matrix_cache;
pub mod named;

// Re-export commonly used items
pub use matrix::{FormattedMatrix, GateMatrix, MatrixFormat, SparseMatrix};
pub use matrix_cache::{
    CacheConfig, CacheStatistics, MatrixCache, MatrixSource, MatrixStore, OverwritePolicy,
    SharedMatrixCache,
};
pub use named::{
    create_named_gate, create_single_qubit_gate, register_gate, MatrixLookup, NamedGate,
    OneQubitGate, ThreeQubitGate, TwoQubitGate,
};
