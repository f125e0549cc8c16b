//! Core types and traits for SafeGate
//!
//! This crate provides the fundamental types shared by named gates:
//! - [`QubitId`] and [`Targets`]: qubit addressing
//! - [`Arity`]: the one/two/three-qubit tag
//! - [`Gate`]: trait for gates placed on qubits
//! - [`QuantumError`]: the workspace error type
//!
//! # Example
//! ```
//! use safegate_core::{Arity, Targets};
//!
//! let arity = Arity::try_from(2).unwrap();
//! let targets: Targets = (0, 1).into();
//! assert_eq!(arity.num_qubits(), targets.len());
//! ```

pub mod error;
pub mod gate;
pub mod qubit;

// Re-exports for convenience
pub use error::QuantumError;
pub use gate::{Arity, Gate};
pub use num_complex::Complex64;
pub use qubit::{QubitId, Targets};

/// Type alias for results in SafeGate
pub type Result<T> = std::result::Result<T, QuantumError>;
