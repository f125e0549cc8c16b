//! Gate arity tags and the common gate interface

use crate::{QuantumError, Result, Targets};
use std::fmt;

/// Number of qubits a gate acts on
///
/// Only one-, two- and three-qubit gates are supported. Conversion from a
/// raw integer is the single validation point for arity.
///
/// # Example
/// ```
/// use safegate_core::{Arity, QuantumError};
///
/// assert_eq!(Arity::try_from(2).unwrap(), Arity::Two);
/// assert_eq!(Arity::Three.dim(), 8);
/// assert_eq!(Arity::try_from(0), Err(QuantumError::UnsupportedArity(0)));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arity {
    #[default]
    One,
    Two,
    Three,
}

impl Arity {
    /// Number of qubits
    #[inline]
    pub const fn num_qubits(self) -> usize {
        match self {
            Arity::One => 1,
            Arity::Two => 2,
            Arity::Three => 3,
        }
    }

    /// Side length of the matching matrix, 2^n
    #[inline]
    pub const fn dim(self) -> usize {
        1 << self.num_qubits()
    }

    /// Resolve a raw qubit count
    pub fn from_count(count: i64) -> Result<Self> {
        match count {
            1 => Ok(Arity::One),
            2 => Ok(Arity::Two),
            3 => Ok(Arity::Three),
            other => Err(QuantumError::UnsupportedArity(other)),
        }
    }
}

impl TryFrom<i64> for Arity {
    type Error = QuantumError;

    fn try_from(count: i64) -> Result<Self> {
        Self::from_count(count)
    }
}

impl TryFrom<i32> for Arity {
    type Error = QuantumError;

    fn try_from(count: i32) -> Result<Self> {
        Self::from_count(count.into())
    }
}

impl TryFrom<usize> for Arity {
    type Error = QuantumError;

    fn try_from(count: usize) -> Result<Self> {
        // Saturate so huge counts still report as unsupported
        Self::from_count(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::One => write!(f, "one-qubit"),
            Arity::Two => write!(f, "two-qubit"),
            Arity::Three => write!(f, "three-qubit"),
        }
    }
}

/// Trait for gates placed on specific qubits
///
/// Unlike a bare operator, an implementor already knows its targets.
///
/// # Example
/// ```
/// use safegate_core::{Arity, Gate, Targets};
///
/// #[derive(Debug)]
/// struct Marker(Targets);
///
/// impl Gate for Marker {
///     fn name(&self) -> &str { "M" }
///     fn arity(&self) -> Arity { Arity::One }
///     fn targets(&self) -> &Targets { &self.0 }
/// }
///
/// let m = Marker(0.into());
/// assert_eq!(m.num_qubits(), 1);
/// assert_eq!(m.description(), "one-qubit gate 'M' on (q0)");
/// ```
pub trait Gate: Send + Sync + fmt::Debug {
    /// The name of the gate
    fn name(&self) -> &str;

    /// Arity tag of this gate
    fn arity(&self) -> Arity;

    /// Qubits this gate acts on, in order
    fn targets(&self) -> &Targets;

    /// Number of qubits this gate acts on, as declared by its arity
    fn num_qubits(&self) -> usize {
        self.arity().num_qubits()
    }

    /// Minimum circuit width needed to hold every target
    fn min_qubits(&self) -> usize {
        self.targets().min_qubits()
    }

    /// Get a description of this gate
    fn description(&self) -> String {
        format!("{} gate '{}' on {}", self.arity(), self.name(), self.targets())
    }
}
