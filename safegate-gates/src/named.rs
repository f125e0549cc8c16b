//! Named gates backed by a matrix cache
//!
//! [`create_named_gate`] stores a matrix under a name and returns a gate of
//! the requested arity that is bound to that name. The gate never holds the
//! matrix: [`MatrixLookup::target_matrix`] reads the cache on every call, so
//! re-registering the name changes what every bound gate reports.
//!
//! # Example
//!
//! ```rust
//! use safegate_core::{Arity, Gate};
//! use safegate_gates::matrix::{GateMatrix, MatrixFormat};
//! use safegate_gates::matrix_cache::MatrixCache;
//! use safegate_gates::named::{create_named_gate, MatrixLookup};
//!
//! let mut cache = MatrixCache::new();
//! let x = GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]]);
//!
//! let gate = create_named_gate(&mut cache, 0, x.clone(), "X", 1).unwrap();
//! assert_eq!(gate.arity(), Arity::One);
//!
//! let matrix = gate.target_matrix(&cache, MatrixFormat::Native).unwrap();
//! assert_eq!(matrix.as_native(), Some(&x));
//! ```

use crate::matrix::{FormattedMatrix, GateMatrix, MatrixFormat};
use crate::matrix_cache::{MatrixSource, MatrixStore};
use safegate_core::{Arity, Gate, Result, Targets};
use std::fmt;

/// Capability of reading a gate's matrix from a cache by name
pub trait MatrixLookup {
    /// Name the matrix is registered under
    fn matrix_name(&self) -> &str;

    /// Current matrix for this gate, rendered in `format`
    ///
    /// # Errors
    /// Returns `MatrixNotFound` if the name has been removed from `source`.
    fn target_matrix<S>(&self, source: &S, format: MatrixFormat) -> Result<FormattedMatrix>
    where
        S: MatrixSource + ?Sized,
    {
        source.retrieve(self.matrix_name(), format)
    }

    /// Current matrix for this gate in native form
    fn native_matrix<S>(&self, source: &S) -> Result<GateMatrix>
    where
        S: MatrixSource + ?Sized,
    {
        self.target_matrix(source, MatrixFormat::Native)
            .map(FormattedMatrix::into_native)
    }
}

/// Defines a gate variant of fixed arity bound to a cached matrix name
macro_rules! named_gate_variant {
    ($(#[$meta:meta])* $gate_type:ident, $arity:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $gate_type {
            targets: Targets,
            name: String,
        }

        impl $gate_type {
            /// Arity shared by every gate of this type
            pub const ARITY: Arity = $arity;

            /// Bind a gate to the matrix registered under `name`
            ///
            /// Nothing is stored or checked; the name may not be registered yet.
            pub fn new(targets: impl Into<Targets>, name: impl Into<String>) -> Self {
                Self {
                    targets: targets.into(),
                    name: name.into(),
                }
            }
        }

        impl Gate for $gate_type {
            fn name(&self) -> &str {
                &self.name
            }

            fn arity(&self) -> Arity {
                Self::ARITY
            }

            fn targets(&self) -> &Targets {
                &self.targets
            }
        }

        impl MatrixLookup for $gate_type {
            fn matrix_name(&self) -> &str {
                &self.name
            }
        }
    };
}

named_gate_variant!(
    /// Named gate acting on one qubit
    OneQubitGate,
    Arity::One
);

named_gate_variant!(
    /// Named gate acting on two qubits
    TwoQubitGate,
    Arity::Two
);

named_gate_variant!(
    /// Named gate acting on three qubits
    ThreeQubitGate,
    Arity::Three
);

/// A named gate of any supported arity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamedGate {
    One(OneQubitGate),
    Two(TwoQubitGate),
    Three(ThreeQubitGate),
}

impl NamedGate {
    /// Bind a gate of the given arity to `name` without storing anything
    pub fn bind(arity: Arity, targets: impl Into<Targets>, name: impl Into<String>) -> Self {
        match arity {
            Arity::One => NamedGate::One(OneQubitGate::new(targets, name)),
            Arity::Two => NamedGate::Two(TwoQubitGate::new(targets, name)),
            Arity::Three => NamedGate::Three(ThreeQubitGate::new(targets, name)),
        }
    }

    fn inner(&self) -> &dyn Gate {
        match self {
            NamedGate::One(g) => g,
            NamedGate::Two(g) => g,
            NamedGate::Three(g) => g,
        }
    }

    pub fn as_one_qubit(&self) -> Option<&OneQubitGate> {
        match self {
            NamedGate::One(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_two_qubit(&self) -> Option<&TwoQubitGate> {
        match self {
            NamedGate::Two(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_three_qubit(&self) -> Option<&ThreeQubitGate> {
        match self {
            NamedGate::Three(g) => Some(g),
            _ => None,
        }
    }
}

impl Gate for NamedGate {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn arity(&self) -> Arity {
        self.inner().arity()
    }

    fn targets(&self) -> &Targets {
        self.inner().targets()
    }
}

impl MatrixLookup for NamedGate {
    fn matrix_name(&self) -> &str {
        match self {
            NamedGate::One(g) => g.matrix_name(),
            NamedGate::Two(g) => g.matrix_name(),
            NamedGate::Three(g) => g.matrix_name(),
        }
    }
}

impl From<OneQubitGate> for NamedGate {
    fn from(gate: OneQubitGate) -> Self {
        NamedGate::One(gate)
    }
}

impl From<TwoQubitGate> for NamedGate {
    fn from(gate: TwoQubitGate) -> Self {
        NamedGate::Two(gate)
    }
}

impl From<ThreeQubitGate> for NamedGate {
    fn from(gate: ThreeQubitGate) -> Self {
        NamedGate::Three(gate)
    }
}

impl fmt::Display for NamedGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.targets())
    }
}

/// Register `matrix` under `name` and return a gate bound to it
///
/// `arity` must be 1, 2 or 3. The number of targets and the matrix
/// dimension are not checked against it.
///
/// # Errors
/// - `UnsupportedArity` for any other arity; nothing is stored.
/// - `DuplicateName` if `store` rejects overwrites and `name` is taken.
pub fn create_named_gate<S>(
    store: &mut S,
    target: impl Into<Targets>,
    matrix: impl Into<GateMatrix>,
    name: impl Into<String>,
    arity: i64,
) -> Result<NamedGate>
where
    S: MatrixStore + ?Sized,
{
    let arity = Arity::try_from(arity)?;
    register_gate(store, target, matrix, name, arity)
}

/// [`create_named_gate`] with an already resolved arity
pub fn register_gate<S>(
    store: &mut S,
    target: impl Into<Targets>,
    matrix: impl Into<GateMatrix>,
    name: impl Into<String>,
    arity: Arity,
) -> Result<NamedGate>
where
    S: MatrixStore + ?Sized,
{
    let name = name.into();
    store.store_matrix(name.clone(), matrix.into())?;
    Ok(NamedGate::bind(arity, target, name))
}

/// [`create_named_gate`] for the default arity of one qubit
pub fn create_single_qubit_gate<S>(
    store: &mut S,
    target: impl Into<Targets>,
    matrix: impl Into<GateMatrix>,
    name: impl Into<String>,
) -> Result<NamedGate>
where
    S: MatrixStore + ?Sized,
{
    register_gate(store, target, matrix, name, Arity::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix_cache::{CacheConfig, MatrixCache};
    use safegate_core::{QuantumError, QubitId};

    fn pauli_x() -> GateMatrix {
        GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]])
    }

    #[test]
    fn test_bind_selects_variant() {
        assert!(NamedGate::bind(Arity::One, 0, "a").as_one_qubit().is_some());
        assert!(NamedGate::bind(Arity::Two, (0, 1), "b").as_two_qubit().is_some());
        assert!(NamedGate::bind(Arity::Three, (0, 1, 2), "c").as_three_qubit().is_some());
        assert!(NamedGate::bind(Arity::One, 0, "a").as_two_qubit().is_none());
    }

    #[test]
    fn test_variant_constants() {
        assert_eq!(OneQubitGate::ARITY, Arity::One);
        assert_eq!(TwoQubitGate::ARITY, Arity::Two);
        assert_eq!(ThreeQubitGate::ARITY, Arity::Three);
    }

    #[test]
    fn test_gate_interface_through_enum() {
        let gate: NamedGate = TwoQubitGate::new((1, 3), "CZ").into();
        assert_eq!(gate.name(), "CZ");
        assert_eq!(gate.matrix_name(), "CZ");
        assert_eq!(gate.num_qubits(), 2);
        assert_eq!(gate.targets().as_slice(), &[QubitId::new(1), QubitId::new(3)]);
        assert_eq!(gate.min_qubits(), 4);
        assert_eq!(gate.to_string(), "CZ(q1, q3)");
        assert_eq!(gate.description(), "two-qubit gate 'CZ' on (q1, q3)");
    }

    #[test]
    fn test_unsupported_arity_leaves_cache_untouched() {
        let mut cache = MatrixCache::new();
        cache.store("U", GateMatrix::identity(2).unwrap()).unwrap();

        let result = create_named_gate(&mut cache, 0, pauli_x(), "U", 4);
        assert_eq!(result, Err(QuantumError::UnsupportedArity(4)));
        assert_eq!(*cache.get("U").unwrap(), GateMatrix::identity(2).unwrap());
        assert_eq!(cache.statistics().overwrites, 0);
    }

    #[test]
    fn test_target_count_is_not_checked() {
        let mut cache = MatrixCache::new();
        let gate = create_named_gate(&mut cache, (0, 1, 2), pauli_x(), "odd", 1).unwrap();
        assert_eq!(gate.arity(), Arity::One);
        assert_eq!(gate.targets().len(), 3);
    }

    #[test]
    fn test_single_qubit_default() {
        let mut cache = MatrixCache::new();
        let gate = create_single_qubit_gate(&mut cache, 5, pauli_x(), "X").unwrap();
        assert_eq!(gate.arity(), Arity::One);
        assert_eq!(gate.native_matrix(&cache).unwrap(), pauli_x());
    }

    #[test]
    fn test_duplicate_rejected_by_strict_cache() {
        let mut cache = MatrixCache::with_config(CacheConfig::strict());
        create_named_gate(&mut cache, 0, pauli_x(), "X", 1).unwrap();

        let result = create_named_gate(&mut cache, 1, GateMatrix::identity(2).unwrap(), "X", 1);
        assert_eq!(result, Err(QuantumError::DuplicateName("X".to_string())));
    }

    #[test]
    fn test_lookup_after_remove_fails() {
        let mut cache = MatrixCache::new();
        let gate = create_named_gate(&mut cache, 0, pauli_x(), "X", 1).unwrap();
        cache.remove("X");

        assert_eq!(
            gate.target_matrix(&cache, MatrixFormat::Native),
            Err(QuantumError::MatrixNotFound("X".to_string()))
        );
    }
}
