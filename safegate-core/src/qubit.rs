//! Qubit addressing and gate targets

use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Index of a circuit wire
///
/// # Example
/// ```
/// use safegate_core::QubitId;
///
/// let q = QubitId::new(2);
/// assert_eq!(q.index(), 2);
/// assert_eq!(q.to_string(), "q2");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Identify the wire at `id`
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Wire position, as used for ordering targets and sizing circuits
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

/// Ordered qubit indices a gate acts on
///
/// Accepts a single index or an ordered tuple/array/vector of indices.
/// The count is not checked against any gate's arity; a gate that is
/// given the wrong number of targets simply carries them.
///
/// # Example
/// ```
/// use safegate_core::{QubitId, Targets};
///
/// let single: Targets = 0.into();
/// let pair: Targets = (0, 1).into();
/// let triple: Targets = [2, 0, 1].into();
///
/// assert_eq!(single.len(), 1);
/// assert_eq!(pair.as_slice(), &[QubitId::new(0), QubitId::new(1)]);
/// assert_eq!(triple.first(), Some(&QubitId::new(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Targets(SmallVec<[QubitId; 3]>); // Gates here never exceed 3 qubits

impl Targets {
    /// Copy an ordered slice of qubits
    pub fn new(qubits: &[QubitId]) -> Self {
        Self(SmallVec::from_slice(qubits))
    }

    /// Targets in the order the gate was given them
    #[inline]
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    /// Number of wires that are needed to hold every target
    ///
    /// This is one past the highest index, or zero for an empty target list.
    pub fn min_qubits(&self) -> usize {
        self.0.iter().map(|q| q.index() + 1).max().unwrap_or(0)
    }
}

impl Deref for Targets {
    type Target = [QubitId];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Targets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, q) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl From<QubitId> for Targets {
    fn from(q: QubitId) -> Self {
        Self(smallvec::smallvec![q])
    }
}

impl From<usize> for Targets {
    fn from(index: usize) -> Self {
        QubitId::new(index).into()
    }
}

impl From<&[QubitId]> for Targets {
    fn from(qubits: &[QubitId]) -> Self {
        Self::new(qubits)
    }
}

impl From<Vec<QubitId>> for Targets {
    fn from(qubits: Vec<QubitId>) -> Self {
        Self(SmallVec::from_vec(qubits))
    }
}

impl From<Vec<usize>> for Targets {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().map(QubitId::new).collect()
    }
}

impl<const N: usize> From<[usize; N]> for Targets {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().map(QubitId::new).collect()
    }
}

impl<const N: usize> From<[QubitId; N]> for Targets {
    fn from(qubits: [QubitId; N]) -> Self {
        qubits.into_iter().collect()
    }
}

impl From<(usize,)> for Targets {
    fn from(t: (usize,)) -> Self {
        t.0.into()
    }
}

impl From<(usize, usize)> for Targets {
    fn from(t: (usize, usize)) -> Self {
        [t.0, t.1].into()
    }
}

impl From<(usize, usize, usize)> for Targets {
    fn from(t: (usize, usize, usize)) -> Self {
        [t.0, t.1, t.2].into()
    }
}

impl FromIterator<QubitId> for Targets {
    fn from_iter<I: IntoIterator<Item = QubitId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
