//! Matrix cache keyed by gate name
//!
//! The cache owns every registered matrix; gates only keep the name they
//! were registered under and look the matrix up on demand. A later
//! registration under the same name replaces the earlier matrix (unless the
//! cache is configured with [`OverwritePolicy::Reject`]), and every gate
//! bound to that name sees the replacement on its next lookup.
//!
//! # Example
//!
//! ```rust
//! use safegate_gates::matrix::{GateMatrix, MatrixFormat};
//! use safegate_gates::matrix_cache::{MatrixCache, MatrixSource};
//!
//! let mut cache = MatrixCache::new();
//! cache.store("X", GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]])).unwrap();
//!
//! let flat = cache.retrieve("X", MatrixFormat::Flat).unwrap();
//! assert_eq!(flat.dim(), 2);
//! assert!(cache.retrieve("Y", MatrixFormat::Native).is_err());
//! ```

use crate::matrix::{FormattedMatrix, GateMatrix, MatrixFormat};
use parking_lot::RwLock;
use safegate_core::{QuantumError, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What to do when a name is registered twice
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the earlier matrix; last write wins
    #[default]
    Replace,
    /// Fail with `DuplicateName` and keep the earlier matrix
    Reject,
}

/// Configuration for a [`MatrixCache`]
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Behaviour on repeated names (default: `Replace`)
    pub overwrite: OverwritePolicy,

    /// Number of entries to pre-allocate (default: 16)
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            overwrite: OverwritePolicy::Replace,
            initial_capacity: 16,
        }
    }
}

impl CacheConfig {
    /// Configuration that refuses to overwrite existing names
    pub fn strict() -> Self {
        Self {
            overwrite: OverwritePolicy::Reject,
            ..Default::default()
        }
    }
}

/// Statistics about cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Lookups that found a matrix
    pub hits: usize,
    /// Lookups under an unknown name
    pub misses: usize,
    /// Registrations under a new name
    pub insertions: usize,
    /// Registrations that replaced an existing matrix
    pub overwrites: usize,
    /// Current number of entries
    pub current_size: usize,
}

impl CacheStatistics {
    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix Cache Statistics:")?;
        writeln!(f, "  Entries: {}", self.current_size)?;
        writeln!(f, "  Insertions: {}", self.insertions)?;
        writeln!(f, "  Overwrites: {}", self.overwrites)?;
        writeln!(f, "  Hits: {}", self.hits)?;
        writeln!(f, "  Misses: {}", self.misses)?;
        writeln!(f, "  Hit rate: {:.1}%", self.hit_rate())?;
        Ok(())
    }
}

/// Read access to cached matrices by name
pub trait MatrixSource {
    /// Current matrix stored under `name`
    fn lookup(&self, name: &str) -> Option<Arc<GateMatrix>>;

    /// Current matrix stored under `name`, rendered in `format`
    ///
    /// # Errors
    /// Returns `MatrixNotFound` if nothing is stored under `name`.
    fn retrieve(&self, name: &str, format: MatrixFormat) -> Result<FormattedMatrix> {
        self.lookup(name)
            .map(|matrix| matrix.render(format))
            .ok_or_else(|| QuantumError::matrix_not_found(name))
    }
}

/// Write access on top of [`MatrixSource`]
pub trait MatrixStore: MatrixSource {
    /// Store `matrix` under `name`, returning the matrix it replaced
    fn store_matrix(&mut self, name: String, matrix: GateMatrix) -> Result<Option<Arc<GateMatrix>>>;
}

/// Name-keyed matrix cache
///
/// Owned by the caller and passed to both registration and lookup; there is
/// no process-wide instance. Use [`SharedMatrixCache`] when several owners
/// need to register into the same cache.
#[derive(Debug)]
pub struct MatrixCache {
    config: CacheConfig,
    entries: HashMap<String, Arc<GateMatrix>>,
    insertions: usize,
    overwrites: usize,
    // Lookups only take &self
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl MatrixCache {
    /// Create an empty cache with the default configuration
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.initial_capacity),
            config,
            insertions: 0,
            overwrites: 0,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(CacheConfig {
            initial_capacity: capacity,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Store a matrix under `name`
    ///
    /// Returns the matrix previously stored under that name, if any.
    ///
    /// # Errors
    /// Returns `DuplicateName` when the name is taken and the cache rejects
    /// overwrites; the cache is left unchanged.
    pub fn store(
        &mut self,
        name: impl Into<String>,
        matrix: GateMatrix,
    ) -> Result<Option<Arc<GateMatrix>>> {
        let dim = matrix.dim();
        match self.entries.entry(name.into()) {
            Entry::Occupied(mut entry) => match self.config.overwrite {
                OverwritePolicy::Reject => {
                    warn!(name = %entry.key(), "rejected duplicate gate matrix");
                    Err(QuantumError::DuplicateName(entry.key().clone()))
                },
                OverwritePolicy::Replace => {
                    debug!(name = %entry.key(), dim, "overwriting gate matrix");
                    self.overwrites += 1;
                    Ok(Some(entry.insert(Arc::new(matrix))))
                },
            },
            Entry::Vacant(entry) => {
                debug!(name = %entry.key(), dim, "registered gate matrix");
                entry.insert(Arc::new(matrix));
                self.insertions += 1;
                Ok(None)
            },
        }
    }

    /// Current matrix stored under `name`
    pub fn get(&self, name: &str) -> Option<Arc<GateMatrix>> {
        match self.entries.get(name) {
            Some(matrix) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(name, "matrix cache hit");
                Some(Arc::clone(matrix))
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(name, "matrix cache miss");
                None
            },
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove the matrix stored under `name`
    ///
    /// Gates bound to the name fail their lookups until it is registered again.
    pub fn remove(&mut self, name: &str) -> Option<Arc<GateMatrix>> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            debug!(name, "removed gate matrix");
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "clearing matrix cache");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions,
            overwrites: self.overwrites,
            current_size: self.entries.len(),
        }
    }
}

impl Default for MatrixCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixSource for MatrixCache {
    fn lookup(&self, name: &str) -> Option<Arc<GateMatrix>> {
        self.get(name)
    }
}

impl MatrixStore for MatrixCache {
    fn store_matrix(&mut self, name: String, matrix: GateMatrix) -> Result<Option<Arc<GateMatrix>>> {
        self.store(name, matrix)
    }
}

/// Thread-safe matrix cache
///
/// Wraps a [`MatrixCache`] in `Arc<RwLock<>>`. Clones share the same
/// entries; each store or lookup is atomic and same-name stores race
/// last-write-wins.
///
/// `&SharedMatrixCache` is itself a [`MatrixStore`], so gates can be
/// registered through a shared borrow:
///
/// ```rust
/// use safegate_gates::{create_named_gate, GateMatrix, MatrixLookup, SharedMatrixCache};
///
/// let cache = SharedMatrixCache::new();
/// let x = GateMatrix::from_real([[0.0, 1.0], [1.0, 0.0]]);
/// let gate = create_named_gate(&mut &cache, 0, x.clone(), "X", 1).unwrap();
///
/// assert_eq!(gate.native_matrix(&cache).unwrap(), x);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedMatrixCache {
    inner: Arc<RwLock<MatrixCache>>,
}

impl SharedMatrixCache {
    pub fn new() -> Self {
        Self::from_cache(MatrixCache::new())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::from_cache(MatrixCache::with_config(config))
    }

    pub fn from_cache(cache: MatrixCache) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Store a matrix under `name`; see [`MatrixCache::store`]
    pub fn store(&self, name: impl Into<String>, matrix: GateMatrix) -> Result<Option<Arc<GateMatrix>>> {
        self.inner.write().store(name, matrix)
    }

    pub fn get(&self, name: &str) -> Option<Arc<GateMatrix>> {
        self.inner.read().get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains(name)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<GateMatrix>> {
        self.inner.write().remove(name)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.inner.read().names().into_iter().map(str::to_owned).collect()
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.inner.read().statistics()
    }
}

impl MatrixSource for SharedMatrixCache {
    fn lookup(&self, name: &str) -> Option<Arc<GateMatrix>> {
        self.get(name)
    }
}

impl MatrixStore for SharedMatrixCache {
    fn store_matrix(&mut self, name: String, matrix: GateMatrix) -> Result<Option<Arc<GateMatrix>>> {
        self.store(name, matrix)
    }
}

// Registration only needs a shared borrow, so `&mut &cache` works without
// a mutable binding or a clone.
impl MatrixSource for &SharedMatrixCache {
    fn lookup(&self, name: &str) -> Option<Arc<GateMatrix>> {
        (**self).get(name)
    }
}

impl MatrixStore for &SharedMatrixCache {
    fn store_matrix(&mut self, name: String, matrix: GateMatrix) -> Result<Option<Arc<GateMatrix>>> {
        (**self).store(name, matrix)
    }
}
