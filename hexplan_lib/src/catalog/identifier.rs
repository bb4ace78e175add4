//! Code for a typed string identifier.

use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
};

/// The unique identifier of a piece of reference data of kind `T`.
///
/// Identifiers are the human-readable keys used in catalog files and saved layouts (e.g. `gs_grass`),
/// so they are stored as strings rather than hashed.
/// The marker type keeps biome identifiers and pack identifiers from being mixed up.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T> {
    /// The identifier as written in the catalog.
    name: String,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    /// Creates a new identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _phantom: PhantomData,
        }
    }

    /// The identifier as written in the catalog.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Id").field(&self.name).finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> From<&str> for Id<T> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The marker type for [`Id<Biome>`](super::BiomeId).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Biome;

/// The marker type for [`Id<Pack>`](super::PackId).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pack;
