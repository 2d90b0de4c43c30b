//! Construction-time settings for a complex.

use super::dictionary::DEFAULT_HASH_SEED;
use super::dim::Dim;
use serde::{Deserialize, Serialize};

/// Expected number of entities per dimension, used to pre-size storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityHint {
    pub nodes: usize,
    pub edges: usize,
    pub trias: usize,
    pub cells: usize,
}

impl CapacityHint {
    /// Hint matching the current live counts of a complex, lowest dimension first.
    pub fn from_counts(counts: [usize; 4]) -> Self {
        let [nodes, edges, trias, cells] = counts;
        Self { nodes, edges, trias, cells }
    }

    #[inline]
    pub fn of(&self, dim: Dim) -> usize {
        match dim {
            Dim::Node => self.nodes,
            Dim::Edge => self.edges,
            Dim::Tria => self.trias,
            Dim::Cell => self.cells,
        }
    }

    /// Dictionary slots for incremental insertion: `5/4` of the
    /// same-dimension count, i.e. a 0.8 load factor.
    pub fn incremental_slots(&self, dim: Dim) -> usize {
        match dim {
            Dim::Node => 0,
            d => self.of(d) * 5 / 4 + 1,
        }
    }

    /// Dictionary slots ahead of a bulk rebuild, where every higher-dimensional
    /// entity may contribute boundary faces that are not stored yet.
    pub fn rebuild_slots(&self, dim: Dim) -> usize {
        match dim {
            Dim::Node => 0,
            Dim::Edge => {
                self.edges * 5 / 4 + 1 + self.trias * 5 / 2 + 1 + self.cells * 3 / 2 + 1
            }
            Dim::Tria => self.trias * 5 / 4 + 1 + self.cells * 5 / 2 + 1,
            Dim::Cell => self.cells * 5 / 4 + 1,
        }
    }
}

/// Settings for [`MeshComplex3`](super::complex::MeshComplex3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexConfig {
    /// Seed for the face dictionaries' hasher. Fixed so that iteration and
    /// probe order are reproducible between runs.
    pub hash_seed: u64,
    /// Expected sizes used to pre-size arenas and dictionaries.
    pub capacity: CapacityHint,
}

impl Default for ComplexConfig {
    fn default() -> Self {
        Self {
            hash_seed: DEFAULT_HASH_SEED,
            capacity: CapacityHint::default(),
        }
    }
}

impl ComplexConfig {
    pub fn with_capacity(mut self, capacity: CapacityHint) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_hash_seed(mut self, seed: u64) -> Self {
        self.hash_seed = seed;
        self
    }
}
