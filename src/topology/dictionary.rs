//! Hash-consing of faces by their sorted node tuple.
//!
//! Two faces of the same dimension are the same entity iff they reference the
//! same set of nodes, in any order. The dictionary keys on the sorted tuple
//! ([`FaceKey`]) and maps it to the arena slot holding the face. Nodes never
//! go through here: a node's identity is its own slot.

use super::dim::{Dim, NodeTuple};
use crate::mesh_error::MeshComplexError;
use ahash::RandomState;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// Seed used when none is configured.
pub const DEFAULT_HASH_SEED: u64 = 137;

/// Canonical, order-independent identity of a face.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceKey(NodeTuple);

impl FaceKey {
    /// Sort `nodes` into canonical order.
    pub fn new(nodes: &[u32]) -> Self {
        let n = nodes.len();
        assert!(n <= 4, "face key longer than a tetrahedron");
        let mut buf = [0u32; 4];
        buf[..n].copy_from_slice(nodes);
        buf[..n].sort_unstable();
        FaceKey(NodeTuple::from_slice(&buf[..n]))
    }

    #[inline]
    pub fn nodes(&self) -> &[u32] {
        self.0.as_slice()
    }
}

impl std::fmt::Debug for FaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FaceKey{:?}", self.0)
    }
}

/// Sorted-tuple to slot map for one face dimension.
#[derive(Clone, Debug)]
pub struct FaceDictionary {
    dim: Dim,
    map: HashMap<FaceKey, u32, RandomState>,
}

impl FaceDictionary {
    /// Empty dictionary with room for `slots` bindings.
    ///
    /// Callers size `slots` from [`CapacityHint`](super::config::CapacityHint),
    /// which already folds in the 0.8 target load factor.
    pub fn new(dim: Dim, seed: u64, slots: usize) -> Self {
        debug_assert!(dim != Dim::Node, "nodes are not hash-consed");
        let hasher = RandomState::with_seeds(seed, seed ^ 0x9e37_79b9, dim.index() as u64, 0);
        Self {
            dim,
            map: HashMap::with_capacity_and_hasher(slots, hasher),
        }
    }

    #[inline]
    pub fn dim(&self) -> Dim {
        self.dim
    }

    /// Slot of the face structurally identical to `nodes`, if any.
    #[inline]
    pub fn find(&self, nodes: &[u32]) -> Option<u32> {
        self.map.get(&FaceKey::new(nodes)).copied()
    }

    /// Register a newly created face.
    ///
    /// Returns the slot already bound to the same key instead of overwriting
    /// it, so callers can detect duplicates.
    pub fn insert(&mut self, nodes: &[u32], slot: u32) -> Result<Option<u32>, MeshComplexError> {
        self.map
            .try_reserve(1)
            .map_err(|_| MeshComplexError::CapacityExhausted {
                dim: self.dim,
                additional: 1,
            })?;
        match self.map.entry(FaceKey::new(nodes)) {
            Entry::Occupied(e) => Ok(Some(*e.get())),
            Entry::Vacant(e) => {
                e.insert(slot);
                Ok(None)
            }
        }
    }

    /// Drop the binding for `nodes`, but only if it names `slot`.
    ///
    /// Returns the removed binding.
    pub fn remove(&mut self, nodes: &[u32], slot: u32) -> Option<u32> {
        let key = FaceKey::new(nodes);
        match self.map.get(&key) {
            Some(&bound) if bound == slot => self.map.remove(&key),
            _ => None,
        }
    }

    /// Grow so that `slots` bindings fit without rehashing.
    pub fn presize(&mut self, slots: usize) -> Result<(), MeshComplexError> {
        let additional = slots.saturating_sub(self.map.len());
        self.map
            .try_reserve(additional)
            .map_err(|_| MeshComplexError::CapacityExhausted {
                dim: self.dim,
                additional,
            })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FaceKey, u32)> + '_ {
        self.map.iter().map(|(k, &v)| (k, v))
    }

    pub fn clear(&mut self, release_memory: bool) {
        self.map.clear();
        if release_memory {
            self.map.shrink_to_fit();
        }
    }
}
