//! One dimension's worth of storage, and the dimension-erased view over it.

use crate::mesh_error::MeshComplexError;
use crate::topology::arena::{Arena, ClearMode};
use crate::topology::coboundary::CoBoundary;
use crate::topology::dictionary::FaceDictionary;
use crate::topology::dim::{Dim, NodeTuple};
use crate::topology::entity::Entity;
use crate::topology::retention::Retention;

/// Arena, face dictionary (absent for nodes) and co-boundary index of one
/// dimension.
#[derive(Clone, Debug)]
pub(crate) struct Stratum<E> {
    pub(crate) arena: Arena<E>,
    pub(crate) dict: Option<FaceDictionary>,
    pub(crate) parents: CoBoundary,
}

impl<E: Entity> Stratum<E> {
    pub(crate) fn new(seed: u64, expected: usize, dict_slots: usize) -> Self {
        let dict = (E::DIM != Dim::Node).then(|| FaceDictionary::new(E::DIM, seed, dict_slots));
        Self {
            arena: Arena::with_capacity(expected),
            dict,
            parents: CoBoundary::new(E::DIM, expected),
        }
    }

    pub(crate) fn clear(&mut self, mode: ClearMode) {
        let release = mode == ClearMode::ReleaseMemory;
        self.arena.clear(mode);
        if let Some(d) = self.dict.as_mut() {
            d.clear(release);
        }
        self.parents.clear(release);
    }
}

/// Dimension-erased operations the insertion, deletion and rebuild
/// protocols need. Lets one recursive routine walk node → edge → tria → cell
/// without a copy per dimension.
pub(crate) trait Layer {
    /// Slot of the live entity with this node tuple. For nodes this is a
    /// bounds and liveness check on the index itself.
    fn lookup(&self, nodes: &[u32]) -> Option<u32>;

    fn is_live(&self, slot: u32) -> bool;
    fn state(&self, slot: u32) -> Retention;
    fn nodes_of(&self, slot: u32) -> NodeTuple;
    fn parents(&self, slot: u32) -> &[u32];
    fn live_count(&self) -> usize;
    fn slot_count(&self) -> usize;

    /// Allocate a face that exists only as boundary of `parent`, and register
    /// it in the dictionary.
    fn create_boundary(&mut self, nodes: &[u32], parent: u32) -> Result<u32, MeshComplexError>;

    /// Add `parent` to the co-boundary of `slot`.
    fn link_parent(&mut self, slot: u32, parent: u32) -> Result<(), MeshComplexError>;

    /// Drop `parent` from the co-boundary of `slot`, if present.
    fn unlink_parent(&mut self, slot: u32, parent: u32);

    fn set_top_level(&mut self, slot: u32, top_level: bool);

    /// Register `slot` in the dictionary. Returns the slot already bound to
    /// the same tuple, if any. Nodes are never registered.
    fn register(&mut self, slot: u32) -> Result<Option<u32>, MeshComplexError>;

    /// Remove `slot` from the dictionary, clear its co-boundary and put it on
    /// the free list. Returns its node tuple.
    fn release(&mut self, slot: u32) -> NodeTuple;

    /// Live slots in slot order.
    fn live_slots(&self) -> Vec<u32>;

    /// Empty the dictionary and presize it for `slots` bindings, and drop
    /// every parent link. Top-level flags survive.
    fn reindex(&mut self, slots: usize) -> Result<(), MeshComplexError>;

    /// Fold the duplicate `dup` into `keep`. A top-level duplicate hands over
    /// its record and flag. `dup` itself is left for the caller to release.
    fn absorb(&mut self, keep: u32, dup: u32);
}

impl<E: Entity> Layer for Stratum<E> {
    fn lookup(&self, nodes: &[u32]) -> Option<u32> {
        match &self.dict {
            Some(d) => d.find(nodes),
            None => {
                let n = *nodes.first()?;
                self.arena.is_live(n).then_some(n)
            }
        }
    }

    #[inline]
    fn is_live(&self, slot: u32) -> bool {
        self.arena.is_live(slot)
    }

    #[inline]
    fn state(&self, slot: u32) -> Retention {
        self.arena.state(slot)
    }

    #[inline]
    fn nodes_of(&self, slot: u32) -> NodeTuple {
        NodeTuple::from_slice(self.arena.record(slot).nodes())
    }

    #[inline]
    fn parents(&self, slot: u32) -> &[u32] {
        self.parents.parents(slot)
    }

    #[inline]
    fn live_count(&self) -> usize {
        self.arena.live_count()
    }

    #[inline]
    fn slot_count(&self) -> usize {
        self.arena.len()
    }

    fn create_boundary(&mut self, nodes: &[u32], parent: u32) -> Result<u32, MeshComplexError> {
        assert!(
            E::DIM != Dim::Node,
            "mesh-complex: node {} not here",
            nodes.first().copied().unwrap_or(u32::MAX)
        );
        let slot = self
            .arena
            .allocate(E::from_boundary(nodes), Retention::fresh(false, true))?;
        self.parents.reset(slot);
        self.parents.push(slot, parent)?;
        self.register(slot)?;
        Ok(slot)
    }

    fn link_parent(&mut self, slot: u32, parent: u32) -> Result<(), MeshComplexError> {
        self.parents.push(slot, parent)?;
        let state = self.arena.state(slot).with_support(true);
        self.arena.set_state(slot, state);
        Ok(())
    }

    fn unlink_parent(&mut self, slot: u32, parent: u32) {
        if self.parents.remove(slot, parent) {
            let state = self
                .arena
                .state(slot)
                .with_support(!self.parents.is_empty(slot));
            self.arena.set_state(slot, state);
        }
    }

    fn set_top_level(&mut self, slot: u32, top_level: bool) {
        let state = self.arena.state(slot).with_top_level(top_level);
        self.arena.set_state(slot, state);
    }

    fn register(&mut self, slot: u32) -> Result<Option<u32>, MeshComplexError> {
        match self.dict.as_mut() {
            Some(d) => d.insert(self.arena.record(slot).nodes(), slot),
            None => Ok(None),
        }
    }

    fn release(&mut self, slot: u32) -> NodeTuple {
        let nodes = self.nodes_of(slot);
        if let Some(d) = self.dict.as_mut() {
            d.remove(nodes.as_slice(), slot);
        }
        self.parents.reset(slot);
        self.arena.release(slot);
        nodes
    }

    fn live_slots(&self) -> Vec<u32> {
        self.arena.iter_live().map(|(slot, _)| slot).collect()
    }

    fn reindex(&mut self, slots: usize) -> Result<(), MeshComplexError> {
        if let Some(d) = self.dict.as_mut() {
            d.clear(false);
            d.presize(slots)?;
        }
        self.parents.clear(false);
        for slot in self.live_slots() {
            let state = self.arena.state(slot).with_support(false);
            self.arena.set_state(slot, state);
        }
        Ok(())
    }

    fn absorb(&mut self, keep: u32, dup: u32) {
        if self.arena.state(dup).is_top_level() {
            let record = self.arena.record(dup).clone();
            *self.arena.record_mut(keep) = record;
            self.set_top_level(keep, true);
        }
    }
}
