//! Per-face parent lists.
//!
//! For each face slot, the slots of the higher-dimensional entities that
//! currently use it as boundary. Degrees are bounded by mesh valence, so a
//! plain `Vec` per face with linear scans is enough.

use super::dim::Dim;
use crate::mesh_error::MeshComplexError;

#[derive(Clone, Debug)]
pub struct CoBoundary {
    dim: Dim,
    lists: Vec<Vec<u32>>,
}

impl CoBoundary {
    pub fn new(dim: Dim, capacity: usize) -> Self {
        Self {
            dim,
            lists: Vec::with_capacity(capacity),
        }
    }

    /// Make sure `face` has a (possibly empty) list.
    fn ensure(&mut self, face: u32) -> Result<(), MeshComplexError> {
        let need = face as usize + 1;
        if need > self.lists.len() {
            let additional = need - self.lists.len();
            self.lists
                .try_reserve(additional)
                .map_err(|_| MeshComplexError::CapacityExhausted {
                    dim: self.dim,
                    additional,
                })?;
            self.lists.resize_with(need, Vec::new);
        }
        Ok(())
    }

    /// Append `parent` to the co-boundary of `face`.
    pub fn push(&mut self, face: u32, parent: u32) -> Result<(), MeshComplexError> {
        self.ensure(face)?;
        let list = &mut self.lists[face as usize];
        list.try_reserve(1)
            .map_err(|_| MeshComplexError::CapacityExhausted {
                dim: self.dim,
                additional: 1,
            })?;
        list.push(parent);
        Ok(())
    }

    /// Remove one occurrence of `parent`; order is not preserved.
    ///
    /// Returns whether `parent` was present.
    pub fn remove(&mut self, face: u32, parent: u32) -> bool {
        let Some(list) = self.lists.get_mut(face as usize) else {
            return false;
        };
        match list.iter().position(|&p| p == parent) {
            Some(i) => {
                list.swap_remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_empty(&self, face: u32) -> bool {
        self.parents(face).is_empty()
    }

    /// Parents of `face`; empty for faces never linked.
    #[inline]
    pub fn parents(&self, face: u32) -> &[u32] {
        self.lists
            .get(face as usize)
            .map_or(&[][..], |l| l.as_slice())
    }

    /// Empty the list of `face` (used when the slot is released).
    #[inline]
    pub fn reset(&mut self, face: u32) {
        if let Some(l) = self.lists.get_mut(face as usize) {
            l.clear();
        }
    }

    /// Faces with at least one list allocated.
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_all_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Empty every list; with `release_memory` also free the buffers.
    pub fn clear(&mut self, release_memory: bool) {
        if release_memory {
            self.lists = Vec::new();
        } else {
            for l in &mut self.lists {
                l.clear();
            }
        }
    }
}
