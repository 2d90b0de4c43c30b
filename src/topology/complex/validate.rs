//! Structural self-check of the whole complex.

use super::stratum::{Layer, Stratum};
use super::MeshComplex3;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshComplexError;
use crate::topology::dictionary::FaceKey;
use crate::topology::entity::Entity;
use itertools::Itertools;

impl DebugInvariants for MeshComplex3 {
    fn validate_invariants(&self) -> Result<(), MeshComplexError> {
        if let Some((dim, slot)) = self.scratch.first_marked() {
            return Err(MeshComplexError::MarkNotCleared { dim, slot });
        }
        check_stratum(&self.nodes, Some(&self.edges))?;
        check_stratum(&self.edges, Some(&self.trias))?;
        check_stratum(&self.trias, Some(&self.cells))?;
        check_stratum(&self.cells, None)?;
        Ok(())
    }
}

fn check_stratum<E: Entity>(
    s: &Stratum<E>,
    up: Option<&dyn Layer>,
) -> Result<(), MeshComplexError> {
    let dim = E::DIM;

    if let Some(dict) = &s.dict {
        for (key, slot) in dict.iter() {
            let stale = !s.arena.is_live(slot)
                || FaceKey::new(s.arena.record(slot).nodes()) != *key;
            if stale {
                return Err(MeshComplexError::StaleDictionaryEntry { dim, slot });
            }
        }
    }

    for (slot, record) in s.arena.iter_live() {
        let state = s.arena.state(slot);
        if !state.is_retained() {
            return Err(MeshComplexError::UnsupportedEntity { dim, slot });
        }
        let parents = s.parents.parents(slot);
        if state.is_supported() == parents.is_empty() {
            return Err(MeshComplexError::RetentionMismatch { dim, slot });
        }
        if let Some(&parent) = parents.iter().duplicates().next() {
            return Err(MeshComplexError::DuplicateParent { dim, slot, parent });
        }
        let Some(up) = up else { continue };
        for &parent in parents {
            if !bounds(up, parent, record.nodes()) {
                return Err(MeshComplexError::CoBoundaryMismatch { dim, slot, parent });
            }
        }
    }

    let free = s.arena.free_slots();
    if let Some(&slot) = free
        .iter()
        .find(|&&f| s.arena.is_live(f))
        .or_else(|| free.iter().duplicates().next())
    {
        return Err(MeshComplexError::FreeListCorrupt { dim, slot });
    }
    Ok(())
}

/// Whether live `parent` has every node of `face` among its own.
fn bounds(up: &dyn Layer, parent: u32, face: &[u32]) -> bool {
    if !up.is_live(parent) {
        return false;
    }
    let p = up.nodes_of(parent);
    face.iter().all(|n| p.as_slice().contains(n))
}
