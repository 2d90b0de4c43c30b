//! Bulk re-indexing: rebuild dictionaries and co-boundaries from the live
//! records alone.

use super::MeshComplex3;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshComplexError;
use crate::topology::config::CapacityHint;
use crate::topology::dim::Dim;

impl MeshComplex3 {
    /// Recompute every face dictionary and co-boundary list from the live
    /// entities.
    ///
    /// Records stay where they are and keep their slots, apart from
    /// duplicates: when two live entities span the same node set, the lower
    /// slot survives and the other is released (a top-level duplicate hands
    /// its record over first). Entities pushed with
    /// [`Link::Standalone`](super::Link::Standalone) become visible to
    /// `find_*` and get their boundary linked in. Boundary faces that no
    /// entity references any more are released.
    pub fn rebuild(&mut self) -> Result<(), MeshComplexError> {
        let hint = CapacityHint::from_counts(self.live_counts());
        log::debug!("mesh-complex: rebuild {:?}", self.live_counts());

        for dim in Dim::ALL {
            self.layer_mut(dim).reindex(hint.rebuild_slots(dim))?;
        }
        let mut live: [Vec<u32>; 4] = Dim::ALL.map(|d| self.layer(d).live_slots());

        // Duplicates leave the snapshot as well, since their slots may be
        // recycled for new boundary faces below.
        let mut merged = 0usize;
        for dim in [Dim::Edge, Dim::Tria, Dim::Cell] {
            let layer = self.layer_mut(dim);
            let slots = std::mem::take(&mut live[dim.index()]);
            let mut kept = Vec::with_capacity(slots.len());
            for slot in slots {
                match layer.register(slot)? {
                    Some(keep) => {
                        log::warn!(
                            "mesh-complex: {dim:?} {slot} duplicates {keep} {:?}, merged",
                            layer.nodes_of(slot)
                        );
                        layer.absorb(keep, slot);
                        layer.release(slot);
                        merged += 1;
                    }
                    None => kept.push(slot),
                }
            }
            live[dim.index()] = kept;
        }

        // Parents first, so a face's support is known before it is visited.
        for dim in [Dim::Cell, Dim::Tria, Dim::Edge, Dim::Node] {
            for &slot in &live[dim.index()] {
                let layer = self.layer_mut(dim);
                if !layer.is_live(slot) {
                    continue;
                }
                if !layer.state(slot).is_retained() {
                    let nodes = layer.release(slot);
                    log::trace!("mesh-complex: rebuild drops {dim:?} {slot} {nodes:?}");
                    continue;
                }
                let nodes = layer.nodes_of(slot);
                self.descend(dim, slot, nodes)?;
            }
        }

        if merged > 0 {
            log::warn!("mesh-complex: rebuild merged {merged} duplicate entities");
        }
        log::debug!("mesh-complex: rebuilt to {:?}", self.live_counts());
        self.debug_assert_invariants();
        Ok(())
    }
}
