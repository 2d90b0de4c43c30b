//! Deletion: drop one support of an entity, release it when none is left,
//! and cascade the release down its boundary.

use super::MeshComplex3;
use crate::topology::dim::{Dim, NodeTuple};
use crate::topology::entity::{CellId, EdgeId, NodeId, TriaId};

impl MeshComplex3 {
    /// Drop one support of node `node`: the link from `parent` if given,
    /// otherwise its top-level flag. No-op if the node is not live.
    pub fn pop_node(&mut self, node: u32, parent: Option<EdgeId>) {
        self.pop_at(Dim::Node, node, parent.map(|p| p.get()));
    }

    /// Drop one support of the edge spanned by `nodes` (any order).
    ///
    /// With `parent`, only that parent's link is removed; without, the
    /// top-level flag is cleared. If the edge is left unsupported it is
    /// released, and its nodes lose this edge as parent in turn. No-op when
    /// no such edge is stored.
    pub fn pop_edge(&mut self, nodes: [u32; 2], parent: Option<TriaId>) {
        self.pop_tuple(Dim::Edge, &nodes, parent.map(|p| p.get()));
    }

    /// Triangle counterpart of [`pop_edge`](Self::pop_edge).
    pub fn pop_tria(&mut self, nodes: [u32; 3], parent: Option<CellId>) {
        self.pop_tuple(Dim::Tria, &nodes, parent.map(|p| p.get()));
    }

    /// Clear the top-level flag of the cell spanned by `nodes` and release it
    /// with whatever part of its boundary nothing else supports.
    pub fn pop_cell(&mut self, nodes: [u32; 4]) {
        self.pop_tuple(Dim::Cell, &nodes, None);
    }

    pub fn pop_node_at(&mut self, id: NodeId, parent: Option<EdgeId>) {
        self.pop_at(Dim::Node, id.get(), parent.map(|p| p.get()));
    }

    pub fn pop_edge_at(&mut self, id: EdgeId, parent: Option<TriaId>) {
        self.pop_at(Dim::Edge, id.get(), parent.map(|p| p.get()));
    }

    pub fn pop_tria_at(&mut self, id: TriaId, parent: Option<CellId>) {
        self.pop_at(Dim::Tria, id.get(), parent.map(|p| p.get()));
    }

    pub fn pop_cell_at(&mut self, id: CellId) {
        self.pop_at(Dim::Cell, id.get(), None);
    }

    fn pop_tuple(&mut self, dim: Dim, nodes: &[u32], parent: Option<u32>) {
        if let Some(slot) = self.layer(dim).lookup(nodes) {
            self.pop_at(dim, slot, parent);
        }
    }

    pub(crate) fn pop_at(&mut self, dim: Dim, slot: u32, parent: Option<u32>) {
        let layer = self.layer_mut(dim);
        if !layer.is_live(slot) {
            return;
        }
        match parent {
            Some(p) => layer.unlink_parent(slot, p),
            None => layer.set_top_level(slot, false),
        }
        if !layer.state(slot).is_retained() {
            self.release_cascade(dim, slot);
        }
    }

    /// Release `slot` and unlink it from each of its boundary faces, which
    /// may release those in turn.
    pub(crate) fn release_cascade(&mut self, dim: Dim, slot: u32) {
        let nodes: NodeTuple = self.layer_mut(dim).release(slot);
        log::trace!("mesh-complex: release {dim:?} {slot} {nodes:?}");
        let Some(down) = dim.down() else {
            return;
        };
        for face in (0..dim.boundary_table().len()).rev() {
            let tuple = dim.boundary_face(nodes.as_slice(), face);
            self.pop_tuple(down, tuple.as_slice(), Some(slot));
        }
    }
}
