//! Insertion: hash-cons a new entity and link its boundary top-down.

use super::stratum::Layer;
use super::{CellLink, Link, MeshComplex3, Select};
use crate::mesh_error::MeshComplexError;
use crate::topology::dim::{Dim, NodeTuple};
use crate::topology::entity::{
    CellId, Edge, EdgeId, Id, Node, NodeId, Tetra, Tria, TriaId,
};
use crate::topology::retention::Retention;

impl MeshComplex3 {
    /// Add a node.
    ///
    /// Top-level and standalone pushes allocate a new node (nodes are not
    /// deduplicated; a node's identity is its slot). [`Link::Under`] records
    /// `parent` in the co-boundary of the node already stored at
    /// [`Node::index`].
    ///
    /// # Panics
    /// With [`Link::Under`], panics if that node is not live.
    pub fn push_node(&mut self, node: Node, link: Link<EdgeId>) -> Result<NodeId, MeshComplexError> {
        match link {
            Link::Standalone | Link::TopLevel => {
                let slot = self.nodes.arena.allocate(node, Retention::fresh(true, false))?;
                self.nodes.arena.record_mut(slot).node = [slot];
                self.nodes.parents.reset(slot);
                Ok(Id::new(slot))
            }
            Link::Under(parent) => {
                let nodes = NodeTuple::from_slice(&[node.index()]);
                let slot = self.link_boundary(Dim::Node, nodes, parent.get())?;
                Ok(Id::new(slot))
            }
        }
    }

    /// Add an edge; see [`push_cell`](Self::push_cell) for the protocol.
    pub fn push_edge(&mut self, edge: Edge, link: Link<TriaId>) -> Result<EdgeId, MeshComplexError> {
        self.push_face(edge, link.map(Id::get)).map(Id::new)
    }

    /// Add a triangle; see [`push_cell`](Self::push_cell) for the protocol.
    pub fn push_tria(&mut self, tria: Tria, link: Link<CellId>) -> Result<TriaId, MeshComplexError> {
        self.push_face(tria, link.map(Id::get)).map(Id::new)
    }

    /// Add a tetrahedral cell.
    ///
    /// With [`Link::TopLevel`], a cell with the same node set as a stored one
    /// is not duplicated: the caller's record overwrites the stored record and
    /// the entity becomes top-level. A new cell is registered and its boundary
    /// triangles are pushed in turn, each either linked to an existing face or
    /// created, recursively down to the nodes.
    ///
    /// # Panics
    /// Panics if the node tuple repeats a node, or if it references a node
    /// that is not live.
    pub fn push_cell(&mut self, cell: Tetra, link: CellLink) -> Result<CellId, MeshComplexError> {
        self.push_face(cell, link.map(|never| match never {})).map(Id::new)
    }

    fn push_face<E: Select>(&mut self, record: E, link: Link<u32>) -> Result<u32, MeshComplexError> {
        let nodes = NodeTuple::from_slice(record.nodes());
        assert!(
            nodes.is_distinct(),
            "mesh-complex: degenerate {:?} {nodes:?}",
            E::DIM
        );
        match link {
            Link::Standalone => {
                let stratum = E::select_mut(self);
                let slot = stratum.arena.allocate(record, Retention::fresh(true, false))?;
                stratum.parents.reset(slot);
                Ok(slot)
            }
            Link::TopLevel => {
                let stratum = E::select_mut(self);
                if let Some(same) = stratum.lookup(nodes.as_slice()) {
                    // top-level data wins
                    *stratum.arena.record_mut(same) = record;
                    stratum.set_top_level(same, true);
                    return Ok(same);
                }
                let slot = stratum.arena.allocate(record, Retention::fresh(true, false))?;
                stratum.parents.reset(slot);
                stratum.register(slot)?;
                self.descend(E::DIM, slot, nodes)?;
                Ok(slot)
            }
            Link::Under(parent) => {
                let known = E::select(self).lookup(nodes.as_slice()).is_some();
                let slot = self.link_boundary(E::DIM, nodes, parent)?;
                if !known {
                    // a new face keeps the caller's payload
                    *E::select_mut(self).arena.record_mut(slot) = record;
                }
                Ok(slot)
            }
        }
    }

    /// Link `parent` to the face spanned by `nodes`, creating the face (and,
    /// recursively, its own boundary) if it is not stored yet.
    pub(crate) fn link_boundary(
        &mut self,
        dim: Dim,
        nodes: NodeTuple,
        parent: u32,
    ) -> Result<u32, MeshComplexError> {
        let layer = self.layer_mut(dim);
        if let Some(same) = layer.lookup(nodes.as_slice()) {
            layer.link_parent(same, parent)?;
            return Ok(same);
        }
        let slot = layer.create_boundary(nodes.as_slice(), parent)?;
        self.descend(dim, slot, nodes)?;
        Ok(slot)
    }

    /// Link every (d-1)-face of entity `slot` to it.
    pub(crate) fn descend(
        &mut self,
        dim: Dim,
        slot: u32,
        nodes: NodeTuple,
    ) -> Result<(), MeshComplexError> {
        let Some(down) = dim.down() else {
            return Ok(());
        };
        for face in (0..dim.boundary_table().len()).rev() {
            let tuple = dim.boundary_face(nodes.as_slice(), face);
            self.link_boundary(down, tuple, slot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DebugInvariants;

    fn nodes(m: &mut MeshComplex3, n: usize) {
        for i in 0..n {
            m.push_node(Node::new([i as f64, 0.0, 0.0]), Link::TopLevel)
                .unwrap();
        }
    }

    #[test]
    fn top_level_duplicate_overwrites_and_keeps_slot() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 3);
        let a = m.push_tria(Tria::new([0, 1, 2]).with_tag(1), Link::TopLevel).unwrap();
        let b = m.push_tria(Tria::new([2, 0, 1]).with_tag(7), Link::TopLevel).unwrap();
        assert_eq!(a, b);
        assert_eq!(m.count(Dim::Tria), 1);
        assert_eq!(m.tria(a).unwrap().tag, 7);
        assert_eq!(m.tria(a).unwrap().node, [2, 0, 1]);
        assert_eq!(m.count(Dim::Edge), 3);
        m.validate_invariants().unwrap();
    }

    #[test]
    fn boundary_face_becomes_top_level() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 4);
        m.push_cell(Tetra::new([0, 1, 2, 3]), Link::TopLevel).unwrap();
        let f = m.find_tria([0, 1, 2]).unwrap();
        assert_eq!(m.retention(f), Retention::BoundaryOnly);
        let again = m.push_tria(Tria::new([1, 2, 0]), Link::TopLevel).unwrap();
        assert_eq!(again, f);
        assert_eq!(m.retention(f), Retention::Both);
        assert_eq!(m.coboundary(f).len(), 1);
    }

    #[test]
    fn standalone_push_skips_dictionary() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 2);
        let e = m.push_edge(Edge::new([0, 1]), Link::Standalone).unwrap();
        assert_eq!(m.find_edge([0, 1]), None);
        assert_eq!(m.retention(e), Retention::Standalone);
        assert!(m.coboundary(NodeId::new(0)).is_empty());
    }

    #[test]
    fn under_parent_new_face_keeps_payload() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 3);
        let t = m.push_tria(Tria::new([0, 1, 2]), Link::Standalone).unwrap();
        let e = m.push_edge(Edge::new([0, 1]).with_tag(5), Link::Under(t)).unwrap();
        assert_eq!(m.edge(e).unwrap().tag, 5);
        assert_eq!(m.retention(e), Retention::BoundaryOnly);
        assert_eq!(m.coboundary(e), &[t.get()]);
        // nodes got linked to the new edge
        assert_eq!(m.coboundary(NodeId::new(0)), &[e.get()]);
    }

    #[test]
    fn node_under_parent_links_existing() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 2);
        let e = m.push_edge(Edge::new([0, 1]), Link::Standalone).unwrap();
        let n = m.push_node(Node::existing(1), Link::Under(e)).unwrap();
        assert_eq!(n.get(), 1);
        assert_eq!(m.retention(n), Retention::Both);
    }

    #[test]
    #[should_panic(expected = "not here")]
    fn missing_node_is_a_defect() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 3);
        let _ = m.push_tria(Tria::new([0, 1, 9]), Link::TopLevel);
    }

    #[test]
    #[should_panic(expected = "not here")]
    fn deserialized_node_under_parent_is_not_node_zero() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 2);
        let e = m.push_edge(Edge::new([0, 1]), Link::Standalone).unwrap();
        let n: Node = serde_json::from_str(r#"{"coord":[0.0,0.0,0.0],"tag":0}"#).unwrap();
        let _ = m.push_node(n, Link::Under(e));
    }

    #[test]
    #[should_panic(expected = "degenerate")]
    fn repeated_node_is_a_defect() {
        let mut m = MeshComplex3::new();
        nodes(&mut m, 3);
        let _ = m.push_tria(Tria::new([0, 1, 1]), Link::TopLevel);
    }
}
