//! Upward adjacency ("star") queries over the co-boundary index.
//!
//! A star query walks from one entity up through the co-boundary lists,
//! one dimension per step, and reports every entity of the target
//! dimension reached. Each level is deduplicated with visit marks kept in
//! [`Frontiers`]; all marks are reset before the query returns, so the
//! scratch state between queries is always clean.

use crate::topology::arena::ClearMode;
use crate::topology::complex::stratum::Layer;
use crate::topology::complex::MeshComplex3;
use crate::topology::dim::Dim;
use crate::topology::entity::{
    CellId, EdgeId, Entity, EntityId, Id, NodeId, TriaId,
};

/// Per-dimension frontier lists and visit marks reused across queries.
#[derive(Clone, Debug, Default)]
pub(crate) struct Frontiers {
    levels: [Vec<u32>; 4],
    marks: [Vec<bool>; 4],
}

impl Frontiers {
    /// Mark `slot` visited; false if it already was.
    fn mark(&mut self, dim: Dim, slot: u32) -> bool {
        let marks = &mut self.marks[dim.index()];
        let i = slot as usize;
        if i >= marks.len() {
            marks.resize(i + 1, false);
        }
        !std::mem::replace(&mut marks[i], true)
    }

    /// Reset the marks of everything visited on levels `from..=to`, and empty
    /// those levels.
    fn reset(&mut self, from: Dim, to: Dim) {
        for d in from.index()..=to.index() {
            for &slot in &self.levels[d] {
                self.marks[d][slot as usize] = false;
            }
            self.levels[d].clear();
        }
    }

    /// Walk from `seed` up to `target`, appending the target-level slots to
    /// `out` in discovery order.
    fn expand(
        &mut self,
        layers: &[&dyn Layer; 4],
        seed: EntityId,
        target: Dim,
        out: &mut Vec<u32>,
    ) {
        for level in &mut self.levels {
            level.clear();
        }
        let from = seed.dim;
        self.mark(from, seed.slot);
        self.levels[from.index()].push(seed.slot);
        let mut dim = from;
        while dim < target {
            let Some(up) = dim.up() else { break };
            let (lower, upper) = self.levels.split_at_mut(up.index());
            let here = &lower[dim.index()];
            let next = &mut upper[0];
            let marks = &mut self.marks[up.index()];
            for &slot in here {
                for &p in layers[dim.index()].parents(slot) {
                    let i = p as usize;
                    if i >= marks.len() {
                        marks.resize(i + 1, false);
                    }
                    if !std::mem::replace(&mut marks[i], true) {
                        next.push(p);
                    }
                }
            }
            dim = up;
        }
        out.extend_from_slice(&self.levels[target.index()]);
        self.reset(from, target);
    }

    /// First mark left set, if any.
    pub(crate) fn first_marked(&self) -> Option<(Dim, u32)> {
        Dim::ALL.into_iter().find_map(|d| {
            self.marks[d.index()]
                .iter()
                .position(|&m| m)
                .map(|i| (d, i as u32))
        })
    }

    pub(crate) fn clear(&mut self, mode: ClearMode) {
        for l in &mut self.levels {
            l.clear();
        }
        for m in &mut self.marks {
            m.clear();
        }
        if mode == ClearMode::ReleaseMemory {
            self.levels = Default::default();
            self.marks = Default::default();
        }
    }

    #[cfg(test)]
    pub(crate) fn leave_mark(&mut self, dim: Dim, slot: u32) {
        self.mark(dim, slot);
    }
}

impl MeshComplex3 {
    /// Append to `out` every live entity of dimension `target` whose closure
    /// contains `seed`, each once, in discovery order. Returns how many were
    /// appended; a released seed yields none.
    ///
    /// # Panics
    /// Panics unless `target` is above `seed.dim`.
    pub fn star_dyn(&mut self, seed: EntityId, target: Dim, out: &mut Vec<EntityId>) -> usize {
        let mut slots = Vec::new();
        self.star_slots(seed, target, &mut slots);
        out.extend(slots.iter().map(|&s| EntityId::new(target, s)));
        slots.len()
    }

    /// Typed form of [`star_dyn`](Self::star_dyn).
    pub fn star<S: Entity, T: Entity>(&mut self, seed: Id<S>, out: &mut Vec<Id<T>>) -> usize {
        let mut slots = Vec::new();
        self.star_slots(seed.erase(), T::DIM, &mut slots);
        out.extend(slots.iter().map(|&s| Id::new(s)));
        slots.len()
    }

    fn star_slots(&mut self, seed: EntityId, target: Dim, out: &mut Vec<u32>) {
        assert!(
            target > seed.dim,
            "mesh-complex: star from {:?} to {target:?}",
            seed.dim
        );
        if !self.layer(seed.dim).is_live(seed.slot) {
            return;
        }
        let mut scratch = std::mem::take(&mut self.scratch);
        let layers = Dim::ALL.map(|d| self.layer(d));
        scratch.expand(&layers, seed, target, out);
        log::trace!(
            "mesh-complex: star {:?} -> {target:?}: {} found",
            seed,
            out.len()
        );
        self.scratch = scratch;
    }

    pub fn node_edges(&mut self, node: NodeId, out: &mut Vec<EdgeId>) -> usize {
        self.star(node, out)
    }

    pub fn node_trias(&mut self, node: NodeId, out: &mut Vec<TriaId>) -> usize {
        self.star(node, out)
    }

    pub fn node_cells(&mut self, node: NodeId, out: &mut Vec<CellId>) -> usize {
        self.star(node, out)
    }

    pub fn edge_trias(&mut self, edge: EdgeId, out: &mut Vec<TriaId>) -> usize {
        self.star(edge, out)
    }

    pub fn edge_cells(&mut self, edge: EdgeId, out: &mut Vec<CellId>) -> usize {
        self.star(edge, out)
    }

    pub fn tria_cells(&mut self, tria: TriaId, out: &mut Vec<CellId>) -> usize {
        self.star(tria, out)
    }

    /// [`edge_trias`](Self::edge_trias) of the edge spanned by `nodes`.
    /// False, with `out` untouched, if no such edge is stored.
    pub fn edge_trias_of(&mut self, nodes: [u32; 2], out: &mut Vec<TriaId>) -> bool {
        match self.find_edge(nodes) {
            Some(e) => {
                self.edge_trias(e, out);
                true
            }
            None => false,
        }
    }

    /// [`edge_cells`](Self::edge_cells) of the edge spanned by `nodes`.
    pub fn edge_cells_of(&mut self, nodes: [u32; 2], out: &mut Vec<CellId>) -> bool {
        match self.find_edge(nodes) {
            Some(e) => {
                self.edge_cells(e, out);
                true
            }
            None => false,
        }
    }

    /// [`tria_cells`](Self::tria_cells) of the triangle spanned by `nodes`.
    pub fn tria_cells_of(&mut self, nodes: [u32; 3], out: &mut Vec<CellId>) -> bool {
        match self.find_tria(nodes) {
            Some(t) => {
                self.tria_cells(t, out);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::complex::Link;
    use crate::topology::entity::{Node, Tetra};

    /// Five tets fanned around the edge (0, 1).
    fn fan() -> MeshComplex3 {
        let mut m = MeshComplex3::new();
        for i in 0..7 {
            m.push_node(Node::new([i as f64, 0.0, 0.0]), Link::TopLevel).unwrap();
        }
        for k in 0..5u32 {
            let a = 2 + k;
            let b = 2 + (k + 1) % 5;
            m.push_cell(Tetra::new([0, 1, a, b]), Link::TopLevel).unwrap();
        }
        m
    }

    #[test]
    fn edge_star_of_a_fan() {
        let mut m = fan();
        let mut cells = Vec::new();
        assert!(m.edge_cells_of([1, 0], &mut cells));
        assert_eq!(cells.len(), 5);
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 5);

        let mut trias = Vec::new();
        assert_eq!(m.edge_trias(m.find_edge([0, 1]).unwrap(), &mut trias), 5);
        assert!(m.scratch.first_marked().is_none());
    }

    #[test]
    fn node_star_counts() {
        let mut m = fan();
        let mut edges = Vec::new();
        let mut trias = Vec::new();
        let mut cells = Vec::new();
        // node 0 touches node 1 and the five rim nodes
        assert_eq!(m.node_edges(NodeId::new(0), &mut edges), 6);
        // 5 triangles through (0, 1), 5 through rim edges (0, a, b)
        assert_eq!(m.node_trias(NodeId::new(0), &mut trias), 10);
        assert_eq!(m.node_cells(NodeId::new(0), &mut cells), 5);
        // rim node 2 lies in two cells
        cells.clear();
        assert_eq!(m.node_cells(NodeId::new(2), &mut cells), 2);
        assert!(m.scratch.first_marked().is_none());
    }

    #[test]
    fn output_is_appended() {
        let mut m = fan();
        let t = m.find_tria([0, 1, 2]).unwrap();
        let mut out = vec![CellId::new(77)];
        assert_eq!(m.tria_cells(t, &mut out), 2);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], CellId::new(77));
    }

    #[test]
    fn unknown_tuples_and_released_seeds() {
        let mut m = fan();
        let mut cells: Vec<CellId> = Vec::new();
        let mut edge_trias: Vec<TriaId> = Vec::new();
        assert!(!m.tria_cells_of([2, 3, 4], &mut cells));
        assert!(!m.edge_trias_of([2, 4], &mut edge_trias));
        assert!(cells.is_empty());
        assert!(edge_trias.is_empty());

        let e = m.find_edge([2, 3]).unwrap();
        m.pop_cell([0, 1, 2, 3]);
        let mut trias = Vec::new();
        assert_eq!(m.edge_trias(e, &mut trias), 0);
    }

    #[test]
    fn dynamic_form_matches_typed() {
        let mut m = fan();
        let mut typed = Vec::new();
        let mut any = Vec::new();
        m.node_cells(NodeId::new(1), &mut typed);
        m.star_dyn(EntityId::new(Dim::Node, 1), Dim::Cell, &mut any);
        let erased: Vec<EntityId> = typed.iter().map(|c| c.erase()).collect();
        assert_eq!(erased, any);
    }

    #[test]
    #[should_panic(expected = "star from")]
    fn downward_star_panics() {
        let mut m = fan();
        let mut out = Vec::new();
        m.star_dyn(EntityId::new(Dim::Tria, 0), Dim::Edge, &mut out);
    }

    #[test]
    fn frontiers_report_leftover_marks() {
        let mut f = Frontiers::default();
        assert_eq!(f.first_marked(), None);
        f.leave_mark(Dim::Tria, 4);
        assert_eq!(f.first_marked(), Some((Dim::Tria, 4)));
        f.clear(ClearMode::RetainCapacity);
        assert_eq!(f.first_marked(), None);
    }
}
