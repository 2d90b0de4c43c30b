//! [`MeshComplex3`]: a tetrahedral incidence complex with shared faces.
//!
//! The complex stores nodes, edges, triangles and tetrahedral cells, one
//! arena per dimension. Faces of dimension one and up are hash-consed by
//! their sorted node tuple, so two cells that share a triangle share one
//! stored triangle, and each face keeps the list of higher-dimensional
//! entities using it (its co-boundary).
//!
//! An entity stays allocated while it is *retained*: inserted top-level by
//! the caller, or referenced by at least one parent. Inserting a cell links
//! its boundary faces top-down, creating the ones that are new; removing it
//! unlinks them and releases whichever lose their last support.
//!
//! # Example
//! ```rust
//! use mesh_complex::prelude::*;
//!
//! # fn try_main() -> Result<(), MeshComplexError> {
//! let mut mesh = MeshComplex3::new();
//! for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0]] {
//!     mesh.push_node(Node::new(p), Link::TopLevel)?;
//! }
//! let a = mesh.push_cell(Tetra::new([0, 1, 2, 3]), Link::TopLevel)?;
//! let b = mesh.push_cell(Tetra::new([1, 2, 3, 4]), Link::TopLevel)?;
//!
//! let shared = mesh.find_tria([3, 1, 2]).expect("shared face");
//! let mut cells = Vec::new();
//! mesh.tria_cells(shared, &mut cells);
//! cells.sort();
//! assert_eq!(cells, vec![a, b]);
//! assert_eq!(mesh.count(Dim::Edge), 9);
//! # Ok(())
//! # }
//! # try_main().unwrap();
//! ```

mod insert;
mod rebuild;
mod remove;
pub(crate) mod stratum;
mod validate;

use self::stratum::{Layer, Stratum};
use crate::algs::adjacency::Frontiers;
use crate::topology::arena::ClearMode;
use crate::topology::config::ComplexConfig;
use crate::topology::dim::{Dim, NodeTuple};
use crate::topology::entity::{
    CellId, Edge, EdgeId, Entity, EntityId, Id, Node, NodeId, Tetra, Tria, TriaId,
};
use crate::topology::retention::Retention;
use std::convert::Infallible;

/// How an entity enters the complex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link<P> {
    /// Stored as a top-level entity without deduplication or boundary
    /// linking. Such entities are invisible to `find_*` until
    /// [`MeshComplex3::rebuild`] picks them up.
    Standalone,
    /// Stored as a top-level entity, deduplicated against existing faces,
    /// with its boundary linked in.
    TopLevel,
    /// Stored (or found) as boundary face of the given parent.
    Under(P),
}

/// Cells have no parent dimension.
pub type CellLink = Link<Infallible>;

impl<P> Link<P> {
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Link<Q> {
        match self {
            Link::Standalone => Link::Standalone,
            Link::TopLevel => Link::TopLevel,
            Link::Under(p) => Link::Under(f(p)),
        }
    }

    /// Whether the entity takes part in deduplication and boundary linking.
    #[inline]
    pub fn is_linked(&self) -> bool {
        !matches!(self, Link::Standalone)
    }
}

/// Tetrahedral incidence complex. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct MeshComplex3 {
    config: ComplexConfig,
    pub(crate) nodes: Stratum<Node>,
    pub(crate) edges: Stratum<Edge>,
    pub(crate) trias: Stratum<Tria>,
    pub(crate) cells: Stratum<Tetra>,
    pub(crate) scratch: Frontiers,
}

impl Default for MeshComplex3 {
    fn default() -> Self {
        Self::with_config(ComplexConfig::default())
    }
}

/// Typed access to the stratum holding record type `Self`.
pub(crate) trait Select: Entity {
    fn select(c: &MeshComplex3) -> &Stratum<Self>;
    fn select_mut(c: &mut MeshComplex3) -> &mut Stratum<Self>;
}

macro_rules! select_stratum {
    ($ty:ty, $field:ident) => {
        impl Select for $ty {
            #[inline]
            fn select(c: &MeshComplex3) -> &Stratum<Self> {
                &c.$field
            }
            #[inline]
            fn select_mut(c: &mut MeshComplex3) -> &mut Stratum<Self> {
                &mut c.$field
            }
        }
    };
}

select_stratum!(Node, nodes);
select_stratum!(Edge, edges);
select_stratum!(Tria, trias);
select_stratum!(Tetra, cells);

impl MeshComplex3 {
    /// Empty complex with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComplexConfig) -> Self {
        let seed = config.hash_seed;
        let hint = config.capacity;
        let make = |d: Dim| (hint.of(d), hint.incremental_slots(d));
        let (n0, s0) = make(Dim::Node);
        let (n1, s1) = make(Dim::Edge);
        let (n2, s2) = make(Dim::Tria);
        let (n3, s3) = make(Dim::Cell);
        Self {
            config,
            nodes: Stratum::new(seed, n0, s0),
            edges: Stratum::new(seed, n1, s1),
            trias: Stratum::new(seed, n2, s2),
            cells: Stratum::new(seed, n3, s3),
            scratch: Frontiers::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ComplexConfig {
        &self.config
    }

    #[inline]
    pub(crate) fn layer(&self, dim: Dim) -> &dyn Layer {
        match dim {
            Dim::Node => &self.nodes,
            Dim::Edge => &self.edges,
            Dim::Tria => &self.trias,
            Dim::Cell => &self.cells,
        }
    }

    #[inline]
    pub(crate) fn layer_mut(&mut self, dim: Dim) -> &mut dyn Layer {
        match dim {
            Dim::Node => &mut self.nodes,
            Dim::Edge => &mut self.edges,
            Dim::Tria => &mut self.trias,
            Dim::Cell => &mut self.cells,
        }
    }

    // ---------- record access ----------

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.arena.get(id.get())
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.arena.get(id.get())
    }

    #[inline]
    pub fn tria(&self, id: TriaId) -> Option<&Tria> {
        self.trias.arena.get(id.get())
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Tetra> {
        self.cells.arena.get(id.get())
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.arena.iter_live().map(|(s, r)| (Id::new(s), r))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.arena.iter_live().map(|(s, r)| (Id::new(s), r))
    }

    pub fn trias(&self) -> impl Iterator<Item = (TriaId, &Tria)> + '_ {
        self.trias.arena.iter_live().map(|(s, r)| (Id::new(s), r))
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Tetra)> + '_ {
        self.cells.arena.iter_live().map(|(s, r)| (Id::new(s), r))
    }

    /// Number of live entities of dimension `dim`.
    #[inline]
    pub fn count(&self, dim: Dim) -> usize {
        self.layer(dim).live_count()
    }

    /// Live counts, lowest dimension first.
    pub fn live_counts(&self) -> [usize; 4] {
        Dim::ALL.map(|d| self.count(d))
    }

    /// True when no dimension holds a live entity.
    pub fn is_empty(&self) -> bool {
        self.live_counts().iter().all(|&n| n == 0)
    }

    /// Number of bindings in the face dictionary of `dim` (zero for nodes).
    pub fn dictionary_len(&self, dim: Dim) -> usize {
        let dict = match dim {
            Dim::Node => None,
            Dim::Edge => self.edges.dict.as_ref(),
            Dim::Tria => self.trias.dict.as_ref(),
            Dim::Cell => self.cells.dict.as_ref(),
        };
        dict.map_or(0, |d| d.len())
    }

    // ---------- lookup ----------

    /// The live node with index `node`, if any.
    #[inline]
    pub fn find_node(&self, node: u32) -> Option<NodeId> {
        self.nodes.lookup(&[node]).map(Id::new)
    }

    /// The edge spanned by `nodes`, in any order.
    #[inline]
    pub fn find_edge(&self, nodes: [u32; 2]) -> Option<EdgeId> {
        self.edges.lookup(&nodes).map(Id::new)
    }

    /// The triangle spanned by `nodes`, in any order.
    #[inline]
    pub fn find_tria(&self, nodes: [u32; 3]) -> Option<TriaId> {
        self.trias.lookup(&nodes).map(Id::new)
    }

    /// The cell spanned by `nodes`, in any order.
    #[inline]
    pub fn find_cell(&self, nodes: [u32; 4]) -> Option<CellId> {
        self.cells.lookup(&nodes).map(Id::new)
    }

    // ---------- retention ----------

    /// Lifecycle state of `id`; out-of-range slots read as released.
    pub fn retention(&self, id: impl Into<EntityId>) -> Retention {
        let id = id.into();
        let layer = self.layer(id.dim);
        if (id.slot as usize) < layer.slot_count() {
            layer.state(id.slot)
        } else {
            Retention::Released
        }
    }

    /// True iff `id` is not retained: neither top-level nor referenced by a
    /// parent (released slots included).
    #[inline]
    pub fn is_null(&self, id: impl Into<EntityId>) -> bool {
        !self.retention(id).is_retained()
    }

    #[inline]
    pub fn null_node(&self, id: NodeId) -> bool {
        self.is_null(id)
    }

    #[inline]
    pub fn null_edge(&self, id: EdgeId) -> bool {
        self.is_null(id)
    }

    #[inline]
    pub fn null_tria(&self, id: TriaId) -> bool {
        self.is_null(id)
    }

    #[inline]
    pub fn null_cell(&self, id: CellId) -> bool {
        self.is_null(id)
    }

    // ---------- incidence ----------

    /// Raw slots of the entities one dimension up that use `id` as boundary.
    #[inline]
    pub fn coboundary(&self, id: impl Into<EntityId>) -> &[u32] {
        let id = id.into();
        self.layer(id.dim).parents(id.slot)
    }

    /// Append the stored (d-1)-faces of `id` to `out`, looked up through the
    /// dictionaries. Faces that are not stored (possible for entities pushed
    /// with [`Link::Standalone`]) are skipped.
    ///
    /// Returns how many faces were appended.
    pub fn boundary(&self, id: impl Into<EntityId>, out: &mut Vec<EntityId>) -> usize {
        let id = id.into();
        let layer = self.layer(id.dim);
        let Some(down) = id.dim.down() else { return 0 };
        if !layer.is_live(id.slot) {
            return 0;
        }
        let nodes: NodeTuple = layer.nodes_of(id.slot);
        let faces = self.layer(down);
        let before = out.len();
        for face in 0..id.dim.boundary_table().len() {
            let tuple = id.dim.boundary_face(nodes.as_slice(), face);
            if let Some(slot) = faces.lookup(tuple.as_slice()) {
                out.push(EntityId::new(down, slot));
            }
        }
        out.len() - before
    }

    // ---------- bulk ----------

    /// Release every entity and empty all dictionaries and co-boundary lists.
    pub fn clear(&mut self, mode: ClearMode) {
        log::debug!(
            "mesh-complex: clear {:?} ({mode:?})",
            self.live_counts()
        );
        self.nodes.clear(mode);
        self.edges.clear(mode);
        self.trias.clear(mode);
        self.cells.clear(mode);
        self.scratch.clear(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> MeshComplex3 {
        let mut m = MeshComplex3::new();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            m.push_node(Node::new(p), Link::TopLevel).unwrap();
        }
        m.push_cell(Tetra::new([0, 1, 2, 3]), Link::TopLevel).unwrap();
        m
    }

    #[test]
    fn counts_of_a_single_tet() {
        let m = unit_tet();
        assert_eq!(m.live_counts(), [4, 6, 4, 1]);
        assert_eq!(m.dictionary_len(Dim::Edge), 6);
        assert_eq!(m.dictionary_len(Dim::Tria), 4);
        assert_eq!(m.dictionary_len(Dim::Cell), 1);
        assert_eq!(m.dictionary_len(Dim::Node), 0);
    }

    #[test]
    fn boundary_lookup() {
        let m = unit_tet();
        let cell = m.find_cell([3, 2, 1, 0]).unwrap();
        let mut faces = Vec::new();
        assert_eq!(m.boundary(cell, &mut faces), 4);
        assert!(faces.iter().all(|f| f.dim == Dim::Tria));

        let mut nodes = Vec::new();
        let e = m.find_edge([2, 3]).unwrap();
        m.boundary(e, &mut nodes);
        nodes.sort();
        assert_eq!(nodes, vec![EntityId::new(Dim::Node, 2), EntityId::new(Dim::Node, 3)]);

        let mut none = Vec::new();
        assert_eq!(m.boundary(NodeId::new(0), &mut none), 0);
    }

    #[test]
    fn retention_of_out_of_range_slot() {
        let m = unit_tet();
        assert_eq!(m.retention(EdgeId::new(1000)), Retention::Released);
        assert!(m.null_edge(EdgeId::new(1000)));
    }

    #[test]
    fn clear_empties_everything() {
        let mut m = unit_tet();
        m.clear(ClearMode::RetainCapacity);
        assert!(m.is_empty());
        assert_eq!(m.dictionary_len(Dim::Tria), 0);
        assert_eq!(m.find_node(0), None);
        let again = m.push_node(Node::new([2.0; 3]), Link::TopLevel).unwrap();
        assert_eq!(again.get(), 0);
        m.clear(ClearMode::ReleaseMemory);
        assert!(m.is_empty());
    }
}
