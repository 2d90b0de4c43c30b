//! Entity records and typed slot handles.
//!
//! Every entity in the complex lives in the arena of its dimension and is
//! addressed by a slot index. [`Id<E>`] wraps that slot with the record type
//! it points into, so an edge handle cannot be passed where a cell handle is
//! expected. [`EntityId`] erases the type into a `(dimension, slot)` pair for
//! the dimension-generic parts of the API.
//!
//! A slot is only meaningful while its entity is live: once released, the
//! same integer may be handed out again for an unrelated entity.

use super::dim::Dim;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Node {}
    impl Sealed for super::Edge {}
    impl Sealed for super::Tria {}
    impl Sealed for super::Tetra {}
}

/// A record type storable in the complex.
///
/// Implemented for [`Node`], [`Edge`], [`Tria`] and [`Tetra`] only.
pub trait Entity: sealed::Sealed + Clone + fmt::Debug {
    /// Topological dimension of this record type.
    const DIM: Dim;

    /// Node references, `DIM + 1` of them.
    fn nodes(&self) -> &[u32];

    /// Caller payload carried alongside the topology.
    fn tag(&self) -> i32;

    /// A record created implicitly as boundary of a higher-dimensional entity.
    fn from_boundary(nodes: &[u32]) -> Self;
}

/// A 0-face: a point with coordinates.
///
/// Its single node reference is its own slot, written by the complex on push.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub coord: [f64; 3],
    pub tag: i32,
    #[serde(skip, default = "unplaced")]
    pub(crate) node: [u32; 1],
}

/// Index of a node not stored in any complex yet.
fn unplaced() -> [u32; 1] {
    [u32::MAX]
}

impl Node {
    pub fn new(coord: [f64; 3]) -> Self {
        Self { coord, tag: 0, node: unplaced() }
    }

    /// Reference to the already stored node `index`, for linking it as
    /// boundary of an edge.
    pub fn existing(index: u32) -> Self {
        Self::from_boundary(&[index])
    }

    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }

    /// The node's own index, once it has been pushed.
    #[inline]
    pub fn index(&self) -> u32 {
        self.node[0]
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new([0.0; 3])
    }
}

impl Entity for Node {
    const DIM: Dim = Dim::Node;
    #[inline]
    fn nodes(&self) -> &[u32] {
        &self.node
    }
    #[inline]
    fn tag(&self) -> i32 {
        self.tag
    }
    fn from_boundary(nodes: &[u32]) -> Self {
        Self { coord: [0.0; 3], tag: 0, node: [nodes[0]] }
    }
}

/// A 1-face between two nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub node: [u32; 2],
    pub tag: i32,
}

/// A 2-face spanned by three nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tria {
    pub node: [u32; 3],
    pub tag: i32,
}

/// A tetrahedral 3-cell spanned by four nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tetra {
    pub node: [u32; 4],
    pub tag: i32,
}

impl Edge {
    pub fn new(node: [u32; 2]) -> Self {
        Self { node, tag: 0 }
    }
    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }
}

impl Tria {
    pub fn new(node: [u32; 3]) -> Self {
        Self { node, tag: 0 }
    }
    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }
}

impl Tetra {
    pub fn new(node: [u32; 4]) -> Self {
        Self { node, tag: 0 }
    }
    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }
}

impl Entity for Edge {
    const DIM: Dim = Dim::Edge;
    #[inline]
    fn nodes(&self) -> &[u32] {
        &self.node
    }
    #[inline]
    fn tag(&self) -> i32 {
        self.tag
    }
    fn from_boundary(nodes: &[u32]) -> Self {
        Self::new([nodes[0], nodes[1]])
    }
}

impl Entity for Tria {
    const DIM: Dim = Dim::Tria;
    #[inline]
    fn nodes(&self) -> &[u32] {
        &self.node
    }
    #[inline]
    fn tag(&self) -> i32 {
        self.tag
    }
    fn from_boundary(nodes: &[u32]) -> Self {
        Self::new([nodes[0], nodes[1], nodes[2]])
    }
}

impl Entity for Tetra {
    const DIM: Dim = Dim::Cell;
    #[inline]
    fn nodes(&self) -> &[u32] {
        &self.node
    }
    #[inline]
    fn tag(&self) -> i32 {
        self.tag
    }
    fn from_boundary(nodes: &[u32]) -> Self {
        Self::new([nodes[0], nodes[1], nodes[2], nodes[3]])
    }
}

/// Typed slot handle for an entity of record type `E`.
///
/// `repr(transparent)` over `u32`; the marker costs nothing.
#[repr(transparent)]
pub struct Id<E> {
    slot: u32,
    _kind: PhantomData<fn() -> E>,
}

pub type NodeId = Id<Node>;
pub type EdgeId = Id<Edge>;
pub type TriaId = Id<Tria>;
pub type CellId = Id<Tetra>;

impl<E> Id<E> {
    /// Wrap a raw slot index.
    #[inline]
    pub const fn new(slot: u32) -> Self {
        Self { slot, _kind: PhantomData }
    }

    /// The raw slot index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.slot
    }
}

impl<E: Entity> Id<E> {
    /// Erase the record type.
    #[inline]
    pub fn erase(self) -> EntityId {
        EntityId { dim: E::DIM, slot: self.slot }
    }
}

impl<E> Clone for Id<E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<E> Copy for Id<E> {}
impl<E> PartialEq for Id<E> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}
impl<E> Eq for Id<E> {}
impl<E> PartialOrd for Id<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<E> Ord for Id<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.slot.cmp(&other.slot)
    }
}
impl<E> Hash for Id<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<E: Entity> fmt::Debug for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}#{}", E::DIM, self.slot)
    }
}

impl<E> fmt::Display for Id<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot)
    }
}

impl<E> Serialize for Id<E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.slot)
    }
}

impl<'de, E> Deserialize<'de> for Id<E> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Id::new)
    }
}

/// A `(dimension, slot)` pair naming any entity in the complex.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId {
    pub dim: Dim,
    pub slot: u32,
}

impl EntityId {
    #[inline]
    pub const fn new(dim: Dim, slot: u32) -> Self {
        Self { dim, slot }
    }

    /// Recover a typed handle if the dimension matches `E`.
    #[inline]
    pub fn typed<E: Entity>(self) -> Option<Id<E>> {
        (self.dim == E::DIM).then(|| Id::new(self.slot))
    }
}

impl<E: Entity> From<Id<E>> for EntityId {
    fn from(id: Id<E>) -> Self {
        id.erase()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_round_trip_through_entity_id() {
        let e = EdgeId::new(7);
        let any: EntityId = e.into();
        assert_eq!(any, EntityId::new(Dim::Edge, 7));
        assert_eq!(any.typed::<Edge>(), Some(e));
        assert_eq!(any.typed::<Tria>(), None);
    }

    #[test]
    fn debug_and_display() {
        let t = TriaId::new(3);
        assert_eq!(format!("{t:?}"), "Tria#3");
        assert_eq!(format!("{t}"), "3");
    }

    #[test]
    fn boundary_records_take_the_tuple() {
        assert_eq!(Tria::from_boundary(&[3, 1, 2]).node, [3, 1, 2]);
        assert_eq!(Node::from_boundary(&[9]).index(), 9);
        assert_eq!(Edge::from_boundary(&[5, 4]).tag, 0);
    }

    #[test]
    fn json_roundtrip() {
        let c = Tetra::new([0, 1, 2, 3]).with_tag(-4);
        let s = serde_json::to_string(&c).unwrap();
        let c2: Tetra = serde_json::from_str(&s).unwrap();
        assert_eq!(c, c2);

        let n: Node = serde_json::from_str(r#"{"coord":[1.0,2.0,3.0],"tag":5}"#).unwrap();
        assert_eq!(n.index(), u32::MAX);
        assert_eq!(n.tag, 5);

        let id = CellId::new(11);
        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "11");
        let id2: CellId = serde_json::from_str(&s).unwrap();
        assert_eq!(id, id2);
    }
}
