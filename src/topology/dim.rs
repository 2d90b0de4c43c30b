//! Topological dimension tags and the simplex boundary tables.

use serde::{Deserialize, Serialize};

/// Topological dimension of an entity in the complex.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Dim {
    /// 0-face.
    Node = 0,
    /// 1-face.
    Edge = 1,
    /// 2-face (triangle).
    Tria = 2,
    /// 3-cell (tetrahedron).
    Cell = 3,
}

/// Edges of a triangle; edge `i` is opposite local vertex `i`.
static TRIA_EDGES: [&[usize]; 3] = [&[1, 2], &[2, 0], &[0, 1]];

/// Faces of a tetrahedron; face `i` is opposite local vertex `i`.
static TETRA_FACES: [&[usize]; 4] = [&[1, 2, 3], &[0, 3, 2], &[0, 1, 3], &[0, 2, 1]];

/// Endpoints of an edge, each a 0-face of its own.
static EDGE_NODES: [&[usize]; 2] = [&[0], &[1]];

impl Dim {
    /// All dimensions, lowest first.
    pub const ALL: [Dim; 4] = [Dim::Node, Dim::Edge, Dim::Tria, Dim::Cell];

    /// Numeric dimension, usable as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Dim::index`].
    #[inline]
    pub const fn from_index(i: usize) -> Option<Dim> {
        match i {
            0 => Some(Dim::Node),
            1 => Some(Dim::Edge),
            2 => Some(Dim::Tria),
            3 => Some(Dim::Cell),
            _ => None,
        }
    }

    /// Number of node references carried by an entity of this dimension.
    #[inline]
    pub const fn arity(self) -> usize {
        self.index() + 1
    }

    /// The dimension of this entity's boundary faces.
    #[inline]
    pub const fn down(self) -> Option<Dim> {
        match self {
            Dim::Node => None,
            d => Dim::from_index(d.index() - 1),
        }
    }

    /// The dimension of this entity's co-boundary (its parents).
    #[inline]
    pub const fn up(self) -> Option<Dim> {
        Dim::from_index(self.index() + 1)
    }

    /// Local vertex lists of the (d-1)-faces, in table order.
    ///
    /// A node has no boundary and yields an empty table.
    pub fn boundary_table(self) -> &'static [&'static [usize]] {
        match self {
            Dim::Node => &[],
            Dim::Edge => &EDGE_NODES,
            Dim::Tria => &TRIA_EDGES,
            Dim::Cell => &TETRA_FACES,
        }
    }

    /// Node tuple of boundary face `face` of an entity with nodes `nodes`.
    ///
    /// # Panics
    /// Panics if `nodes.len() != self.arity()` or `face` is out of range.
    pub fn boundary_face(self, nodes: &[u32], face: usize) -> NodeTuple {
        assert_eq!(nodes.len(), self.arity(), "{self:?} expects {} nodes", self.arity());
        let local = self.boundary_table()[face];
        let mut out = NodeTuple::default();
        for &l in local {
            out.push(nodes[l]);
        }
        out
    }
}

/// A short inline list of node indices, at most four long.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeTuple {
    len: u8,
    nodes: [u32; 4],
}

impl NodeTuple {
    /// Copy a slice of up to four node indices.
    ///
    /// # Panics
    /// Panics if `nodes` is longer than four.
    pub fn from_slice(nodes: &[u32]) -> Self {
        assert!(nodes.len() <= 4, "node tuple longer than a tetrahedron");
        let mut out = Self::default();
        for &n in nodes {
            out.push(n);
        }
        out
    }

    #[inline]
    fn push(&mut self, n: u32) {
        self.nodes[self.len as usize] = n;
        self.len += 1;
    }

    /// The node indices, in stored order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.nodes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no node index appears twice.
    pub fn is_distinct(&self) -> bool {
        let s = self.as_slice();
        (0..s.len()).all(|i| !s[i + 1..].contains(&s[i]))
    }
}

impl std::fmt::Debug for NodeTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_and_down_chain() {
        assert_eq!(Dim::Node.down(), None);
        assert_eq!(Dim::Cell.up(), None);
        assert_eq!(Dim::Edge.down(), Some(Dim::Node));
        assert_eq!(Dim::Tria.up(), Some(Dim::Cell));
        for d in Dim::ALL {
            assert_eq!(Dim::from_index(d.index()), Some(d));
        }
    }

    #[test]
    fn tetra_faces_are_opposite_their_vertex() {
        let nodes = [10, 11, 12, 13];
        for (i, &v) in nodes.iter().enumerate() {
            let face = Dim::Cell.boundary_face(&nodes, i);
            assert_eq!(face.len(), 3);
            assert!(!face.as_slice().contains(&v));
        }
    }

    #[test]
    fn tria_edges_cover_all_pairs() {
        let nodes = [4, 5, 6];
        let mut edges: Vec<Vec<u32>> = (0..3)
            .map(|i| {
                let mut e = Dim::Tria.boundary_face(&nodes, i).as_slice().to_vec();
                e.sort_unstable();
                e
            })
            .collect();
        edges.sort();
        assert_eq!(edges, vec![vec![4, 5], vec![4, 6], vec![5, 6]]);
    }

    #[test]
    fn distinctness() {
        assert!(NodeTuple::from_slice(&[1, 2, 3]).is_distinct());
        assert!(!NodeTuple::from_slice(&[1, 2, 1]).is_distinct());
    }

    #[test]
    #[should_panic]
    fn wrong_arity_panics() {
        let _ = Dim::Tria.boundary_face(&[1, 2], 0);
    }
}
