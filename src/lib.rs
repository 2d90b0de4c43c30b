//! # mesh-complex
//!
//! mesh-complex stores tetrahedral meshes as an incidence complex: nodes,
//! edges, triangles and tetrahedral cells, with every face shared between
//! the entities that use it and every face aware of its users.
//!
//! ## Features
//! - Hash-consed faces: inserting a cell links to faces already present and
//!   creates only the missing ones, recursively down to the nodes
//! - Reference-aware deletion: removing an entity releases exactly the faces
//!   nothing else holds on to
//! - Upward adjacency ("star") queries with reusable scratch state
//! - Bulk [`rebuild`](topology::complex::MeshComplex3::rebuild) of all
//!   dictionaries and co-boundary lists from the stored records
//! - Structural self-checks through [`DebugInvariants`]
//!
//! ## Determinism
//!
//! Face dictionaries hash with a fixed seed taken from
//! [`ComplexConfig`](topology::config::ComplexConfig), and slot recycling is
//! last-released-first. The same sequence of operations always yields the
//! same slots.
//!
//! ## Invariant checking
//!
//! Debug builds, and builds with the `strict-invariants` or
//! `check-invariants` feature, run the full self-check after each bulk
//! operation and panic on the first violation.

pub mod algs;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use mesh_error::MeshComplexError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshComplexError;
    pub use crate::topology::arena::ClearMode;
    pub use crate::topology::complex::{CellLink, Link, MeshComplex3};
    pub use crate::topology::config::{CapacityHint, ComplexConfig};
    pub use crate::topology::dim::Dim;
    pub use crate::topology::entity::{
        CellId, Edge, EdgeId, Entity, EntityId, Id, Node, NodeId, Tetra, Tria, TriaId,
    };
    pub use crate::topology::retention::Retention;
}
