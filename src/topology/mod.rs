//! Storage for the tetrahedral incidence complex.
//!
//! - [`entity`]: record types and typed slot handles
//! - [`dim`]: dimensions and the fixed face tables
//! - [`arena`], [`dictionary`], [`coboundary`]: per-dimension storage
//! - [`complex`]: [`MeshComplex3`], tying them together
//!
//! Most users only need [`MeshComplex3`] and the record types.

pub mod arena;
pub mod coboundary;
pub mod complex;
pub mod config;
pub mod dictionary;
pub mod dim;
pub mod entity;
pub mod retention;

pub use complex::{CellLink, Link, MeshComplex3};
pub use dim::Dim;
pub use entity::{CellId, EdgeId, EntityId, Id, NodeId, TriaId};
pub use retention::Retention;
