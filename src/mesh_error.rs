//! MeshComplexError: Unified error type for mesh-complex public APIs
//!
//! Lookup misses are not errors (they surface as `Option` or as no-ops), and
//! protocol precondition breaks panic. What remains is resource exhaustion
//! while growing storage, plus the failures reported by
//! [`DebugInvariants::validate_invariants`](crate::DebugInvariants).

use crate::topology::dim::Dim;
use thiserror::Error;

/// Unified error type for mesh-complex operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshComplexError {
    /// Growing the storage of one stratum failed.
    #[error("capacity exhausted while growing {dim:?} storage by {additional} slot(s)")]
    CapacityExhausted { dim: Dim, additional: usize },
    /// The slot index space (`u32`) of a stratum is used up.
    #[error("slot index space exhausted for {0:?} entities")]
    SlotSpaceExhausted(Dim),

    /// A traversal mark was still set outside of a query.
    #[error("invariant: visit mark left set on {dim:?} slot {slot}")]
    MarkNotCleared { dim: Dim, slot: u32 },
    /// A dictionary entry names a released slot or a slot with a different key.
    #[error("invariant: stale {dim:?} dictionary entry for slot {slot}")]
    StaleDictionaryEntry { dim: Dim, slot: u32 },
    /// A co-boundary entry names a parent that is released or does not contain the face.
    #[error("invariant: {dim:?} slot {slot} lists parent {parent} which does not bound it")]
    CoBoundaryMismatch { dim: Dim, slot: u32, parent: u32 },
    /// The same parent appears more than once in one co-boundary list.
    #[error("invariant: {dim:?} slot {slot} lists parent {parent} more than once")]
    DuplicateParent { dim: Dim, slot: u32, parent: u32 },
    /// The recorded retention state disagrees with the co-boundary list.
    #[error("invariant: retention state of {dim:?} slot {slot} disagrees with its co-boundary")]
    RetentionMismatch { dim: Dim, slot: u32 },
    /// A live entity is not supported by either its top-level flag or a parent.
    #[error("invariant: live {dim:?} slot {slot} is neither top-level nor referenced")]
    UnsupportedEntity { dim: Dim, slot: u32 },
    /// The free list holds a live or repeated slot.
    #[error("invariant: corrupt {dim:?} free list at slot {slot}")]
    FreeListCorrupt { dim: Dim, slot: u32 },
}
