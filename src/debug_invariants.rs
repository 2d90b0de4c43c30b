//! Structural self-checks for the complex.
//!
//! Every public mutation of [`MeshComplex3`](crate::topology::complex::MeshComplex3)
//! is supposed to leave the store in a state where these checks pass. Bulk
//! operations run them automatically when invariant checking is compiled in
//! (debug builds, or the `strict-invariants` / `check-invariants` features).

use crate::mesh_error::MeshComplexError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshComplexError>;

    /// Panic on the first violation when invariant checking is compiled in;
    /// a no-op otherwise.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "debug_assert_invariants");
    }
}

/// Run a fallible check and panic with context on error, but only when
/// invariant checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[mesh-complex invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
