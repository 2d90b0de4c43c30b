//! Lifecycle state of a stored entity.
//!
//! An entity is kept alive by two independent kinds of support: having been
//! inserted by the caller as a top-level entity, and being referenced as a
//! boundary face by at least one higher-dimensional parent. [`Retention`]
//! folds both into one closed state; an entity is released exactly when
//! [`Retention::is_retained`] turns false.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one arena slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Retention {
    /// Slot is on the free list; its record is stale.
    #[default]
    Released,
    /// Live but unsupported. Only observable between dropping the last
    /// support and the release that must follow it.
    Detached,
    /// Inserted by the caller, not referenced by any parent.
    Standalone,
    /// Referenced by parents only.
    BoundaryOnly,
    /// Inserted by the caller and referenced by parents.
    Both,
}

impl Retention {
    /// State of a freshly allocated slot.
    #[inline]
    pub const fn fresh(top_level: bool, supported: bool) -> Self {
        match (top_level, supported) {
            (false, false) => Retention::Detached,
            (true, false) => Retention::Standalone,
            (false, true) => Retention::BoundaryOnly,
            (true, true) => Retention::Both,
        }
    }

    /// The slot has been allocated and not yet released.
    #[inline]
    pub const fn is_live(self) -> bool {
        !matches!(self, Retention::Released)
    }

    /// The slot must stay allocated.
    #[inline]
    pub const fn is_retained(self) -> bool {
        matches!(
            self,
            Retention::Standalone | Retention::BoundaryOnly | Retention::Both
        )
    }

    /// The caller inserted this entity itself.
    #[inline]
    pub const fn is_top_level(self) -> bool {
        matches!(self, Retention::Standalone | Retention::Both)
    }

    /// At least one parent references this entity.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, Retention::BoundaryOnly | Retention::Both)
    }

    /// Set or clear the top-level flag.
    ///
    /// # Panics
    /// Panics on a released slot.
    #[inline]
    pub fn with_top_level(self, top_level: bool) -> Self {
        assert!(self.is_live(), "retention: top-level flag on released slot");
        Retention::fresh(top_level, self.is_supported())
    }

    /// Record whether any parent still references this entity.
    ///
    /// # Panics
    /// Panics on a released slot.
    #[inline]
    pub fn with_support(self, supported: bool) -> Self {
        assert!(self.is_live(), "retention: parent link on released slot");
        Retention::fresh(self.is_top_level(), supported)
    }
}
