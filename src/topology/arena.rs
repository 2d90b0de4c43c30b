//! Slot arena for the entities of one dimension.
//!
//! Records are stored by value in a contiguous `Vec`, and released slots go
//! onto a LIFO free list to be handed out again. There is no compaction: a
//! slot index is stable from allocation to release of that entity, and only
//! then.

use super::entity::Entity;
use super::retention::Retention;
use crate::mesh_error::MeshComplexError;

/// How much backing memory [`clear`](crate::topology::complex::MeshComplex3::clear)
/// gives back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClearMode {
    /// Drop all entities but keep buffers for reuse.
    #[default]
    RetainCapacity,
    /// Drop all entities and free their buffers.
    ReleaseMemory,
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<E> {
    pub(crate) record: E,
    pub(crate) state: Retention,
}

/// Append-only slot storage with recycling.
#[derive(Clone, Debug)]
pub struct Arena<E> {
    slots: Vec<Slot<E>>,
    free: Vec<u32>,
    live: usize,
}

impl<E> Default for Arena<E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<E: Entity> Arena<E> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Store `record` in a recycled or fresh slot, starting in `state`.
    ///
    /// The free list always has room for every slot, so [`release`](Self::release)
    /// never allocates.
    pub fn allocate(&mut self, record: E, state: Retention) -> Result<u32, MeshComplexError> {
        debug_assert!(state.is_live(), "allocating a released slot");
        let slot = if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Slot { record, state };
            slot
        } else {
            let next = self.slots.len();
            if next >= u32::MAX as usize {
                return Err(MeshComplexError::SlotSpaceExhausted(E::DIM));
            }
            let exhausted = |_| MeshComplexError::CapacityExhausted {
                dim: E::DIM,
                additional: 1,
            };
            self.slots.try_reserve(1).map_err(exhausted)?;
            self.free
                .try_reserve((next + 1).saturating_sub(self.free.len()))
                .map_err(exhausted)?;
            self.slots.push(Slot { record, state });
            next as u32
        };
        self.live += 1;
        Ok(slot)
    }

    /// Put `slot` back on the free list and tombstone it.
    ///
    /// # Panics
    /// Panics if `slot` is out of range or already released.
    pub fn release(&mut self, slot: u32) {
        let s = &mut self.slots[slot as usize];
        assert!(s.state.is_live(), "arena: double release of {:?} slot {slot}", E::DIM);
        s.state = Retention::Released;
        self.free.push(slot);
        self.live -= 1;
    }

    /// Record at `slot` if it is live.
    #[inline]
    pub fn get(&self, slot: u32) -> Option<&E> {
        self.slots
            .get(slot as usize)
            .filter(|s| s.state.is_live())
            .map(|s| &s.record)
    }

    /// Record at `slot`, live or stale.
    ///
    /// # Panics
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn record(&self, slot: u32) -> &E {
        &self.slots[slot as usize].record
    }

    #[inline]
    pub(crate) fn record_mut(&mut self, slot: u32) -> &mut E {
        &mut self.slots[slot as usize].record
    }

    /// Lifecycle state at `slot`.
    ///
    /// # Panics
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn state(&self, slot: u32) -> Retention {
        self.slots[slot as usize].state
    }

    #[inline]
    pub(crate) fn set_state(&mut self, slot: u32, state: Retention) {
        let s = &mut self.slots[slot as usize];
        debug_assert!(s.state.is_live(), "arena: state change on released slot");
        s.state = state;
    }

    /// Bounds-checked liveness test.
    #[inline]
    pub fn is_live(&self, slot: u32) -> bool {
        self.slots
            .get(slot as usize)
            .is_some_and(|s| s.state.is_live())
    }

    /// Number of slots ever handed out (live or released).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live entities.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Live slots and their records, in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = (u32, &E)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state.is_live())
            .map(|(i, s)| (i as u32, &s.record))
    }

    /// Released slots, in recycling order (last out first).
    #[inline]
    pub fn free_slots(&self) -> &[u32] {
        &self.free
    }

    pub fn clear(&mut self, mode: ClearMode) {
        self.slots.clear();
        self.free.clear();
        self.live = 0;
        if mode == ClearMode::ReleaseMemory {
            self.slots.shrink_to_fit();
            self.free.shrink_to_fit();
        }
    }
}
