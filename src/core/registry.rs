//! Fixed-capacity table of in-flight allocations.
//!
//! Lookup is a linear scan over a slot array that is allocated once, when
//! the tracker is built. Nothing here allocates afterwards, so bookkeeping
//! can never re-enter an instrumented heap path.

use crate::api::site::CallSite;
use crate::diagnostics::WarningKind;

/// One in-flight allocation.
///
/// `address == 0` marks an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRecord {
    /// Address of the block.
    pub address: usize,
    /// Requested size in bytes.
    pub size: usize,
    /// Where the block was allocated.
    pub site: CallSite,
}

impl MemoryRecord {
    /// An unused slot.
    pub const EMPTY: MemoryRecord = MemoryRecord {
        address: 0,
        size: 0,
        site: CallSite::UNKNOWN,
    };

    /// Whether this slot is free for reuse.
    pub const fn is_empty(&self) -> bool {
        self.address == 0
    }
}

/// The allocation registry.
#[derive(Debug)]
pub(crate) struct Registry {
    records: Box<[MemoryRecord]>,
    total_allocated: usize,
    total_freed: usize,
}

impl Registry {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            records: vec![MemoryRecord::EMPTY; capacity].into_boxed_slice(),
            total_allocated: 0,
            total_freed: 0,
        }
    }

    /// First slot whose address equals `address`. `find(0)` finds an empty slot.
    pub(crate) fn find(&mut self, address: usize) -> Option<&mut MemoryRecord> {
        self.records.iter_mut().find(|record| record.address == address)
    }

    /// Start tracking a block.
    pub(crate) fn insert(
        &mut self,
        address: usize,
        size: usize,
        site: CallSite,
    ) -> Result<(), WarningKind> {
        if address == 0 {
            return Err(WarningKind::AllocationFailed);
        }

        let slot = self.find(0).ok_or(WarningKind::CapacityExhausted)?;
        *slot = MemoryRecord {
            address,
            size,
            site,
        };
        self.total_allocated = self.total_allocated.saturating_add(size);
        Ok(())
    }

    /// Stop tracking a block. Returns the record as it was before erasure.
    pub(crate) fn erase(&mut self, address: usize) -> Result<MemoryRecord, WarningKind> {
        if address == 0 {
            return Err(WarningKind::NullRelease);
        }

        let slot = self.find(address).ok_or(WarningKind::DoubleRelease)?;
        let erased = *slot;
        slot.address = 0;
        self.total_freed = self.total_freed.saturating_add(erased.size);
        Ok(erased)
    }

    /// Live records in slot order.
    pub(crate) fn live(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter().filter(|record| !record.is_empty())
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live().count()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn total_allocated(&self) -> usize {
        self.total_allocated
    }

    pub(crate) fn total_freed(&self) -> usize {
        self.total_freed
    }

    /// `total_allocated - total_freed`, not clamped.
    pub(crate) fn leaked(&self) -> i128 {
        self.total_allocated as i128 - self.total_freed as i128
    }

    /// Empty every slot and zero the totals.
    pub(crate) fn clear(&mut self) {
        self.records.fill(MemoryRecord::EMPTY);
        self.total_allocated = 0;
        self.total_freed = 0;
    }
}
