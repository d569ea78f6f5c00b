//! Memory poisoning for released blocks.
//!
//! A tracked block is filled with [`FREED_PATTERN`] right before it goes
//! back to the heap, which makes stale reads easier to spot in a debugger.

/// Pattern written over released memory.
pub const FREED_PATTERN: u8 = 0xCD;

/// Poison a region of memory with the freed pattern.
///
/// # Safety
///
/// The memory region must be valid and writable for `size` bytes.
pub unsafe fn poison_freed(ptr: *mut u8, size: usize) {
    std::ptr::write_bytes(ptr, FREED_PATTERN, size);
}

/// Whether every byte of the region holds the freed pattern.
///
/// # Safety
///
/// The memory region must be valid and readable for `size` bytes.
pub unsafe fn is_freed_poison(ptr: *const u8, size: usize) -> bool {
    std::slice::from_raw_parts(ptr, size)
        .iter()
        .all(|&byte| byte == FREED_PATTERN)
}
