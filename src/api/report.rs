//! Leak report generation.
//!
//! The report text lives in a buffer obtained straight from the raw heap,
//! so producing and releasing it never shows up in any tracker.

use std::fmt::{self, Write};

use crate::allocators::heap::RawHeap;
use crate::core::state::TrackerState;

const RULE: &str = "----------------------------------";

/// A generated leak report.
///
/// Owns its buffer; dropping the report (or passing it to
/// [`release_report`](crate::release_report)) frees it without going
/// through double-free detection.
pub struct Report {
    buf: ReportBuffer,
}

impl Report {
    /// The report text.
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.buf.len
    }

    /// Whether the text is empty. A generated report never is.
    pub fn is_empty(&self) -> bool {
        self.buf.len == 0
    }

    /// Current buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity
    }
}

impl std::ops::Deref for Report {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Report {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("len", &self.buf.len)
            .field("capacity", &self.buf.capacity)
            .finish()
    }
}

// SAFETY: the buffer is uniquely owned and only read through `&self`.
unsafe impl Send for Report {}
// SAFETY: no interior mutability.
unsafe impl Sync for Report {}

/// Growable text buffer on the raw heap.
///
/// Capacity doubles until the next fragment fits. A failed reallocation
/// leaves the old block intact; it is released when the buffer drops.
struct ReportBuffer {
    ptr: *mut u8,
    len: usize,
    capacity: usize,
}

impl ReportBuffer {
    fn with_capacity(capacity: usize) -> Option<Self> {
        let capacity = capacity.max(1);
        let ptr = RawHeap::malloc(capacity);
        if ptr.is_null() {
            return None;
        }
        Some(Self {
            ptr,
            len: 0,
            capacity,
        })
    }

    fn grow_for(&mut self, additional: usize) -> Result<(), fmt::Error> {
        let needed = self.len.checked_add(additional).ok_or(fmt::Error)?;
        if needed <= self.capacity {
            return Ok(());
        }

        let mut capacity = self.capacity;
        while capacity < needed {
            capacity = capacity.checked_mul(2).ok_or(fmt::Error)?;
        }

        // SAFETY: `ptr` is the live block this buffer owns.
        let grown = unsafe { RawHeap::realloc(self.ptr, capacity) };
        if grown.is_null() {
            return Err(fmt::Error);
        }
        self.ptr = grown;
        self.capacity = capacity;
        Ok(())
    }

    fn as_str(&self) -> &str {
        // SAFETY: the first `len` bytes were copied from `&str`s.
        unsafe {
            let bytes = std::slice::from_raw_parts(self.ptr, self.len);
            std::str::from_utf8_unchecked(bytes)
        }
    }
}

impl Write for ReportBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.grow_for(s.len())?;
        // SAFETY: `grow_for` guarantees room for `s.len()` more bytes and
        // `s` cannot overlap a block we own exclusively.
        unsafe {
            std::ptr::copy_nonoverlapping(s.as_ptr(), self.ptr.add(self.len), s.len());
        }
        self.len += s.len();
        Ok(())
    }
}

impl Drop for ReportBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `RawHeap::malloc`/`realloc` and is freed once.
        unsafe { RawHeap::free(self.ptr) };
    }
}

/// Build a report for `state` in a fresh raw-heap buffer.
///
/// Returns `None` if the buffer cannot be allocated or grown; the partial
/// buffer is released.
pub(crate) fn generate(state: &TrackerState, initial_capacity: usize) -> Option<Report> {
    let mut buf = ReportBuffer::with_capacity(initial_capacity)?;
    write_report(&mut buf, state).ok()?;
    Some(Report { buf })
}

/// Write the report text for `state` into `out`.
pub(crate) fn write_report<W: Write>(out: &mut W, state: &TrackerState) -> fmt::Result {
    let registry = &state.registry;
    let leaked = registry.leaked();

    write!(out, "\n{RULE}\n")?;
    out.write_str("MEMD Leak Summary:\n")?;
    write!(out, "{RULE}\n\n")?;
    writeln!(out, "   Total Memory allocated {} bytes", registry.total_allocated())?;
    writeln!(out, "   Total Memory freed     {} bytes", registry.total_freed())?;
    writeln!(out, "   Memory Leaked          {} bytes", leaked)?;

    if leaked != 0 {
        out.write_str("\n   Detailed Report:\n")?;
        for record in registry.live() {
            writeln!(
                out,
                "     Memory leak at {}:{}: ({} bytes)",
                record.site.file, record.site.line, record.size
            )?;
        }
    }

    if !state.warnings.is_empty() {
        out.write_str("\n   Warnings:\n")?;
        for warning in state.warnings.iter() {
            writeln!(
                out,
                "    - {}:{}: {}",
                warning.site.file,
                warning.site.line,
                warning.message()
            )?;
        }
    }

    write!(out, "\n{RULE}\n\n")
}
