//! Integration tests for memd.

#![cfg(not(feature = "minimal"))]

use memd::{
    calloc, free, malloc, realloc, CallSite, PauseGuard, RawHeap, Tracker, TrackerConfig,
    WarningKind,
};
use std::sync::Arc;
use std::thread;

fn tracker() -> Tracker {
    memd::resume();
    Tracker::new(TrackerConfig::default())
}

// ============ SCENARIOS ============

#[test]
fn test_double_free_report() {
    let tracker = tracker();

    let ptr = tracker.allocate(100, CallSite::new("main.c", 8));
    unsafe {
        tracker.release(ptr, CallSite::new("main.c", 8));
        tracker.release(ptr, CallSite::new("main.c", 9));
    }

    let report = tracker.report().expect("report buffer");
    let expected = "
----------------------------------
MEMD Leak Summary:
----------------------------------

   Total Memory allocated 100 bytes
   Total Memory freed     100 bytes
   Memory Leaked          0 bytes

   Warnings:
    - main.c:9: Double free detected

----------------------------------

";
    assert_eq!(report.as_str(), expected);
    assert!(!report.contains("Detailed Report"));
}

#[test]
fn test_unreleased_blocks_are_listed() {
    let tracker = tracker();

    let a = tracker.allocate(100, CallSite::new("a.c", 5));
    let b = tracker.allocate(200, CallSite::new("a.c", 6));

    let report = tracker.report().expect("report buffer");
    assert!(report.contains("   Total Memory allocated 300 bytes\n"));
    assert!(report.contains("   Total Memory freed     0 bytes\n"));
    assert!(report.contains("   Memory Leaked          300 bytes\n"));

    let first = report.find("Memory leak at a.c:5: (100 bytes)").expect("first leak");
    let second = report.find("Memory leak at a.c:6: (200 bytes)").expect("second leak");
    assert!(first < second);
    assert!(!report.contains("Warnings:"));

    unsafe {
        RawHeap::free(a);
        RawHeap::free(b);
    }
}

#[test]
fn test_paused_release_is_invisible() {
    let tracker = tracker();
    let untracked = RawHeap::malloc(32);
    let before = tracker.stats();

    tracker.pause();
    unsafe {
        tracker.release(untracked, CallSite::new("c.c", 1));
        tracker.release(std::ptr::null_mut(), CallSite::new("c.c", 2));
    }
    tracker.resume();

    assert_eq!(tracker.stats(), before);
    assert!(tracker.warnings().is_empty());

    // A paused release never reaches the heap.
    unsafe { RawHeap::free(untracked) };
}

#[test]
fn test_paused_release_after_double_free() {
    let tracker = tracker();

    let my_data = tracker.allocate(100, CallSite::new("example.c", 12));
    unsafe {
        tracker.release(my_data, CallSite::new("example.c", 16));
        tracker.release(my_data, CallSite::new("example.c", 17));

        tracker.pause();
        tracker.release(my_data, CallSite::new("example.c", 20));
        tracker.resume();
    }

    let warnings = tracker.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].site, CallSite::new("example.c", 17));

    let stats = tracker.stats();
    assert_eq!(stats.total_allocated, 100);
    assert_eq!(stats.total_freed, 100);
}

#[test]
fn test_capacity_exhaustion_creates_blind_spot() {
    memd::resume();
    let capacity = 8;
    let tracker = Tracker::new(TrackerConfig::default().with_max_allocations(capacity));

    let tracked: Vec<_> = (0..capacity)
        .map(|i| tracker.allocate(16, CallSite::new("d.c", i as u32)))
        .collect();
    let overflow = tracker.allocate(16, CallSite::new("d.c", 99));
    assert!(!overflow.is_null());

    let warnings = tracker.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::CapacityExhausted);
    assert_eq!(warnings[0].site, CallSite::new("d.c", 99));

    // Free a slot; the overflow block still never shows up.
    unsafe { tracker.release(tracked[0], CallSite::new("d.c", 100)) };
    let report = tracker.report().expect("report buffer");
    assert!(!report.contains("d.c:99: ("));
    assert!(tracker.leaks().iter().all(|r| r.address != overflow as usize));

    unsafe {
        for &ptr in &tracked[1..] {
            RawHeap::free(ptr);
        }
        RawHeap::free(overflow);
    }
}

// ============ PROPERTIES ============

#[test]
fn test_leaked_equals_unreleased_sizes() {
    let tracker = tracker();

    let sizes = [8usize, 24, 100, 7, 4096, 1, 333];
    let ptrs: Vec<_> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| tracker.allocate(size, CallSite::new("prop.rs", i as u32)))
        .collect();

    let mut unreleased = 0;
    for (i, (&ptr, &size)) in ptrs.iter().zip(sizes.iter()).enumerate() {
        if i % 2 == 0 {
            unsafe { tracker.release(ptr, CallSite::new("prop.rs", 100)) };
        } else {
            unreleased += size;
        }
    }

    let stats = tracker.stats();
    assert_eq!(stats.leaked_bytes(), unreleased as i128);
    let listed: usize = tracker.leaks().iter().map(|r| r.size).sum();
    assert_eq!(listed, unreleased);

    for (i, &ptr) in ptrs.iter().enumerate() {
        if i % 2 == 1 {
            unsafe { tracker.release(ptr, CallSite::new("prop.rs", 200)) };
        }
    }
    assert!(tracker.stats().is_balanced());
}

#[test]
fn test_untracked_release_warns_exactly_once() {
    let tracker = tracker();
    let keep = tracker.allocate(10, CallSite::new("p.rs", 1));
    let stray = RawHeap::malloc(10);
    let freed_before = tracker.stats().total_freed;

    unsafe { tracker.release(stray, CallSite::new("p.rs", 2)) };

    let warnings = tracker.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::DoubleRelease);
    assert_eq!(tracker.stats().total_freed, freed_before);

    unsafe {
        // The tracker did not forward the release, so the block is still ours.
        RawHeap::free(stray);
        tracker.release(keep, CallSite::new("p.rs", 3));
    }
}

#[test]
fn test_report_is_idempotent() {
    let tracker = tracker();
    let ptr = tracker.allocate(50, CallSite::new("idem.rs", 1));
    unsafe { tracker.release(std::ptr::null_mut(), CallSite::new("idem.rs", 2)) };

    let first = tracker.report().expect("report buffer");
    let second = tracker.report().expect("report buffer");
    assert_eq!(first.as_str(), second.as_str());
    memd::release_report(first);
    memd::release_report(second);

    unsafe { tracker.release(ptr, CallSite::new("idem.rs", 3)) };
}

#[test]
fn test_warnings_accumulate_across_reports() {
    let tracker = tracker();
    unsafe { tracker.release(std::ptr::null_mut(), CallSite::new("acc.rs", 1)) };
    let _ = tracker.report();
    unsafe { tracker.release(std::ptr::null_mut(), CallSite::new("acc.rs", 2)) };

    let report = tracker.report().expect("report buffer");
    assert!(report.contains("    - acc.rs:1: Tried to free a null ptr\n"));
    assert!(report.contains("    - acc.rs:2: Tried to free a null ptr\n"));

    tracker.reset();
    let report = tracker.report().expect("report buffer");
    assert!(!report.contains("Warnings:"));
}

#[test]
fn test_warning_log_is_bounded() {
    memd::resume();
    let tracker = Tracker::new(TrackerConfig::default().with_max_warnings(3));

    for line in 0..10 {
        unsafe { tracker.release(std::ptr::null_mut(), CallSite::new("bound.rs", line)) };
    }

    let stats = tracker.stats();
    assert_eq!(stats.warning_count, 3);
    assert_eq!(stats.dropped_warnings, 7);
    let lines: Vec<u32> = tracker.warnings().iter().map(|w| w.site.line).collect();
    assert_eq!(lines, vec![0, 1, 2]);
}

// ============ MACROS ============

#[test]
fn test_macros_capture_call_site() {
    let tracker = tracker();

    let line = line!() + 1;
    let ptr = malloc!(tracker, 64);
    let leaks = tracker.leaks();
    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0].site.line, line);
    assert!(leaks[0].site.file.ends_with("integration_tests.rs"));

    let zeroed = calloc!(tracker, 4, 4);
    let grown = unsafe { realloc!(tracker, ptr, 256) };
    assert!(!grown.is_null());

    unsafe {
        free!(tracker, grown);
        free!(tracker, zeroed);
    }
    assert!(tracker.stats().is_balanced());
    assert!(tracker.warnings().is_empty());
}

#[test]
fn test_global_tracker_macros() {
    memd::resume();
    let line = line!() + 1;
    let ptr = malloc!(48);
    assert!(memd::global()
        .leaks()
        .iter()
        .any(|r| r.address == ptr as usize && r.site.line == line && r.size == 48));

    unsafe { free!(ptr) };
    assert!(memd::global().leaks().iter().all(|r| r.address != ptr as usize));

    let report = memd::generate_report().expect("report buffer");
    assert!(report.contains("MEMD Leak Summary:"));
}

// ============ PAUSE ============

#[test]
fn test_pause_guard_hides_third_party_allocations() {
    let tracker = tracker();

    let foreign = {
        let _paused = PauseGuard::new();
        tracker.allocate(512, CallSite::new("third_party.rs", 1))
    };

    assert_eq!(tracker.stats().total_allocated, 0);
    tracker.paused(|| unsafe { tracker.release(foreign, CallSite::new("third_party.rs", 2)) });
    assert!(tracker.warnings().is_empty());

    // Blocks the tracker never saw go back through the raw heap.
    unsafe { RawHeap::free(foreign) };
}

// ============ FAILURES ============

#[test]
fn test_failed_resize_keeps_block_tracked() {
    let tracker = tracker();

    let ptr = tracker.allocate(64, CallSite::new("r.c", 1));
    let result = unsafe { tracker.resize(ptr, usize::MAX - 4096, CallSite::new("r.c", 2)) };
    assert!(result.is_null());

    let leaks = tracker.leaks();
    assert_eq!(leaks.len(), 1);
    assert_eq!(leaks[0].address, ptr as usize);
    assert_eq!(leaks[0].size, 64);
    assert!(tracker.warnings().is_empty());

    unsafe { tracker.release(ptr, CallSite::new("r.c", 4)) };
    assert!(tracker.stats().is_balanced());
}

#[test]
fn test_failed_allocation_is_reported() {
    let tracker = tracker();

    let ptr = tracker.allocate(usize::MAX - 4096, CallSite::new("r.c", 3));
    assert!(ptr.is_null());

    let warnings = tracker.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::AllocationFailed);
    assert_eq!(warnings[0].site, CallSite::new("r.c", 3));

    let report = tracker.report().expect("report buffer");
    assert!(report.contains("    - r.c:3: Memory allocation failed\n"));
    assert!(report.contains("   Total Memory allocated 0 bytes\n"));
}

#[test]
fn test_pause_is_per_thread() {
    let tracker = Arc::new(tracker());
    tracker.pause();

    let worker = {
        let tracker = tracker.clone();
        thread::spawn(move || {
            let ptr = tracker.allocate(32, CallSite::new("worker.rs", 1));
            unsafe { tracker.release(ptr, CallSite::new("worker.rs", 2)) };
        })
    };
    worker.join().expect("Thread panicked");
    tracker.resume();

    let stats = tracker.stats();
    assert_eq!(stats.total_allocated, 32);
    assert_eq!(stats.total_freed, 32);
}

// ============ MULTI-THREADED TESTS ============

#[test]
fn test_multithread_tracking() {
    let tracker = Arc::new(tracker());
    let num_threads = 4;
    let allocations_per_thread = 50;

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let tracker = tracker.clone();
            thread::spawn(move || {
                let mut ptrs = Vec::new();
                for i in 0..allocations_per_thread {
                    let site = CallSite::new("mt.rs", thread_id * 1000 + i);
                    let ptr = tracker.allocate(8, site);
                    assert!(!ptr.is_null(), "Thread {} alloc {} failed", thread_id, i);
                    ptrs.push(ptr as usize);
                }
                // Leave one block per thread behind.
                for &ptr in &ptrs[1..] {
                    unsafe { tracker.release(ptr as *mut u8, CallSite::new("mt.rs", 0)) };
                }
                ptrs[0]
            })
        })
        .collect();

    let leaked: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    let stats = tracker.stats();
    assert_eq!(stats.live_allocations, num_threads as usize);
    assert_eq!(stats.leaked_bytes(), 8 * num_threads as i128);
    assert!(tracker.warnings().is_empty());

    for ptr in leaked {
        unsafe { tracker.release(ptr as *mut u8, CallSite::new("mt.rs", 1)) };
    }
    assert!(tracker.stats().is_balanced());
}

#[test]
fn test_stress_slot_reuse() {
    memd::resume();
    let tracker = Tracker::new(TrackerConfig::minimal().with_max_allocations(4));

    for i in 0..1000 {
        let ptr = tracker.allocate(i % 64 + 1, CallSite::new("stress.rs", 1));
        unsafe { tracker.release(ptr, CallSite::new("stress.rs", 2)) };
    }

    let stats = tracker.stats();
    assert!(stats.is_balanced());
    assert_eq!(stats.live_allocations, 0);
    assert!(tracker.warnings().is_empty());
}
