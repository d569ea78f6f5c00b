//! Leak demo for memd
//!
//! Leaks one block, double-frees another, releases it once more while
//! tracking is paused, then prints the report.
//!
//! Run with: cargo run --example leak_demo --features diagnostics
//!
//! Not meant for `minimal` builds: there the double free reaches `free()`.

use memd::{free, malloc};

fn i_will_leak() {
    let data = malloc!(200);
    let _ = data; // never freed: shows up under "Detailed Report"
}

fn main() {
    let greeting = b"Hello, MEMD!\0";
    let my_data = malloc!(100);
    unsafe {
        std::ptr::copy_nonoverlapping(greeting.as_ptr(), my_data, greeting.len());
        let text = std::ffi::CStr::from_ptr(my_data as *const std::ffi::c_char);
        println!("{}", text.to_string_lossy());

        free!(my_data);
        free!(my_data); // caught and reported, never reaches free()
    }

    // Ignored while paused: not reported and not forwarded to free().
    memd::pause();
    unsafe { free!(my_data) };
    memd::resume();

    i_will_leak();

    if let Some(report) = memd::generate_report() {
        print!("{}", report);
        memd::release_report(report);
    }

    let stats = memd::global().stats();
    println!("{}", stats);
}
