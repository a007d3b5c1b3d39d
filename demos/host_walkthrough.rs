//! Walkthrough of the Reflow boundary from the host's side
//!
//! This example drives the exported C-style functions the way a WASM host
//! would: staging input with the allocator, formatting through both calling
//! conventions, and releasing the result.

use reflow_wasm::abi::{
    reflow_format, reflow_format_record, reflow_free_result, reflow_init, reflow_result_len,
    reflow_result_ptr, reflow_result_status, reflow_set_fallback_style, reflow_set_style,
    reflow_version, reflow_version_len,
};
use reflow_wasm::memory::{reflow_alloc, reflow_dealloc};

fn main() {
    println!("=== Reflow Boundary Walkthrough ===\n");

    unsafe {
        // The version exports work before anything else has run.
        println!("1. Version (no init required):");
        let version = std::slice::from_raw_parts(reflow_version(), reflow_version_len());
        println!("  Engine reports: {}", String::from_utf8_lossy(version));

        println!("\n2. Calls before reflow_init are rejected:");
        let style = b"{IndentWidth: 4}";
        println!(
            "  set_style: {}",
            reflow_set_style(style.as_ptr(), style.len())
        );
        println!("  result_status: {}", reflow_result_status());

        println!("\n3. Initializing (second call is a no-op):");
        reflow_init();
        reflow_init();
        println!(
            "  set_style: {}",
            reflow_set_style(style.as_ptr(), style.len())
        );
        let fallback = b"{BasedOnStyle: LLVM}";
        println!(
            "  set_fallback_style: {}",
            reflow_set_fallback_style(fallback.as_ptr(), fallback.len())
        );

        // Stage the source in shared memory the way a real host would.
        println!("\n4. Staging a source buffer:");
        let source = b"int   main()   { return 0; }\n";
        let staged = reflow_alloc(source.len());
        std::ptr::copy_nonoverlapping(source.as_ptr(), staged, source.len());
        println!("  {} bytes at {:?}", source.len(), staged);

        println!("\n5. Formatting (discrete accessors):");
        let name = b"main.c";
        let status = reflow_format(staged, source.len(), name.as_ptr(), name.len());
        println!("  status: {} (0 success, 1 error, 2 unchanged)", status);
        println!("  result_ptr: {:?}", reflow_result_ptr());
        println!("  result_len: {}", reflow_result_len());

        println!("\n6. Formatting (result record, one call and three loads):");
        let record = reflow_format_record(staged, source.len(), name.as_ptr(), name.len());
        println!("  record at {:?}", record);
        println!("  record.status: {}", (*record).status);
        println!("  record.content_ptr: {:?}", (*record).content_ptr);
        println!("  record.content_len: {}", (*record).content_len);

        println!("\n7. Cleanup:");
        reflow_free_result();
        println!("  after free_result, status: {}", reflow_result_status());
        println!("  after free_result, len: {}", reflow_result_len());
        reflow_dealloc(staged);
        println!("  staged buffer released");

        #[cfg(debug_assertions)]
        {
            let stats = reflow_wasm::memory::stats();
            println!("\n8. Allocator ledger (debug builds):");
            println!("  Allocated: {}", stats.allocated);
            println!("  Deallocated: {}", stats.deallocated);
            println!("  Outstanding: {}", reflow_wasm::memory::outstanding());
        }
    }

    println!("\n=== Walkthrough completed! ===");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough_runs() {
        // Just ensure the walkthrough runs without panicking
        main();
    }
}
