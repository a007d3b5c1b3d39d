//! Reflow WASM boundary layer.
//!
//! Flat C-style exports for driving a code-formatting engine from a host
//! that can only call primitive-typed functions and read raw bytes in
//! linear memory. No bindgen or JS glue: the module works the same from
//! wasmi, wasmtime, or a browser runtime.
//!
//! - Buffer exchange (`reflow_alloc`, `reflow_dealloc`)
//! - Session lifecycle and configuration (`reflow_init`,
//!   `reflow_set_style`, `reflow_set_fallback_style`)
//! - Formatting in two calling conventions (`reflow_format`,
//!   `reflow_format_record`)
//! - Result access (`reflow_result_status`, `reflow_result_ptr`,
//!   `reflow_result_len`, `reflow_free_result`)
//! - Version reporting (`reflow_version`, `reflow_version_len`)
//!
//! The engine behind the exports is pluggable: the `reflow-engine` crate
//! defines the interface, the default build links the inert reference
//! backend, and the `extern-engine` feature defers to an engine library
//! linked into the final module.
//!
//! ## Host protocol
//!
//! A typical host sequence:
//! 1. `reflow_init()`
//! 2. optionally `reflow_set_style` / `reflow_set_fallback_style`
//! 3. `reflow_alloc` an input buffer and copy the source in
//! 4. `reflow_format(...)` and read the status: 0 success, 1 error,
//!    2 unchanged
//! 5. on success, copy the bytes at `reflow_result_ptr` /
//!    `reflow_result_len` out of linear memory
//! 6. `reflow_free_result()`, then `reflow_dealloc` the input buffer
//!
//! One result is live at a time: every format call retires the previous
//! buffer before running the engine, and `reflow_free_result` is
//! idempotent. The version bytes are static and must never be freed.

pub mod abi;
mod backend;
pub mod memory;
pub mod record;
pub mod session;

pub use record::{FormatRecord, ResultStatus};
pub use session::FormatSession;
