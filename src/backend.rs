//! Engine selection.
//!
//! The exports in [`crate::abi`] work against any [`Engine`]; this module
//! decides which one a given build links in. The default is the inert
//! reference backend, so the crate builds, tests and demos stand alone.
//! With the `extern-engine` feature the constructor below is left
//! undefined here and resolved at link time from the engine library built
//! into the final module.

use reflow_engine::Engine;

#[cfg(not(feature = "extern-engine"))]
use reflow_engine::InertEngine;

// The engine library linked into the final module provides this symbol.
// It returns `Box::into_raw(Box::new(engine))` for a `Box<dyn Engine>`;
// ownership transfers to the caller.
#[cfg(feature = "extern-engine")]
unsafe extern "C" {
    fn reflow_engine_open() -> *mut u8;
}

/// Construct the engine this build was configured for.
#[cfg(feature = "extern-engine")]
pub(crate) fn open_engine() -> Box<dyn Engine> {
    let raw = unsafe { reflow_engine_open() };
    if raw.is_null() {
        panic!("reflow_engine_open returned a null engine");
    }
    *unsafe { Box::from_raw(raw as *mut Box<dyn Engine>) }
}

/// Construct the engine this build was configured for.
#[cfg(not(feature = "extern-engine"))]
pub(crate) fn open_engine() -> Box<dyn Engine> {
    Box::new(InertEngine::new())
}
