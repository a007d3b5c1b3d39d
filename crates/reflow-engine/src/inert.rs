//! A no-op reference backend.

use crate::{Engine, EngineResult, FormatOutcome};

/// An engine that never rewrites anything.
///
/// Styles are accepted and remembered but have no effect; every format
/// request reports [`FormatOutcome::Unchanged`]. The boundary layer links
/// against this backend by default so the module can be built, loaded and
/// exercised end to end before a real engine is wired in.
#[derive(Debug, Default)]
pub struct InertEngine {
    style: Option<Vec<u8>>,
    fallback_style: Option<Vec<u8>>,
}

impl InertEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently configured style, if any.
    pub fn style(&self) -> Option<&[u8]> {
        self.style.as_deref()
    }

    /// The most recently configured fallback style, if any.
    pub fn fallback_style(&self) -> Option<&[u8]> {
        self.fallback_style.as_deref()
    }
}

impl Engine for InertEngine {
    fn set_style(&mut self, style: Vec<u8>) {
        self.style = Some(style);
    }

    fn set_fallback_style(&mut self, style: Vec<u8>) {
        self.fallback_style = Some(style);
    }

    fn format(&mut self, _source: &[u8], _file_name: &[u8]) -> EngineResult<FormatOutcome> {
        Ok(FormatOutcome::Unchanged)
    }

    fn version(&self) -> String {
        format!("reflow-inert {}", env!("CARGO_PKG_VERSION"))
    }
}
