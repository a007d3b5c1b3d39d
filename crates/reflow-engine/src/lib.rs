//! Engine interface for Reflow formatter backends.
//!
//! The boundary layer in `reflow-wasm` is engine-agnostic: everything it
//! knows about formatting goes through the [`Engine`] trait defined here.
//! A backend crate implements [`Engine`] and is linked into the final
//! module; the boundary never sees style semantics or the text
//! transformation itself.
//!
//! Styles are opaque byte strings. The engine receives them verbatim and
//! interprets them however it likes; configuration problems surface later
//! as an [`EngineError`] from [`Engine::format`].

mod errors;
mod inert;

pub use errors::{EngineError, EngineResult};
pub use inert::InertEngine;

/// Outcome of a formatting request.
///
/// `Unchanged` deliberately carries no buffer: when the input already
/// conforms there is nothing to ship back, and the caller keeps using its
/// own copy of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The engine produced a rewritten buffer.
    Formatted(Vec<u8>),
    /// The input already conforms to the configured style.
    Unchanged,
}

/// A formatting engine.
///
/// Implementations own whatever state style resolution needs. Callers
/// guarantee single-threaded use; none of the methods need to be
/// re-entrant.
pub trait Engine {
    /// Replaces the active style configuration.
    ///
    /// The bytes are stored verbatim and interpreted at format time;
    /// nothing is validated here. The last write wins.
    fn set_style(&mut self, style: Vec<u8>);

    /// Replaces the fallback style used when the active style cannot be
    /// resolved for a given input. Same contract as [`Engine::set_style`].
    fn set_fallback_style(&mut self, style: Vec<u8>);

    /// Formats `source`.
    ///
    /// `file_name` is a hint for language and per-path style detection and
    /// may be empty. Inputs that already conform must come back as
    /// [`FormatOutcome::Unchanged`] rather than an identical copy.
    fn format(&mut self, source: &[u8], file_name: &[u8]) -> EngineResult<FormatOutcome>;

    /// Version of the underlying engine.
    ///
    /// Must be non-empty and stable for the lifetime of the engine.
    fn version(&self) -> String;
}
