//! Formatting sessions.
//!
//! A [`FormatSession`] is the canonical form of every boundary operation:
//! it owns one engine plus the single result slot, and both exported
//! calling conventions are thin adapters over its methods. Because the
//! session is an ordinary owned value, the whole protocol can be exercised
//! in tests (or by a native embedder) without touching process-level state;
//! the C surface in [`crate::abi`] keeps exactly one session in a static
//! cell, but nothing here depends on that.

use reflow_engine::{Engine, FormatOutcome};

use crate::record::{FormatRecord, ResultSlot, ResultStatus};

pub struct FormatSession {
    engine: Box<dyn Engine>,
    slot: ResultSlot,
}

impl FormatSession {
    /// Create a session over an engine. Until the first format call the
    /// result slot reads as an empty success.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            slot: ResultSlot::new(),
        }
    }

    /// Copy `style` into the engine as the active style. Opaque bytes;
    /// the last write wins and persists across format calls.
    pub fn set_style(&mut self, style: &[u8]) {
        self.engine.set_style(style.to_vec());
    }

    /// Copy `style` into the engine as the fallback style.
    pub fn set_fallback_style(&mut self, style: &[u8]) {
        self.engine.set_fallback_style(style.to_vec());
    }

    /// Format `source` and publish the outcome into the result slot.
    ///
    /// The previous result buffer is released before the engine runs, so
    /// at most one result is ever live and pointers from earlier calls are
    /// invalid afterwards regardless of the new status. Returns the
    /// published status.
    pub fn format(&mut self, source: &[u8], file_name: &[u8]) -> ResultStatus {
        self.slot.release_content();

        match self.engine.format(source, file_name) {
            Ok(FormatOutcome::Formatted(bytes)) => {
                self.slot
                    .publish(ResultStatus::Success, Some(bytes.into_boxed_slice()));
            }
            Ok(FormatOutcome::Unchanged) => {
                self.slot.publish(ResultStatus::Unchanged, None);
            }
            Err(_) => {
                self.slot.publish(ResultStatus::Error, None);
            }
        }

        self.slot.status()
    }

    /// Release the current result buffer. Idempotent; the status keeps its
    /// last value.
    pub fn free_result(&mut self) {
        self.slot.release_content();
    }

    /// Status published by the most recent format call.
    pub fn result_status(&self) -> ResultStatus {
        self.slot.status()
    }

    /// Start of the result buffer, or null when no content is live.
    pub fn result_ptr(&self) -> *const u8 {
        self.slot.record().content_ptr
    }

    /// Length of the result buffer in bytes.
    pub fn result_len(&self) -> i32 {
        self.slot.record().content_len
    }

    /// Borrow the live result buffer, if any.
    pub fn result_content(&self) -> Option<&[u8]> {
        self.slot.content()
    }

    pub fn record(&self) -> &FormatRecord {
        self.slot.record()
    }

    /// Address of the result record. Stable for as long as the session is
    /// not moved.
    pub fn record_ptr(&self) -> *const FormatRecord {
        self.slot.record_ptr()
    }

    /// Version reported by the engine behind this session.
    pub fn version(&self) -> String {
        self.engine.version()
    }
}

impl std::fmt::Debug for FormatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatSession")
            .field("engine_version", &self.engine.version())
            .field("record", self.slot.record())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted engines for boundary tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use reflow_engine::{Engine, EngineResult, FormatOutcome};

    /// Engine driven by a queue of prepared outcomes. Once the queue is
    /// exhausted every call reports `Unchanged`.
    pub(crate) struct ScriptedEngine {
        outcomes: VecDeque<EngineResult<FormatOutcome>>,
        pub(crate) styles: Vec<Vec<u8>>,
        pub(crate) fallback_styles: Vec<Vec<u8>>,
    }

    impl ScriptedEngine {
        pub(crate) fn new(
            outcomes: impl IntoIterator<Item = EngineResult<FormatOutcome>>,
        ) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                styles: Vec::new(),
                fallback_styles: Vec::new(),
            }
        }
    }

    impl Engine for ScriptedEngine {
        fn set_style(&mut self, style: Vec<u8>) {
            self.styles.push(style);
        }

        fn set_fallback_style(&mut self, style: Vec<u8>) {
            self.fallback_styles.push(style);
        }

        fn format(&mut self, _source: &[u8], _file_name: &[u8]) -> EngineResult<FormatOutcome> {
            self.outcomes
                .pop_front()
                .unwrap_or(Ok(FormatOutcome::Unchanged))
        }

        fn version(&self) -> String {
            "reflow-scripted 0".to_string()
        }
    }

    /// Engine that appends every call it receives to a shared log, so tests
    /// can observe configuration surviving behind the C surface.
    pub(crate) struct ProbeEngine {
        pub(crate) log: Arc<Mutex<Vec<String>>>,
    }

    impl ProbeEngine {
        pub(crate) fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
            Self { log }
        }

        fn note(&self, entry: String) {
            self.log.lock().unwrap().push(entry);
        }
    }

    impl Engine for ProbeEngine {
        fn set_style(&mut self, style: Vec<u8>) {
            self.note(format!("style:{}", String::from_utf8_lossy(&style)));
        }

        fn set_fallback_style(&mut self, style: Vec<u8>) {
            self.note(format!("fallback:{}", String::from_utf8_lossy(&style)));
        }

        fn format(&mut self, source: &[u8], _file_name: &[u8]) -> EngineResult<FormatOutcome> {
            self.note(format!("format:{}", String::from_utf8_lossy(source)));
            Ok(FormatOutcome::Unchanged)
        }

        fn version(&self) -> String {
            "reflow-probe 0".to_string()
        }
    }
}
