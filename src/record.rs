//! Result record shared with the host.
//!
//! This module defines the wire representation of a formatting result,
//! which must match the layout the host reads out of linear memory, and
//! the slot that keeps the raw record and the owned result buffer in sync.

use std::ptr;

/// Status codes reported to the host. The numeric values are part of the
/// wire contract and never change.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// The engine produced a rewritten buffer.
    Success = 0,
    /// The input could not be processed.
    Error = 1,
    /// The input already conforms; no buffer is shipped back.
    Unchanged = 2,
}

impl ResultStatus {
    /// Map a raw status field back to a status code.
    ///
    /// Total: raw values outside the contract read as [`ResultStatus::Error`].
    pub const fn from_raw(raw: i32) -> ResultStatus {
        match raw {
            0 => ResultStatus::Success,
            2 => ResultStatus::Unchanged,
            _ => ResultStatus::Error,
        }
    }
}

/// Result record read by the host.
///
/// On 32-bit targets the fields sit at offsets 0, 4 and 8; hosts using the
/// single-call convention read them straight out of linear memory at the
/// address `reflow_format_record` returns.
#[repr(C)]
#[derive(Debug)]
pub struct FormatRecord {
    /// Status code, one of the [`ResultStatus`] values.
    pub status: i32,
    /// Start of the result buffer, or null when no content is live.
    pub content_ptr: *const u8,
    /// Length of the result buffer in bytes.
    pub content_len: i32,
}

/// The single result slot behind both calling conventions.
///
/// Owns the live result buffer and the raw record aliasing it. All writes
/// go through [`ResultSlot::publish`] and [`ResultSlot::release_content`],
/// so the pointer and length fields can never drift from the buffer that
/// backs them. The record's address stays valid as long as the slot is not
/// moved; the boundary keeps it inside a session pinned in a static cell.
pub(crate) struct ResultSlot {
    record: FormatRecord,
    content: Option<Box<[u8]>>,
}

impl ResultSlot {
    /// A fresh slot reads as an empty success: status 0, null pointer,
    /// zero length.
    pub(crate) fn new() -> Self {
        Self {
            record: FormatRecord {
                status: ResultStatus::Success as i32,
                content_ptr: ptr::null(),
                content_len: 0,
            },
            content: None,
        }
    }

    /// Replace the slot contents with a new outcome.
    ///
    /// The previous buffer is released first. An empty or absent buffer
    /// publishes as null pointer and zero length; a buffer too large for
    /// the record's length field publishes as an error with no content.
    pub(crate) fn publish(&mut self, status: ResultStatus, content: Option<Box<[u8]>>) {
        self.release_content();
        self.record.status = status as i32;

        let Some(bytes) = content else {
            return;
        };
        if bytes.is_empty() {
            return;
        }
        let Ok(len) = i32::try_from(bytes.len()) else {
            self.record.status = ResultStatus::Error as i32;
            return;
        };
        self.record.content_len = len;
        self.record.content_ptr = self.content.insert(bytes).as_ptr();
    }

    /// Drop the result buffer and reset the pointer and length fields.
    ///
    /// The status field keeps its last value. Idempotent.
    pub(crate) fn release_content(&mut self) {
        self.content = None;
        self.record.content_ptr = ptr::null();
        self.record.content_len = 0;
    }

    pub(crate) fn status(&self) -> ResultStatus {
        ResultStatus::from_raw(self.record.status)
    }

    pub(crate) fn record(&self) -> &FormatRecord {
        &self.record
    }

    pub(crate) fn record_ptr(&self) -> *const FormatRecord {
        &self.record
    }

    /// Borrow the live result buffer, if any.
    pub(crate) fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn test_status_codes_are_stable() {
        assert_eq!(ResultStatus::Success as i32, 0);
        assert_eq!(ResultStatus::Error as i32, 1);
        assert_eq!(ResultStatus::Unchanged as i32, 2);
    }

    #[test]
    fn test_from_raw_is_total() {
        assert_eq!(ResultStatus::from_raw(0), ResultStatus::Success);
        assert_eq!(ResultStatus::from_raw(1), ResultStatus::Error);
        assert_eq!(ResultStatus::from_raw(2), ResultStatus::Unchanged);
        assert_eq!(ResultStatus::from_raw(-7), ResultStatus::Error);
        assert_eq!(ResultStatus::from_raw(99), ResultStatus::Error);
    }

    #[test]
    fn test_record_layout_matches_host_contract() {
        assert_eq!(offset_of!(FormatRecord, status), 0);

        // The host contract pins the 32-bit layout; on wider targets the
        // pointer field pads to its own alignment.
        #[cfg(target_pointer_width = "32")]
        {
            assert_eq!(offset_of!(FormatRecord, content_ptr), 4);
            assert_eq!(offset_of!(FormatRecord, content_len), 8);
            assert_eq!(size_of::<FormatRecord>(), 12);
        }

        assert_eq!(align_of::<FormatRecord>(), align_of::<*const u8>());
    }

    #[test]
    fn test_fresh_slot_reads_as_empty_success() {
        let slot = ResultSlot::new();
        assert_eq!(slot.status(), ResultStatus::Success);
        assert!(slot.record().content_ptr.is_null());
        assert_eq!(slot.record().content_len, 0);
        assert!(slot.content().is_none());
    }

    #[test]
    fn test_publish_exposes_the_buffer() {
        let mut slot = ResultSlot::new();
        slot.publish(
            ResultStatus::Success,
            Some(b"formatted".to_vec().into_boxed_slice()),
        );

        assert_eq!(slot.status(), ResultStatus::Success);
        assert_eq!(slot.record().content_len, 9);
        assert_eq!(slot.record().content_ptr, slot.content().unwrap().as_ptr());
        assert_eq!(slot.content().unwrap(), b"formatted");
    }

    #[test]
    fn test_publish_empty_buffer_reads_as_null() {
        let mut slot = ResultSlot::new();
        slot.publish(ResultStatus::Success, Some(Box::new([])));

        assert_eq!(slot.status(), ResultStatus::Success);
        assert!(slot.record().content_ptr.is_null());
        assert_eq!(slot.record().content_len, 0);
        assert!(slot.content().is_none());
    }

    #[test]
    fn test_publish_replaces_previous_buffer() {
        let mut slot = ResultSlot::new();
        slot.publish(
            ResultStatus::Success,
            Some(b"first".to_vec().into_boxed_slice()),
        );
        slot.publish(ResultStatus::Unchanged, None);

        assert_eq!(slot.status(), ResultStatus::Unchanged);
        assert!(slot.record().content_ptr.is_null());
        assert_eq!(slot.record().content_len, 0);
        assert!(slot.content().is_none());
    }

    #[test]
    fn test_release_content_keeps_status() {
        let mut slot = ResultSlot::new();
        slot.publish(
            ResultStatus::Success,
            Some(b"payload".to_vec().into_boxed_slice()),
        );

        slot.release_content();
        assert_eq!(slot.status(), ResultStatus::Success);
        assert!(slot.record().content_ptr.is_null());
        assert_eq!(slot.record().content_len, 0);

        // A second release is a no-op.
        slot.release_content();
        assert_eq!(slot.status(), ResultStatus::Success);
    }
}
