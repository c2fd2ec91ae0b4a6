//! Span — source location tracking for diagnostics.
//!
//! A `Span` represents a range of source code by byte offsets. The analyzer
//! never interprets spans (no line/column mapping); it only threads them
//! through to error reporting. Spans are small (8 bytes) and cheap to copy.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in some source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// A span for synthetic nodes that have no source position (e.g. a
    /// lambda's generated closure class, or a built-in definition).
    #[inline]
    pub const fn dummy() -> Self {
        Span {
            start: u32::MAX,
            end: u32::MAX,
        }
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == u32::MAX && self.end == u32::MAX
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
