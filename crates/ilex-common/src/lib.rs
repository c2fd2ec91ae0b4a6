//! Common types shared across the ilex type-analysis crates.
//!
//! This crate provides foundational pieces used by `ilex-ir`, `ilex-check`
//! and `ilex-extern`:
//! - Source spans (`Span`)
//! - String interning (`Atom`, `Interner`)
//! - Centralized limits and thresholds (`limits`)

pub mod interner;
pub use interner::{Atom, Interner};

pub mod span;
pub use span::Span;

pub mod limits;

pub mod error;
pub use error::{AnalysisError, AnalysisResult, InheritanceError, ScopeError, TypeError};
