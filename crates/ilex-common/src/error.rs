//! Error kinds shared by the IR and type-analysis crates (spec §7).
//!
//! Each kind is its own `thiserror`-derived type so call sites can match on
//! kind directly; `AnalysisError` unifies them via `#[from]` so the pass's
//! internal `Result<T, AnalysisError>` composes with `?` across both IR
//! invariant checks and AST-driven type checking.

use crate::Span;
use thiserror::Error;

/// Violation of a type rule from spec §4: mismatch, out-of-bound type
/// arguments, unresolvable/ambiguous overloads, nullability on a primitive,
/// a non-testable pattern, illegal variance use, a missing return type on a
/// recursive/abstract function, a visibility violation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TypeError {
    pub span: Span,
    pub message: String,
}

impl TypeError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        TypeError {
            span,
            message: message.into(),
        }
    }
}

/// Name not found, name not accessible, or a name resolving to a package
/// prefix used where a value or type was expected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ScopeError {
    pub span: Span,
    pub message: String,
}

impl ScopeError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        ScopeError {
            span,
            message: message.into(),
        }
    }
}

/// Nullable or otherwise forbidden supertype, a cycle in the class
/// hierarchy, multiple non-trait bases, or a linearization conflict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InheritanceError {
    pub span: Span,
    pub message: String,
}

impl InheritanceError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        InheritanceError {
            span,
            message: message.into(),
        }
    }
}

/// The analyzer never partial-commits (spec §5, §7): the first error raised
/// aborts the containing top-level definition's analysis and is reported as
/// exactly one of these three kinds, located, to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Inheritance(#[from] InheritanceError),
}

impl AnalysisError {
    pub fn span(&self) -> Span {
        match self {
            AnalysisError::Type(e) => e.span,
            AnalysisError::Scope(e) => e.span,
            AnalysisError::Inheritance(e) => e.span,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
