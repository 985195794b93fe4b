//! Domain and application error models.

use std::backtrace::{Backtrace, BacktraceStatus};

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong in [`AppError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. the resource already exists).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// Application-level error for infrastructure and startup failures.
///
/// The call stack at the point of failure is recorded as an explicit,
/// optional field rather than probed for at runtime: [`AppError::traced`]
/// captures a backtrace, [`AppError::new`] does not. Consumers that want
/// richer reporting check [`AppError::frames`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    message: String,
    trace: Option<Backtrace>,
}

impl AppError {
    /// Plain error, no captured call stack.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Error that records the call stack at the point of creation.
    ///
    /// Capture is forced (independent of `RUST_BACKTRACE`) so reporting is
    /// deterministic. Reserve this for failure sites, not hot paths.
    pub fn traced(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: Some(Backtrace::force_capture()),
        }
    }

    pub fn has_trace(&self) -> bool {
        matches!(&self.trace, Some(t) if t.status() == BacktraceStatus::Captured)
    }

    /// The first `n` symbolized frames of the captured trace, or `None` when
    /// the error was created without one.
    pub fn frames(&self, n: usize) -> Option<Vec<String>> {
        let trace = self.trace.as_ref()?;
        if trace.status() != BacktraceStatus::Captured {
            return None;
        }

        let rendered = trace.to_string();
        let mut frames = Vec::with_capacity(n);
        for line in rendered.lines() {
            // Frame lines render as "3: path::to::symbol"; the "at file:line"
            // lines in between belong to the preceding frame and are skipped.
            let line = line.trim();
            if let Some((index, symbol)) = line.split_once(": ") {
                if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                    frames.push(symbol.trim().to_string());
                    if frames.len() == n {
                        break;
                    }
                }
            }
        }
        Some(frames)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self::new(err.to_string())
    }
}
