//! Process-level error type.
//!
//! Every fatal error carries an exit code so the binary can report failure
//! categories to scripts:
//!
//! - `2` — usage, schema, or I/O problems (bad CSV, missing columns, export failures)
//! - `3` — empty dataset (nothing left to analyze after cleaning)
//! - `4` — internal invariant violations (upstream cleaning contract broken,
//!   malformed rule table)

/// Broad failure category. Determines the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required column missing or mistyped.
    Schema,
    /// Zero usable input rows; percentile ranking is undefined.
    EmptyDataset,
    /// Negative monetary or non-positive frequency after grouping.
    InvalidMetric,
    /// File read/write failure.
    Io,
    /// Invalid user-supplied option values.
    Usage,
    /// Internal invariant violation (e.g. overlapping rule-table groups).
    Internal,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Schema | ErrorKind::Io | ErrorKind::Usage => 2,
            ErrorKind::EmptyDataset => 3,
            ErrorKind::InvalidMetric | ErrorKind::Internal => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Schema, message)
    }

    pub fn empty_dataset(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyDataset, message)
    }

    pub fn invalid_metric(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidMetric, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
