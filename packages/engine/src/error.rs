//! Error types for the requirement engine.
//!
//! Structural errors are fatal for the table they occur in and carry enough
//! context (table id, degree, offending row) to correct the upstream
//! extraction. Consistency and coverage issues are never errors; they are
//! reported as flags on the output (see [`crate::types::FlagSet`]).

use thiserror::Error;

use crate::types::TableId;

/// Main error type for the requirement engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A confirmed metagroup reached the collapser with fewer than two groups.
    #[error(
        "Metagroup '{header}' in table {table_id} of '{degree}' has {groups} validated group(s), at least 2 required"
    )]
    MetagroupUnderfilled {
        table_id: TableId,
        degree: String,
        header: String,
        groups: usize,
    },

    /// A table could not be reduced to a single expression.
    #[error("Table {table_id} of '{degree}' did not collapse to one expression ({remaining} rows remain)")]
    UnresolvedTable {
        table_id: TableId,
        degree: String,
        remaining: usize,
    },

    /// Source tables support at most one indentation level.
    #[error("Table {table_id} of '{degree}' uses {levels} distinct indentation widths, at most one is supported")]
    IndentDepth {
        table_id: TableId,
        degree: String,
        levels: usize,
    },

    /// A table arrived with no rows to classify.
    #[error("Table {table_id} of '{degree}' has no rows")]
    EmptyTable { table_id: TableId, degree: String },

    /// A course-code pattern in the configuration failed to compile.
    #[error("Invalid course-code pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
