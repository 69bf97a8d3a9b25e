//! Error types for oftgen.

/// Top-level error type for the generator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Template rendering errors.
///
/// Caught per row by the batch runner and folded into a FAILED status;
/// never aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Undefined template variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Unclosed placeholder at byte {position}")]
    UnclosedPlaceholder { position: usize },
}

/// Artifact materialization errors (session-backed external collaborator).
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact session unavailable: {reason}")]
    SessionUnavailable { reason: String },

    #[error("Artifact generation failed: {reason}")]
    GenerationFailed { reason: String },
}

/// Archive sink errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to write archive entry {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Failed to finish archive: {reason}")]
    FinishFailed { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tabular input errors.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Missing required columns: {columns}")]
    MissingColumns { columns: String },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Case repository filter errors.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Missing required columns: {columns}")]
    MissingColumns { columns: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// Result type alias for the generator.
pub type Result<T> = std::result::Result<T, Error>;
