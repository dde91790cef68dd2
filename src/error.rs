//! Error types for the feature transformation.

use thiserror::Error;

/// Failures raised by the series store and the pipeline driver.
///
/// These are carried inside `anyhow::Error` at the binary boundary; callers
/// that need to branch on them can `downcast_ref::<TransformError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A column the operation needs is not in the table.
    #[error("required column \"{0}\" is missing from the dataset")]
    MissingColumn(String),

    /// A new column does not line up with the existing rows.
    #[error("column \"{name}\" has {actual} values but the table has {expected} rows")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Adding a column under a name that is already taken.
    #[error("column \"{0}\" already exists")]
    DuplicateColumn(String),
}
