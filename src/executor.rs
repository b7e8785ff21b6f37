//! Executor layer that drives expression evaluation over rows.
//!
//! This module implements the Volcano-style iterator model: each executor
//! produces rows one at a time via the `next()` method. Plan fragments are
//! shipped to a member as serialized expressions, rebuilt there, and evaluated
//! by a projection over the member's local rows.

use crate::access::{DataType, ValueRow};
use anyhow::Result;

pub mod parallel;
pub mod projection;
pub mod values;

pub use parallel::project_partitioned;
pub use projection::{project_row, ProjectionExecutor};
pub use values::ValuesExecutor;

/// Trait for all query executors
pub trait Executor: Send {
    /// Initialize the executor. This must be called before `next()`.
    fn init(&mut self) -> Result<()>;

    /// Get the next row from the executor.
    /// Returns None when there are no more rows.
    fn next(&mut self) -> Result<Option<ValueRow>>;

    /// Get the output schema of this executor
    fn output_schema(&self) -> &[ColumnInfo];
}

/// Information about a column in the output schema
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}
