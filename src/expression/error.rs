//! Error types for expression evaluation.

use crate::access::DataType;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during expression evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Declared operand type of a numeric function is not numeric
    #[error("Operand is not numeric: {data_type}")]
    OperandNotNumeric { data_type: DataType },

    /// Operator code outside the known catalog
    #[error("Unsupported double operator: {code}")]
    UnsupportedOperator { code: i32 },

    /// Row value disagrees with the declared type
    #[error(
        "Type mismatch in {context}: expected {expected}, got {}",
        .actual.map_or("NULL", DataType::as_str)
    )]
    TypeMismatch {
        expected: DataType,
        actual: Option<DataType>,
        context: String,
    },

    /// Column index out of bounds
    #[error("Column index {index} out of bounds for row with {column_count} columns")]
    ColumnIndexOutOfBounds { index: usize, column_count: usize },

    /// Decimal that has no double approximation
    #[error("Decimal {value} cannot be represented as a double")]
    DecimalOutOfRange { value: Decimal },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
