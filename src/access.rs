//! Access layer for typed values and rows.
//!
//! This module provides the pieces expression evaluation reads from:
//!
//! - **DataType**: declared logical types, with the numeric family flagged
//! - **Value**: type-safe representation of column values
//! - **NumericAccessor**: widens any numeric representation to `f64`
//! - **Row**: positional access to the values of one record

pub mod accessor;
pub mod row;
pub mod value;

pub use accessor::NumericAccessor;
pub use row::{Row, ValueRow};
pub use value::{DataType, Value};
