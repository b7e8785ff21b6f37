//! Expression evaluation framework for query execution.
//!
//! This module provides:
//! - The node contract every expression implements ([`Evaluate`])
//! - Leaf nodes (literals, column references)
//! - The single-operand call shape and the unary math functions built on it
//! - The operator catalog those functions dispatch through

pub mod context;
pub mod double_function;
pub mod error;
pub mod expr;
pub mod operator;
pub mod unary;

pub use context::QueryContext;
pub use double_function::DoubleFunction;
pub use error::{ExpressionError, ExpressionResult};
pub use expr::{ColumnRef, Evaluate, Expression, ExpressionKind, Literal};
pub use operator::CallOperator;
pub use unary::UniCall;
