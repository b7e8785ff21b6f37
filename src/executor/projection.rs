//! Projection executor implementation.
//!
//! This executor evaluates a list of expressions against every row of a child
//! executor and emits one output column per expression. Operand accessors are
//! resolved once in `init()`, before the first row is pulled.

use crate::access::{Row, Value, ValueRow};
use crate::executor::{ColumnInfo, Executor};
use crate::expression::{Evaluate, Expression, ExpressionResult, QueryContext};
use anyhow::{bail, Context, Result};

/// Executor that evaluates expressions over child rows
pub struct ProjectionExecutor {
    /// Child executor that produces rows
    child: Box<dyn Executor>,
    /// Expressions to evaluate, one per output column
    exprs: Vec<Expression>,
    /// Execution-scoped state passed to every evaluation
    ctx: QueryContext,
    /// Output schema (one column per expression)
    output_schema: Vec<ColumnInfo>,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl ProjectionExecutor {
    pub fn new(child: Box<dyn Executor>, exprs: Vec<Expression>, ctx: QueryContext) -> Self {
        Self {
            child,
            exprs,
            ctx,
            output_schema: Vec::new(),
            initialized: false,
        }
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.exprs
    }
}

/// Evaluate every expression against one row
pub fn project_row(
    exprs: &[Expression],
    ctx: &QueryContext,
    row: &dyn Row,
) -> ExpressionResult<ValueRow> {
    let values = exprs
        .iter()
        .map(|expr| expr.eval(ctx, row))
        .collect::<ExpressionResult<Vec<Value>>>()?;
    Ok(ValueRow::new(values))
}

impl Executor for ProjectionExecutor {
    fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        let child_columns = self.child.output_schema().len();

        for expr in &self.exprs {
            expr.bind()
                .with_context(|| format!("Failed to bind expression {}", expr))?;
        }

        if let Some(expr) = self.exprs.iter().find(|expr| max_column(expr) >= Some(child_columns))
        {
            bail!(
                "Expression {} references a column outside the child's {} columns",
                expr,
                child_columns
            );
        }

        self.output_schema = self
            .exprs
            .iter()
            .map(|expr| ColumnInfo::new(expr.to_string(), expr.data_type()))
            .collect();

        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<ValueRow>> {
        if !self.initialized {
            bail!("Executor not initialized. Call init() first.");
        }

        match self.child.next()? {
            Some(row) => Ok(Some(project_row(&self.exprs, &self.ctx, &row)?)),
            None => Ok(None),
        }
    }

    fn output_schema(&self) -> &[ColumnInfo] {
        &self.output_schema
    }
}

/// Highest column index referenced by `expr`
fn max_column(expr: &Expression) -> Option<usize> {
    match expr {
        Expression::Literal(_) => None,
        Expression::Column(col) => Some(col.index),
        Expression::DoubleFunction(func) => max_column(func.operand()),
    }
}
