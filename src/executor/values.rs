//! Executor over an in-memory list of rows.

use crate::access::ValueRow;
use crate::executor::{ColumnInfo, Executor};
use anyhow::{bail, Result};

/// Executor that yields a fixed set of rows
pub struct ValuesExecutor {
    rows: Vec<ValueRow>,
    schema: Vec<ColumnInfo>,
    current: usize,
    initialized: bool,
}

impl ValuesExecutor {
    pub fn new(rows: Vec<ValueRow>, schema: Vec<ColumnInfo>) -> Self {
        Self {
            rows,
            schema,
            current: 0,
            initialized: false,
        }
    }
}

impl Executor for ValuesExecutor {
    fn init(&mut self) -> Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.values().len() != self.schema.len() {
                bail!(
                    "Row {} has {} values but schema has {} columns",
                    i,
                    row.values().len(),
                    self.schema.len()
                );
            }
            for (value, column) in row.values().iter().zip(&self.schema) {
                if !value.is_compatible_with(column.data_type) {
                    bail!(
                        "Value {:?} in row {} is not compatible with column {} ({})",
                        value,
                        i,
                        column.name,
                        column.data_type
                    );
                }
            }
        }
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<ValueRow>> {
        if !self.initialized {
            bail!("Executor not initialized. Call init() first.");
        }

        if self.current >= self.rows.len() {
            return Ok(None);
        }

        let row = self.rows[self.current].clone();
        self.current += 1;
        Ok(Some(row))
    }

    fn output_schema(&self) -> &[ColumnInfo] {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{DataType, Value};

    #[test]
    fn test_values_yield_in_order() -> Result<()> {
        let schema = vec![ColumnInfo::new("x", DataType::Int32)];
        let rows = vec![
            ValueRow::new(vec![Value::Int32(1)]),
            ValueRow::new(vec![Value::Null]),
        ];
        let mut executor = ValuesExecutor::new(rows, schema);
        executor.init()?;

        assert_eq!(executor.next()?, Some(ValueRow::new(vec![Value::Int32(1)])));
        assert_eq!(executor.next()?, Some(ValueRow::new(vec![Value::Null])));
        assert_eq!(executor.next()?, None);
        Ok(())
    }

    #[test]
    fn test_next_before_init() {
        let mut executor = ValuesExecutor::new(vec![], vec![]);
        assert!(executor.next().is_err());
    }

    #[test]
    fn test_rejects_rows_not_matching_schema() {
        let schema = vec![ColumnInfo::new("x", DataType::Double)];

        let mut executor =
            ValuesExecutor::new(vec![ValueRow::new(vec![Value::Int32(1)])], schema.clone());
        assert!(executor.init().is_err());

        let mut executor = ValuesExecutor::new(
            vec![ValueRow::new(vec![Value::Double(1.0), Value::Double(2.0)])],
            schema,
        );
        assert!(executor.init().is_err());
    }
}
