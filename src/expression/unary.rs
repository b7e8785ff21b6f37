//! Shared shape of single-operand calls.

use crate::access::{DataType, Row, Value};
use crate::expression::{Evaluate, Expression, ExpressionResult, QueryContext};
use crate::wire::{self, DataInput, DataOutput, DataSerializable};

/// A call owning exactly one operand.
///
/// Concrete unary functions embed this and only add their own fields; the
/// operand is always written first on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct UniCall<E = Expression> {
    operand: Box<E>,
}

impl<E> UniCall<E> {
    pub fn new(operand: E) -> Self {
        Self {
            operand: Box::new(operand),
        }
    }

    pub fn operand(&self) -> &E {
        &self.operand
    }

    pub fn into_operand(self) -> E {
        *self.operand
    }
}

impl<E: Evaluate> UniCall<E> {
    pub fn eval_operand(&self, ctx: &QueryContext, row: &dyn Row) -> ExpressionResult<Value> {
        self.operand.eval(ctx, row)
    }

    pub fn operand_type(&self) -> DataType {
        self.operand.data_type()
    }
}

impl<E: DataSerializable> DataSerializable for UniCall<E> {
    fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
        self.operand.write_data(out)
    }

    fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
        Ok(Self::new(E::read_data(input)?))
    }
}
