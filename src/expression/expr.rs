//! Expression tree definitions and the node evaluation contract.

use crate::access::{DataType, Row, Value};
use crate::expression::double_function::DoubleFunction;
use crate::expression::{CallOperator, ExpressionError, ExpressionResult, QueryContext};
use crate::wire::{self, DataInput, DataOutput, DataSerializable, WireError};
use bytes::Bytes;
use std::fmt;

/// Contract implemented by every evaluable node.
///
/// A node evaluates against one row at a time and reports a declared type that
/// never changes for the lifetime of the instance. `Value::Null` is the absent
/// result.
pub trait Evaluate: DataSerializable + fmt::Debug + Send + Sync {
    fn eval(&self, ctx: &QueryContext, row: &dyn Row) -> ExpressionResult<Value>;

    fn data_type(&self) -> DataType;
}

/// Wire discriminator of each concrete node kind
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    Literal = 1,
    Column = 2,
    DoubleFunction = 3,
}

impl ExpressionKind {
    pub fn from_u8(value: u8) -> wire::Result<Self> {
        match value {
            1 => Ok(ExpressionKind::Literal),
            2 => Ok(ExpressionKind::Column),
            3 => Ok(ExpressionKind::DoubleFunction),
            _ => Err(WireError::UnknownExpressionKind(value)),
        }
    }
}

/// Column reference in an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Column index in the row (0-based)
    pub index: usize,
    /// Declared type of the column
    pub data_type: DataType,
    /// Optional column name for debugging/display
    pub name: Option<String>,
}

impl ColumnRef {
    pub fn new(index: usize, data_type: DataType) -> Self {
        Self {
            index,
            data_type,
            name: None,
        }
    }

    pub fn with_name(index: usize, data_type: DataType, name: impl Into<String>) -> Self {
        Self {
            index,
            data_type,
            name: Some(name.into()),
        }
    }
}

impl Evaluate for ColumnRef {
    fn eval(&self, _ctx: &QueryContext, row: &dyn Row) -> ExpressionResult<Value> {
        row.get(self.index)
            .cloned()
            .ok_or(ExpressionError::ColumnIndexOutOfBounds {
                index: self.index,
                column_count: row.column_count(),
            })
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl DataSerializable for ColumnRef {
    fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
        let index =
            i32::try_from(self.index).map_err(|_| WireError::ColumnIndexOverflow(self.index))?;
        out.write_i32(index);
        out.write_data_type(self.data_type);
        match &self.name {
            Some(name) => {
                out.write_bool(true);
                out.write_string(name)
            }
            None => {
                out.write_bool(false);
                Ok(())
            }
        }
    }

    fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
        let index = input.read_i32()?;
        if index < 0 {
            return Err(WireError::InvalidColumnIndex(index));
        }
        let data_type = input.read_data_type()?;
        let name = if input.read_bool()? {
            Some(input.read_string()?)
        } else {
            None
        };
        Ok(Self {
            index: index as usize,
            data_type,
            name,
        })
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    data_type: DataType,
}

impl Literal {
    /// Literal whose declared type is the value's own type (`NULL` for null)
    pub fn new(value: Value) -> Self {
        let data_type = value.data_type().unwrap_or(DataType::Null);
        Self { value, data_type }
    }

    /// Literal with an explicit declared type, e.g. `CAST(NULL AS DOUBLE)`
    pub fn typed(value: Value, data_type: DataType) -> ExpressionResult<Self> {
        if !value.is_compatible_with(data_type) {
            return Err(ExpressionError::TypeMismatch {
                expected: data_type,
                actual: value.data_type(),
                context: "literal".to_string(),
            });
        }
        Ok(Self { value, data_type })
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    pub fn int32(val: i32) -> Self {
        Self::new(Value::Int32(val))
    }

    pub fn double(val: f64) -> Self {
        Self::new(Value::Double(val))
    }

    pub fn string(val: impl Into<String>) -> Self {
        Self::new(Value::String(val.into()))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Evaluate for Literal {
    fn eval(&self, _ctx: &QueryContext, _row: &dyn Row) -> ExpressionResult<Value> {
        Ok(self.value.clone())
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl DataSerializable for Literal {
    fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
        out.write_data_type(self.data_type);
        out.write_value(&self.value, self.data_type)
    }

    fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
        let data_type = input.read_data_type()?;
        let value = input.read_value(data_type)?;
        Ok(Self { value, data_type })
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Column reference
    Column(ColumnRef),

    /// Unary math function returning a double
    DoubleFunction(DoubleFunction),
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create a literal with an explicit declared type
    pub fn typed_literal(value: Value, data_type: DataType) -> ExpressionResult<Self> {
        Ok(Expression::Literal(Literal::typed(value, data_type)?))
    }

    /// Create a column reference expression
    pub fn column(index: usize, data_type: DataType) -> Self {
        Expression::Column(ColumnRef::new(index, data_type))
    }

    /// Create a column reference with name
    pub fn column_with_name(index: usize, data_type: DataType, name: impl Into<String>) -> Self {
        Expression::Column(ColumnRef::with_name(index, data_type, name))
    }

    /// Create a math function call over `operand`
    pub fn call(op: CallOperator, operand: Expression) -> Self {
        Expression::DoubleFunction(DoubleFunction::new(operand, op))
    }

    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Literal(_) => ExpressionKind::Literal,
            Expression::Column(_) => ExpressionKind::Column,
            Expression::DoubleFunction(_) => ExpressionKind::DoubleFunction,
        }
    }

    /// Check if this expression is a constant (contains no column references)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::Column(_) => false,
            Expression::DoubleFunction(func) => func.operand().is_constant(),
        }
    }

    /// Resolve every operand accessor in the tree now instead of on the first row.
    ///
    /// Fails on the first function whose operand is not numeric.
    pub fn bind(&self) -> ExpressionResult<()> {
        match self {
            Expression::Literal(_) | Expression::Column(_) => Ok(()),
            Expression::DoubleFunction(func) => {
                func.operand().bind()?;
                func.bind().map(|_| ())
            }
        }
    }

    /// Serialize the whole tree into a standalone frame.
    ///
    /// Fails for trees the receiving side would reject: column indexes or
    /// strings beyond the `i32` range, or nesting past [`wire::MAX_NESTING_DEPTH`].
    pub fn to_bytes(&self) -> wire::Result<Bytes> {
        let mut out = DataOutput::new();
        self.write_data(&mut out)?;
        Ok(out.into_bytes())
    }

    /// Rebuild a tree from a frame written by [`Expression::to_bytes`]
    pub fn from_bytes(data: &[u8]) -> wire::Result<Self> {
        let mut input = DataInput::new(data);
        let expr = Self::read_data(&mut input)?;
        if input.remaining() > 0 {
            return Err(WireError::TrailingBytes(input.remaining()));
        }
        Ok(expr)
    }
}

impl Evaluate for Expression {
    fn eval(&self, ctx: &QueryContext, row: &dyn Row) -> ExpressionResult<Value> {
        match self {
            Expression::Literal(lit) => lit.eval(ctx, row),
            Expression::Column(col) => col.eval(ctx, row),
            Expression::DoubleFunction(func) => func.eval(ctx, row),
        }
    }

    fn data_type(&self) -> DataType {
        match self {
            Expression::Literal(lit) => lit.data_type(),
            Expression::Column(col) => col.data_type(),
            Expression::DoubleFunction(func) => func.data_type(),
        }
    }
}

impl DataSerializable for Expression {
    fn write_data(&self, out: &mut DataOutput) -> wire::Result<()> {
        out.nested(|out| {
            out.write_u8(self.kind() as u8);
            match self {
                Expression::Literal(lit) => lit.write_data(out),
                Expression::Column(col) => col.write_data(out),
                Expression::DoubleFunction(func) => func.write_data(out),
            }
        })
    }

    fn read_data(input: &mut DataInput<'_>) -> wire::Result<Self> {
        input.nested(|input| match ExpressionKind::from_u8(input.read_u8()?)? {
            ExpressionKind::Literal => Ok(Expression::Literal(Literal::read_data(input)?)),
            ExpressionKind::Column => Ok(Expression::Column(ColumnRef::read_data(input)?)),
            ExpressionKind::DoubleFunction => Ok(Expression::DoubleFunction(
                DoubleFunction::read_data(input)?,
            )),
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => match lit.value() {
                Value::String(s) => write!(f, "'{}'", s),
                value => write!(f, "{}", value),
            },
            Expression::Column(col) => match &col.name {
                Some(name) => f.write_str(name),
                None => write!(f, "${}", col.index),
            },
            Expression::DoubleFunction(func) => match func.operator() {
                Some(op) => write!(f, "{}({})", op.as_str(), func.operand()),
                None => write!(f, "<op {}>({})", func.operator_code(), func.operand()),
            },
        }
    }
}
