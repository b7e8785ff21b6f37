//! Widening of numeric values to `f64`.

use crate::access::{DataType, Value};
use crate::expression::{ExpressionError, ExpressionResult};
use rust_decimal::prelude::ToPrimitive;

/// Converts values of one concrete numeric representation to `f64`.
///
/// There is exactly one accessor per numeric [`DataType`]; obtain it with
/// [`DataType::numeric_accessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericAccessor {
    TinyInt,
    SmallInt,
    Int32,
    BigInt,
    Real,
    Double,
    Decimal,
}

impl NumericAccessor {
    /// The type this accessor reads
    pub fn data_type(self) -> DataType {
        match self {
            NumericAccessor::TinyInt => DataType::TinyInt,
            NumericAccessor::SmallInt => DataType::SmallInt,
            NumericAccessor::Int32 => DataType::Int32,
            NumericAccessor::BigInt => DataType::BigInt,
            NumericAccessor::Real => DataType::Real,
            NumericAccessor::Double => DataType::Double,
            NumericAccessor::Decimal => DataType::Decimal,
        }
    }

    /// Widen `value` to a double.
    ///
    /// BIGINT values beyond 2^53 round to the nearest representable double,
    /// DECIMAL values convert to the nearest double.
    pub fn as_double(self, value: &Value) -> ExpressionResult<f64> {
        match (self, value) {
            (NumericAccessor::TinyInt, Value::TinyInt(v)) => Ok(f64::from(*v)),
            (NumericAccessor::SmallInt, Value::SmallInt(v)) => Ok(f64::from(*v)),
            (NumericAccessor::Int32, Value::Int32(v)) => Ok(f64::from(*v)),
            (NumericAccessor::BigInt, Value::BigInt(v)) => Ok(*v as f64),
            (NumericAccessor::Real, Value::Real(v)) => Ok(f64::from(*v)),
            (NumericAccessor::Double, Value::Double(v)) => Ok(*v),
            (NumericAccessor::Decimal, Value::Decimal(v)) => v
                .to_f64()
                .ok_or(ExpressionError::DecimalOutOfRange { value: *v }),
            (accessor, other) => Err(ExpressionError::TypeMismatch {
                expected: accessor.data_type(),
                actual: other.data_type(),
                context: "numeric access".to_string(),
            }),
        }
    }
}
