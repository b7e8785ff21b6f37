use crate::access::accessor::NumericAccessor;
use crate::expression::{ExpressionError, ExpressionResult};
use crate::wire::WireError;
use rust_decimal::Decimal;
use std::fmt;

/// Logical types a value can be declared with
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean = 1,
    Int32 = 2,
    Varchar = 4,
    TinyInt = 5,
    SmallInt = 6,
    BigInt = 7,
    Real = 8,
    Double = 9,
    Decimal = 10,
    /// Type of an untyped NULL literal
    Null = 11,
}

impl DataType {
    pub fn from_u8(value: u8) -> Result<Self, WireError> {
        match value {
            1 => Ok(DataType::Boolean),
            2 => Ok(DataType::Int32),
            4 => Ok(DataType::Varchar),
            5 => Ok(DataType::TinyInt),
            6 => Ok(DataType::SmallInt),
            7 => Ok(DataType::BigInt),
            8 => Ok(DataType::Real),
            9 => Ok(DataType::Double),
            10 => Ok(DataType::Decimal),
            11 => Ok(DataType::Null),
            _ => Err(WireError::UnknownDataType(value)),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether values of this type belong to the numeric family
    pub fn is_numeric(self) -> bool {
        self.accessor().is_some()
    }

    /// Accessor that widens values of this type to `f64`.
    ///
    /// Fails with [`ExpressionError::OperandNotNumeric`] for non-numeric types.
    pub fn numeric_accessor(self) -> ExpressionResult<NumericAccessor> {
        self.accessor()
            .ok_or(ExpressionError::OperandNotNumeric { data_type: self })
    }

    fn accessor(self) -> Option<NumericAccessor> {
        match self {
            DataType::TinyInt => Some(NumericAccessor::TinyInt),
            DataType::SmallInt => Some(NumericAccessor::SmallInt),
            DataType::Int32 => Some(NumericAccessor::Int32),
            DataType::BigInt => Some(NumericAccessor::BigInt),
            DataType::Real => Some(NumericAccessor::Real),
            DataType::Double => Some(NumericAccessor::Double),
            DataType::Decimal => Some(NumericAccessor::Decimal),
            DataType::Boolean | DataType::Varchar | DataType::Null => None,
        }
    }

    /// SQL name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int32 => "INT",
            DataType::Varchar => "VARCHAR",
            DataType::TinyInt => "TINYINT",
            DataType::SmallInt => "SMALLINT",
            DataType::BigInt => "BIGINT",
            DataType::Real => "REAL",
            DataType::Double => "DOUBLE",
            DataType::Decimal => "DECIMAL",
            DataType::Null => "NULL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime values flowing through expression evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int32(i32),
    BigInt(i64),
    Real(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
}

impl Value {
    /// Get the data type of this value
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::TinyInt(_) => Some(DataType::TinyInt),
            Value::SmallInt(_) => Some(DataType::SmallInt),
            Value::Int32(_) => Some(DataType::Int32),
            Value::BigInt(_) => Some(DataType::BigInt),
            Value::Real(_) => Some(DataType::Real),
            Value::Double(_) => Some(DataType::Double),
            Value::Decimal(_) => Some(DataType::Decimal),
            Value::String(_) => Some(DataType::Varchar),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is compatible with the given data type
    pub fn is_compatible_with(&self, data_type: DataType) -> bool {
        match self {
            Value::Null => true, // NULL is compatible with any type
            other => other.data_type() == Some(data_type),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
        }
    }
}
