use crate::access::{DataType, Value};
use crate::wire::{Result, WireError, MAX_NESTING_DEPTH};
use bytes::Buf;
use rust_decimal::Decimal;

/// Big-endian reader over a borrowed buffer.
///
/// Every read checks the remaining length first, so truncated input surfaces
/// as [`WireError::UnexpectedEof`] instead of a panic. Nested nodes are
/// counted, and a frame deeper than the limit fails with
/// [`WireError::NestingTooDeep`] before it can exhaust the stack.
#[derive(Debug)]
pub struct DataInput<'a> {
    buf: &'a [u8],
    depth: usize,
    max_depth: usize,
}

impl<'a> DataInput<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_max_depth(buf, MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(buf: &'a [u8], max_depth: usize) -> Self {
        Self {
            buf,
            depth: 0,
            max_depth,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            return Err(WireError::UnexpectedEof {
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buf.get_i32())
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(WireError::InvalidLength(len));
        }
        let len = len as usize;
        self.ensure(len)?;
        let s = std::str::from_utf8(&self.buf[..len])
            .map_err(|e| WireError::InvalidUtf8(e.to_string()))?
            .to_string();
        self.buf.advance(len);
        Ok(s)
    }

    /// Read one nested expression node
    pub fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(WireError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    pub fn read_data_type(&mut self) -> Result<DataType> {
        DataType::from_u8(self.read_u8()?)
    }

    /// Read a value written by [`DataOutput::write_value`](crate::wire::DataOutput::write_value)
    pub fn read_value(&mut self, data_type: DataType) -> Result<Value> {
        if self.read_bool()? {
            return Ok(Value::Null);
        }

        match data_type {
            DataType::Null => Err(WireError::NullTypeWithValue),
            DataType::Boolean => Ok(Value::Boolean(self.read_bool()?)),
            DataType::TinyInt => {
                self.ensure(1)?;
                Ok(Value::TinyInt(self.buf.get_i8()))
            }
            DataType::SmallInt => {
                self.ensure(2)?;
                Ok(Value::SmallInt(self.buf.get_i16()))
            }
            DataType::Int32 => Ok(Value::Int32(self.read_i32()?)),
            DataType::BigInt => {
                self.ensure(8)?;
                Ok(Value::BigInt(self.buf.get_i64()))
            }
            DataType::Real => {
                self.ensure(4)?;
                Ok(Value::Real(self.buf.get_f32()))
            }
            DataType::Double => {
                self.ensure(8)?;
                Ok(Value::Double(self.buf.get_f64()))
            }
            DataType::Decimal => {
                self.ensure(16)?;
                let mut raw = [0u8; 16];
                self.buf.copy_to_slice(&mut raw);
                Ok(Value::Decimal(Decimal::deserialize(raw)))
            }
            DataType::Varchar => Ok(Value::String(self.read_string()?)),
        }
    }
}
