use crate::access::{DataType, Value};
use crate::wire::{Result, WireError, MAX_NESTING_DEPTH};
use bytes::{BufMut, Bytes, BytesMut};

/// Append-only big-endian writer
#[derive(Debug)]
pub struct DataOutput {
    buf: BytesMut,
    depth: usize,
    max_depth: usize,
}

impl Default for DataOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl DataOutput {
    pub fn new() -> Self {
        Self::with_max_depth(MAX_NESTING_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            depth: 0,
            max_depth,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let len = i32::try_from(bytes.len()).map_err(|_| WireError::LengthOverflow(bytes.len()))?;
        self.buf.put_i32(len);
        self.buf.put_slice(bytes);
        Ok(())
    }

    /// Write one nested expression node; the counterpart of
    /// [`DataInput::nested`](crate::wire::DataInput::nested)
    pub fn nested(&mut self, write: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(WireError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = write(self);
        self.depth -= 1;
        result
    }

    pub fn write_data_type(&mut self, data_type: DataType) {
        self.buf.put_u8(data_type.as_u8());
    }

    /// Write a value declared with `data_type`: a null flag, then the payload.
    ///
    /// The payload width follows the declared type, so the caller must have
    /// checked `value.is_compatible_with(data_type)`.
    pub fn write_value(&mut self, value: &Value, data_type: DataType) -> Result<()> {
        if value.is_null() {
            self.write_bool(true);
            return Ok(());
        }
        self.write_bool(false);

        match value {
            Value::Null => {}
            Value::Boolean(b) => self.write_bool(*b),
            Value::TinyInt(v) => self.buf.put_i8(*v),
            Value::SmallInt(v) => self.buf.put_i16(*v),
            Value::Int32(v) => self.buf.put_i32(*v),
            Value::BigInt(v) => self.buf.put_i64(*v),
            Value::Real(v) => self.buf.put_f32(*v),
            Value::Double(v) => self.buf.put_f64(*v),
            Value::Decimal(v) => self.buf.put_slice(&v.serialize()),
            Value::String(s) => self.write_string(s)?,
        }
        debug_assert!(value.is_compatible_with(data_type));
        Ok(())
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }
}
