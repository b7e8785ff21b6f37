//! Binary wire format for shipping expression trees between cluster members.
//!
//! All multi-byte integers and floats are big-endian. Expressions are written
//! as a one-byte kind discriminator followed by the node's own fields; child
//! nodes are written recursively the same way.

pub mod input;
pub mod output;

pub use input::DataInput;
pub use output::DataOutput;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Unknown data type: {0}")]
    UnknownDataType(u8),

    #[error("Unknown expression kind: {0}")]
    UnknownExpressionKind(u8),

    #[error("Invalid UTF-8 in string: {0}")]
    InvalidUtf8(String),

    #[error("Invalid length: {0}")]
    InvalidLength(i32),

    #[error("Invalid column index: {0}")]
    InvalidColumnIndex(i32),

    #[error("Non-null value declared with type NULL")]
    NullTypeWithValue,

    #[error("{0} trailing bytes after expression")]
    TrailingBytes(usize),

    #[error("Column index {0} does not fit the wire format")]
    ColumnIndexOverflow(usize),

    #[error("Length {0} does not fit the wire format")]
    LengthOverflow(usize),

    #[error("Expression nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;

/// Deepest expression tree accepted on either side of the wire, counting the leaf
pub const MAX_NESTING_DEPTH: usize = 256;

/// Types that can be written to and read back from the wire.
///
/// `read_data` is the only way a node is rebuilt from bytes, so any state a
/// node derives at evaluation time starts out empty on the receiving member.
pub trait DataSerializable {
    fn write_data(&self, out: &mut DataOutput) -> Result<()>;

    fn read_data(input: &mut DataInput<'_>) -> Result<Self>
    where
        Self: Sized;
}
