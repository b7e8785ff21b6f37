use crate::access::Value;

/// An ordered record of values supporting positional lookup
pub trait Row: Send + Sync {
    /// Value at `index`, or `None` when the index is past the end
    fn get(&self, index: usize) -> Option<&Value>;

    /// Number of columns in the row
    fn column_count(&self) -> usize;
}

impl Row for [Value] {
    fn get(&self, index: usize) -> Option<&Value> {
        <[Value]>::get(self, index)
    }

    fn column_count(&self) -> usize {
        self.len()
    }
}

/// Row backed by an owned vector of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRow {
    values: Vec<Value>,
}

impl ValueRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for ValueRow {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl Row for ValueRow {
    fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    fn column_count(&self) -> usize {
        self.values.len()
    }
}
