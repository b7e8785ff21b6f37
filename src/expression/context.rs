/// Execution-scoped state handed to every node evaluation.
///
/// Expression nodes pass it through to their children untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    query_id: u64,
}

impl QueryContext {
    pub fn new(query_id: u64) -> Self {
        Self { query_id }
    }

    pub fn query_id(&self) -> u64 {
        self.query_id
    }
}
