//! Individual tool operations
//!
//! Each module is a plain operation: input parameters in, a
//! [`RawResult`] or error out. Approval, truncation, summarization, and
//! console reporting all live in the gateway.

pub mod directory;
pub mod read_file;
pub mod tags;
pub mod terminal;
pub mod write_file;

/// Untruncated output of one tool operation. `total_count` usually equals
/// `items.len()`; file writes count bytes instead.
#[derive(Clone, Debug, Default)]
pub struct RawResult {
    pub total_count: usize,
    pub items: Vec<String>,
}

impl RawResult {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            total_count: items.len(),
            items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
