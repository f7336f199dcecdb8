use serde::{Deserialize, Serialize};

/// One day's entry in the 3R study journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub date: String,
    pub content: String,
}
