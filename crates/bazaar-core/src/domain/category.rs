use serde::{Deserialize, Serialize};

/// Category entity - a named grouping for ads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
