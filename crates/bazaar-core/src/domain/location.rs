use serde::{Deserialize, Serialize};

/// A named place a user can be associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
