use serde::{Deserialize, Serialize};

/// Prefix id used when a number is stored without one (home country)
pub const DEFAULT_PREFIX_ID: i64 = 420;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub id: i64,
    pub prefix_id: Option<i64>,
    pub number: i64,
    pub contact_id: Option<i64>,
}

impl PhoneNumber {
    pub fn new(number: i64, contact_id: Option<i64>) -> Self {
        Self {
            id: 0,
            prefix_id: None,
            number,
            contact_id,
        }
    }

    pub fn with_prefix(mut self, prefix_id: i64) -> Self {
        self.prefix_id = Some(prefix_id);
        self
    }
}
