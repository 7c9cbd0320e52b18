use serde::{Deserialize, Serialize};

/// International calling code and the state it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefix {
    pub id: i64,
    pub prefix: i64,
    pub state: String,
}

impl Prefix {
    pub fn new(prefix: i64, state: &str) -> Self {
        Self {
            id: 0,
            prefix,
            state: state.to_string(),
        }
    }

    pub fn display_code(code: i64) -> String {
        format!("+{}", code)
    }
}
