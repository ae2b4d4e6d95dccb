//! Chat identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the chat a message arrived from and replies go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Wrap a raw platform chat id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
