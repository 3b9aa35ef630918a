//! Category record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Named grouping applied to controls and assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: CategoryId,
    pub name: String,
    /// Set by storage; `None` until first persisted.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::new(String::new())
    }
}
