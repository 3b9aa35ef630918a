//! Facility record.
//!
//! # Invariants
//! - `status` is one of Draft/Deprecated/Active; new facilities are Draft.
//! - `end_date` is the last deprecation date and may precede `start_date`;
//!   no ordering is enforced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type FacilityId = Uuid;

/// Launch status of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacilityStatus {
    #[default]
    Draft,
    Deprecated,
    Active,
}

impl FacilityStatus {
    pub const ALL: [FacilityStatus; 3] = [Self::Draft, Self::Deprecated, Self::Active];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Deprecated => "Deprecated",
            Self::Active => "Active",
        }
    }

    /// Case-insensitive parse of a display value.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub uuid: FacilityId,
    pub title: String,
    /// Code shown in the UI.
    pub slug: Option<String>,
    pub status: FacilityStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub reference_url: Option<String>,
    /// Effective date.
    pub start_date: Option<NaiveDate>,
    /// Last deprecated date.
    pub end_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Facility {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            slug: None,
            status: FacilityStatus::default(),
            description: None,
            notes: None,
            reference_url: None,
            start_date: None,
            end_date: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Default for Facility {
    fn default() -> Self {
        Self::new(String::new())
    }
}
