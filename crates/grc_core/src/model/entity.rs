//! Entity domain model.
//!
//! # Responsibility
//! - Hold the typed attribute set of one domain object as seen in the UI.
//! - Apply normalized scopes onto an entity and re-serialize it to a scope.
//!
//! # Invariants
//! - `people` keys are always members of `PEOPLE_ATTRS`.
//! - Timestamps are stored in UTC.
//! - `Entity::to_scope()` followed by normalization reproduces the entity.

use crate::model::object_type::ObjectType;
use crate::scope::datetime::format_ui_datetime;
use crate::scope::headers::display_header;
use crate::scope::{AttrValue, NormalizedScope, Scope, ScopeError, ScopeValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes holding an ordered list of people names.
pub const PEOPLE_ATTRS: &[&str] = &[
    "admins",
    "primary_contacts",
    "secondary_contacts",
    "assignees",
    "creators",
    "verifiers",
    "managers",
    "editors",
    "readers",
    "control_operators",
    "control_owners",
    "risk_owners",
    "other_contacts",
    "audit_captains",
    "auditors",
];

/// Attributes parsed as booleans.
pub const BOOL_ATTRS: &[&str] = &["mandatory", "verified"];

/// Attributes parsed as UTC timestamps.
pub const TIMESTAMP_ATTRS: &[&str] = &["updated_at", "created_at"];

/// Text attributes with a dedicated entity field.
pub const TEXT_ATTRS: &[&str] = &[
    "title",
    "slug",
    "status",
    "description",
    "notes",
    "assessment_type",
    "modified_by",
    "review_status",
    "review_status_display_name",
];

pub fn is_people_attr(attr: &str) -> bool {
    PEOPLE_ATTRS.contains(&attr)
}

/// One comment attached to an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub created_at: Option<DateTime<Utc>>,
    /// Remaining comment sub-fields (`description`, `modified_by`, ...).
    pub fields: BTreeMap<String, String>,
}

/// Typed in-memory representation of one domain object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub obj_type: ObjectType,
    pub id: Option<i64>,
    /// Object page URL, required for navigation.
    pub url: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub assessment_type: Option<String>,
    pub modified_by: Option<String>,
    pub people: BTreeMap<String, Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub verified: Option<bool>,
    pub mandatory: Option<bool>,
    pub review_status: Option<String>,
    pub review_status_display_name: Option<String>,
    pub comments: Option<Vec<Comment>>,
    /// Values of attributes without a dedicated field, keyed by normalized header.
    pub custom_attributes: BTreeMap<String, Option<String>>,
}

impl Entity {
    /// Factory for an empty entity of the given type.
    pub fn empty(obj_type: ObjectType) -> Self {
        Self {
            obj_type,
            id: None,
            url: None,
            title: None,
            slug: None,
            status: None,
            description: None,
            notes: None,
            assessment_type: None,
            modified_by: None,
            people: BTreeMap::new(),
            created_at: None,
            updated_at: None,
            verified: None,
            mandatory: None,
            review_status: None,
            review_status_display_name: None,
            comments: None,
            custom_attributes: BTreeMap::new(),
        }
    }

    /// Convenience constructor used by callers that only know a title.
    pub fn with_title(obj_type: ObjectType, title: impl Into<String>) -> Self {
        let mut entity = Self::empty(obj_type);
        entity.title = Some(title.into());
        entity
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Title or empty string, as used for searching by title in the UI.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// People names for a role, empty when unset.
    pub fn people_in(&self, attr: &str) -> &[String] {
        self.people.get(attr).map(Vec::as_slice).unwrap_or_default()
    }

    /// Applies a normalized scope.
    ///
    /// # Contract
    /// - Absent values clear the attribute.
    /// - Attributes without a dedicated field land in `custom_attributes`.
    /// - A value whose shape does not fit the attribute is an error.
    pub fn update_attrs(&mut self, scope: NormalizedScope) -> Result<(), ScopeError> {
        for (attr, value) in scope {
            self.set_attr(attr, value)?;
        }
        Ok(())
    }

    fn set_attr(&mut self, attr: String, value: AttrValue) -> Result<(), ScopeError> {
        match attr.as_str() {
            "id" => {
                self.id = match value.into_text(&attr)? {
                    Some(text) => Some(text.trim().parse::<i64>().map_err(|_| {
                        ScopeError::InvalidValue {
                            attr: attr.clone(),
                            value: text.clone(),
                        }
                    })?),
                    None => None,
                }
            }
            "title" => self.title = value.into_text(&attr)?,
            "slug" => self.slug = value.into_text(&attr)?,
            "status" => self.status = value.into_text(&attr)?,
            "description" => self.description = value.into_text(&attr)?,
            "notes" => self.notes = value.into_text(&attr)?,
            "assessment_type" => self.assessment_type = value.into_text(&attr)?,
            "modified_by" => self.modified_by = value.into_text(&attr)?,
            "review_status" => self.review_status = value.into_text(&attr)?,
            "review_status_display_name" => {
                self.review_status_display_name = value.into_text(&attr)?
            }
            "created_at" => self.created_at = value.into_timestamp(&attr)?,
            "updated_at" => self.updated_at = value.into_timestamp(&attr)?,
            "verified" => self.verified = value.into_bool(&attr)?,
            "mandatory" => self.mandatory = value.into_bool(&attr)?,
            "comments" => self.comments = value.into_comments(&attr)?,
            other if is_people_attr(other) => match value.into_people(&attr)? {
                Some(names) => {
                    self.people.insert(other.to_string(), names);
                }
                None => {
                    self.people.remove(other);
                }
            },
            _ => {
                let text = value.into_display_text(&attr)?;
                self.custom_attributes.insert(attr.clone(), text);
            }
        }
        Ok(())
    }

    /// Re-serializes the entity into a display scope with canonical headers.
    ///
    /// Unset attributes are omitted; `id` and `url` are not displayed in the UI
    /// and are never part of a scope.
    pub fn to_scope(&self) -> Scope {
        let mut scope = Scope::new();
        let mut put_text = |attr: &str, value: &Option<String>| {
            if let Some(text) = value {
                scope.insert(display_header(attr).to_string(), ScopeValue::Text(text.clone()));
            }
        };
        put_text("title", &self.title);
        put_text("slug", &self.slug);
        put_text("status", &self.status);
        put_text("description", &self.description);
        put_text("notes", &self.notes);
        put_text("assessment_type", &self.assessment_type);
        put_text("modified_by", &self.modified_by);
        put_text("review_status", &self.review_status);
        put_text("review_status_display_name", &self.review_status_display_name);

        for (attr, value) in [("created_at", self.created_at), ("updated_at", self.updated_at)] {
            if let Some(timestamp) = value {
                scope.insert(
                    display_header(attr).to_string(),
                    ScopeValue::Text(format_ui_datetime(&timestamp)),
                );
            }
        }
        for (attr, value) in [("verified", self.verified), ("mandatory", self.mandatory)] {
            if let Some(flag) = value {
                let token = if flag { "Yes" } else { "No" };
                scope.insert(display_header(attr).to_string(), ScopeValue::Text(token.to_string()));
            }
        }
        for (attr, names) in &self.people {
            scope.insert(display_header(attr).to_string(), ScopeValue::List(names.clone()));
        }
        if let Some(comments) = &self.comments {
            let rows = comments
                .iter()
                .map(|comment| {
                    let mut row = comment.fields.clone();
                    if let Some(created_at) = comment.created_at {
                        row.insert("created_at".to_string(), format_ui_datetime(&created_at));
                    }
                    row
                })
                .collect();
            scope.insert(display_header("comments").to_string(), ScopeValue::Comments(rows));
        }
        for (key, value) in &self.custom_attributes {
            let text = value.clone().unwrap_or_else(|| "None".to_string());
            scope.insert(key.clone(), ScopeValue::Text(text));
        }
        scope
    }
}
