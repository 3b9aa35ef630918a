//! Scope normalization: scraped UI text to typed entity attributes.
//!
//! # Responsibility
//! - Define the raw `Scope` shape read from tree views, info panels, info
//!   pages and CSV exports.
//! - Convert raw scopes into typed attribute values and build entities.
//!
//! # Invariants
//! - Header lookup is case-insensitive.
//! - `"None"` and `"No person"` always normalize to an absent value.
//! - Every call site funnels through `create_list_objs`, so the per-field
//!   rules hold regardless of which UI surface produced the scope.

pub mod csv_export;
pub mod datetime;
pub mod headers;

use crate::model::entity::{is_people_attr, Comment, Entity, BOOL_ATTRS, TIMESTAMP_ATTRS};
use crate::model::object_type::ObjectType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use self::datetime::{parse_comment_datetime, parse_ui_datetime};
use self::headers::attr_for_header;

/// Text tokens the UI renders for an empty value.
pub const NONE_TOKENS: &[&str] = &["None", "No person"];

/// Marker prefixed to snapshot identifiers in exports.
pub const SNAPSHOT_SLUG_MARKER: char = '*';

/// Raw value of one displayed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeValue {
    /// Field rendered without any value (`null` in JSON).
    Empty,
    Text(String),
    List(Vec<String>),
    /// Comment rows as `sub-field -> text` mappings.
    Comments(Vec<BTreeMap<String, String>>),
}

impl From<&str> for ScopeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScopeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ScopeValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Raw mapping of displayed field name to value.
pub type Scope = BTreeMap<String, ScopeValue>;

/// Builds a scope from `(header, text)` pairs.
pub fn scope_from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Scope {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), ScopeValue::from(value)))
        .collect()
}

/// Typed value after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Absent,
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    People(Vec<String>),
    List(Vec<String>),
    Comments(Vec<Comment>),
}

/// Attribute name to typed value.
pub type NormalizedScope = BTreeMap<String, AttrValue>;

impl AttrValue {
    pub fn into_text(self, attr: &str) -> Result<Option<String>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            _ => Err(ScopeError::unexpected_shape(attr, "text")),
        }
    }

    /// Text rendering for free-form attributes; lists are joined with `", "`.
    pub fn into_display_text(self, attr: &str) -> Result<Option<String>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            Self::Bool(flag) => Ok(Some(flag.to_string())),
            Self::Timestamp(value) => Ok(Some(value.to_rfc3339())),
            Self::People(items) | Self::List(items) => Ok(Some(items.join(", "))),
            Self::Comments(_) => Err(ScopeError::unexpected_shape(attr, "text")),
        }
    }

    pub fn into_bool(self, attr: &str) -> Result<Option<bool>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::Bool(flag) => Ok(Some(flag)),
            _ => Err(ScopeError::unexpected_shape(attr, "boolean")),
        }
    }

    pub fn into_timestamp(self, attr: &str) -> Result<Option<DateTime<Utc>>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::Timestamp(value) => Ok(Some(value)),
            _ => Err(ScopeError::unexpected_shape(attr, "timestamp")),
        }
    }

    pub fn into_people(self, attr: &str) -> Result<Option<Vec<String>>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::People(names) | Self::List(names) => Ok(Some(names)),
            _ => Err(ScopeError::unexpected_shape(attr, "people list")),
        }
    }

    pub fn into_comments(self, attr: &str) -> Result<Option<Vec<Comment>>, ScopeError> {
        match self {
            Self::Absent => Ok(None),
            Self::Comments(comments) => Ok(Some(comments)),
            Self::List(items) if items.is_empty() => Ok(Some(Vec::new())),
            _ => Err(ScopeError::unexpected_shape(attr, "comment list")),
        }
    }
}

/// Normalization failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// A typed field carries text that cannot be parsed.
    InvalidValue { attr: String, value: String },
    /// A value's shape does not fit the attribute.
    UnexpectedShape { attr: String, expected: &'static str },
}

impl ScopeError {
    fn unexpected_shape(attr: &str, expected: &'static str) -> Self {
        Self::UnexpectedShape {
            attr: attr.to_string(),
            expected,
        }
    }
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { attr, value } => {
                write!(f, "invalid value for `{attr}`: `{value}`")
            }
            Self::UnexpectedShape { attr, expected } => {
                write!(f, "unexpected value shape for `{attr}`: expected {expected}")
            }
        }
    }
}

impl Error for ScopeError {}

/// Parses UI yes/no-style tokens.
pub fn parse_bool_token(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on" | "checked" | "verified"
    )
}

/// Normalizes one raw scope for the given object type.
///
/// Keys are upper-cased and remapped to attribute names, then each value is
/// converted according to the attribute it lands on.
pub fn normalize_scope(obj_type: ObjectType, scope: &Scope) -> Result<NormalizedScope, ScopeError> {
    let mut normalized = NormalizedScope::new();
    for (raw_key, raw_value) in scope {
        let upper_key = raw_key.trim().to_uppercase();
        let attr = attr_for_header(&upper_key)
            .map(str::to_string)
            .unwrap_or(upper_key);
        let value = normalize_value(obj_type, &attr, raw_value)?;
        normalized.insert(attr, value);
    }
    Ok(normalized)
}

fn normalize_value(
    obj_type: ObjectType,
    attr: &str,
    raw_value: &ScopeValue,
) -> Result<AttrValue, ScopeError> {
    match raw_value {
        ScopeValue::Empty => Ok(AttrValue::Absent),
        ScopeValue::Text(text) if NONE_TOKENS.contains(&text.as_str()) => Ok(AttrValue::Absent),
        ScopeValue::Text(text) => normalize_text(obj_type, attr, text),
        ScopeValue::List(items) if is_people_attr(attr) => Ok(AttrValue::People(items.clone())),
        ScopeValue::List(items) => Ok(AttrValue::List(items.clone())),
        ScopeValue::Comments(rows) if attr == "comments" => {
            rows.iter().map(normalize_comment).collect::<Result<Vec<_>, _>>().map(AttrValue::Comments)
        }
        ScopeValue::Comments(_) => Err(ScopeError::unexpected_shape(attr, "text")),
    }
}

fn normalize_text(obj_type: ObjectType, attr: &str, text: &str) -> Result<AttrValue, ScopeError> {
    let is_typed = BOOL_ATTRS.contains(&attr)
        || TIMESTAMP_ATTRS.contains(&attr)
        || is_people_attr(attr);
    if text.is_empty() {
        return Ok(if is_typed {
            AttrValue::Absent
        } else {
            AttrValue::Text(String::new())
        });
    }

    if BOOL_ATTRS.contains(&attr) {
        return Ok(AttrValue::Bool(parse_bool_token(text)));
    }
    if TIMESTAMP_ATTRS.contains(&attr) {
        return parse_ui_datetime(text)
            .map(AttrValue::Timestamp)
            .ok_or_else(|| ScopeError::InvalidValue {
                attr: attr.to_string(),
                value: text.to_string(),
            });
    }
    if is_people_attr(attr) {
        // Tree view renders `Ex1, Ex2 F` for multiple people.
        return Ok(AttrValue::People(
            text.split(", ").map(str::to_string).collect(),
        ));
    }
    if attr == "slug" && obj_type.is_snapshotable() && text.contains(SNAPSHOT_SLUG_MARKER) {
        return Ok(AttrValue::Text(text.replace(SNAPSHOT_SLUG_MARKER, "")));
    }
    Ok(AttrValue::Text(text.to_string()))
}

fn normalize_comment(row: &BTreeMap<String, String>) -> Result<Comment, ScopeError> {
    let mut fields = row.clone();
    let created_at = match fields.remove("created_at") {
        Some(raw) if raw.trim().is_empty() => None,
        Some(raw) => Some(parse_comment_datetime(&raw).ok_or(ScopeError::InvalidValue {
            attr: "comments.created_at".to_string(),
            value: raw,
        })?),
        None => None,
    };
    Ok(Comment { created_at, fields })
}

/// Builds entities from raw scopes.
///
/// Each scope is normalized, an empty entity is created through the type
/// factory and the normalized scope is applied onto it.
pub fn create_list_objs(obj_type: ObjectType, scopes: &[Scope]) -> Result<Vec<Entity>, ScopeError> {
    scopes
        .iter()
        .map(|scope| {
            let normalized = normalize_scope(obj_type, scope)?;
            let mut entity = Entity::empty(obj_type);
            entity.update_attrs(normalized)?;
            Ok(entity)
        })
        .collect()
}
