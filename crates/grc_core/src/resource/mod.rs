//! Request form to record adapter.
//!
//! # Responsibility
//! - Write recognized fields of a decoded request body onto a record.
//! - Serialize a record into a JSON mapping for responses.
//!
//! # Invariants
//! - Unrecognized form fields are ignored; no validation happens here.
//! - `attrs_for_json` always carries `id`, `type`, `display_name`,
//!   `created_at`, `updated_at` and every declared attribute.

mod category;
mod facility;
mod service;

pub use category::CategoryResource;
pub use facility::FacilityResource;
pub use service::ResourceService;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Decoded request body.
pub type Form = Map<String, Value>;

/// JSON-ready attribute mapping.
pub type JsonAttrs = Map<String, Value>;

/// Identity and bookkeeping every served record exposes.
pub trait Record {
    fn id(&self) -> Uuid;
    fn display_name(&self) -> String;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Adapter between request forms, records and JSON.
pub trait Resource {
    type Model: Record;

    /// Type name reported as `type`.
    fn type_name(&self) -> &'static str;

    /// Fresh record for `create`.
    fn new_object(&self) -> Self::Model;

    fn update_object_from_form(&self, obj: &mut Self::Model, form: &Form);

    fn attrs_for_json(&self, obj: &Self::Model) -> JsonAttrs;
}

/// Attributes common to every resource.
pub fn base_attrs_for_json<R: Resource>(resource: &R, obj: &R::Model) -> JsonAttrs {
    let mut attrs = JsonAttrs::new();
    attrs.insert("id".to_string(), Value::String(obj.id().to_string()));
    attrs.insert("type".to_string(), Value::String(resource.type_name().to_string()));
    attrs.insert("display_name".to_string(), Value::String(obj.display_name()));
    attrs.insert("created_at".to_string(), timestamp_value(obj.created_at()));
    attrs.insert("updated_at".to_string(), timestamp_value(obj.updated_at()));
    attrs
}

fn timestamp_value(value: Option<DateTime<Utc>>) -> Value {
    value.map_or(Value::Null, |timestamp| {
        Value::String(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
    })
}

fn optional_text_value(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}

fn date_value(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, |date| Value::String(date.format("%Y-%m-%d").to_string()))
}

/// Form text field: `Some(None)` for explicit `null`, `None` when the field
/// is missing or not text.
fn form_text(form: &Form, field: &str) -> Option<Option<String>> {
    match form.get(field)? {
        Value::Null => Some(None),
        Value::String(text) => Some(Some(text.clone())),
        _ => None,
    }
}

/// Form date field in `YYYY-MM-DD` or `MM/DD/YYYY` form. Blank text and
/// `null` clear the date; unparsable values are ignored.
fn form_date(form: &Form, field: &str) -> Option<Option<NaiveDate>> {
    match form_text(form, field)? {
        None => Some(None),
        Some(text) if text.trim().is_empty() => Some(None),
        Some(text) => ["%Y-%m-%d", "%m/%d/%Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text.trim(), format).ok())
            .map(Some),
    }
}
