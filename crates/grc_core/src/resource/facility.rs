use super::{
    base_attrs_for_json, date_value, form_date, form_text, optional_text_value, Form, JsonAttrs,
    Record, Resource,
};
use crate::model::facility::{Facility, FacilityStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

impl Record for Facility {
    fn id(&self) -> Uuid {
        self.uuid
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FacilityResource;

impl Resource for FacilityResource {
    type Model = Facility;

    fn type_name(&self) -> &'static str {
        "Facility"
    }

    fn new_object(&self) -> Facility {
        Facility::default()
    }

    /// Fields absent from the form keep their value; `null` clears optional
    /// fields. Unknown status values are ignored.
    fn update_object_from_form(&self, facility: &mut Facility, form: &Form) {
        if let Some(title) = form_text(form, "title") {
            facility.title = title.unwrap_or_default();
        }
        if let Some(status) = form_text(form, "status").flatten() {
            if let Some(status) = FacilityStatus::parse(&status) {
                facility.status = status;
            }
        }
        for (field, target) in [
            ("slug", &mut facility.slug),
            ("description", &mut facility.description),
            ("notes", &mut facility.notes),
            ("reference_url", &mut facility.reference_url),
        ] {
            if let Some(value) = form_text(form, field) {
                *target = value;
            }
        }
        if let Some(date) = form_date(form, "start_date") {
            facility.start_date = date;
        }
        if let Some(date) = form_date(form, "end_date") {
            facility.end_date = date;
        }
    }

    fn attrs_for_json(&self, facility: &Facility) -> JsonAttrs {
        let mut attrs = base_attrs_for_json(self, facility);
        attrs.insert("title".to_string(), Value::String(facility.title.clone()));
        attrs.insert("slug".to_string(), optional_text_value(&facility.slug));
        attrs.insert(
            "status".to_string(),
            Value::String(facility.status.as_str().to_string()),
        );
        attrs.insert("description".to_string(), optional_text_value(&facility.description));
        attrs.insert("notes".to_string(), optional_text_value(&facility.notes));
        attrs.insert("reference_url".to_string(), optional_text_value(&facility.reference_url));
        attrs.insert("start_date".to_string(), date_value(facility.start_date));
        attrs.insert("end_date".to_string(), date_value(facility.end_date));
        attrs
    }
}
