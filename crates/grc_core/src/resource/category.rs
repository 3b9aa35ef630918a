use super::{base_attrs_for_json, Form, JsonAttrs, Record, Resource};
use crate::model::category::Category;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

impl Record for Category {
    fn id(&self) -> Uuid {
        self.uuid
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryResource;

impl Resource for CategoryResource {
    type Model = Category;

    fn type_name(&self) -> &'static str {
        "Category"
    }

    fn new_object(&self) -> Category {
        Category::default()
    }

    /// `name` defaults to an empty string when missing.
    fn update_object_from_form(&self, category: &mut Category, form: &Form) {
        category.name = form
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }

    fn attrs_for_json(&self, category: &Category) -> JsonAttrs {
        let mut attrs = base_attrs_for_json(self, category);
        attrs.insert("name".to_string(), Value::String(category.name.clone()));
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::CategoryResource;
    use crate::model::category::Category;
    use crate::resource::{Form, Resource};
    use serde_json::json;

    fn form(value: serde_json::Value) -> Form {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_name_becomes_empty() {
        let mut category = Category::new("Old");
        CategoryResource.update_object_from_form(&mut category, &form(json!({"other": 1})));
        assert_eq!(category.name, "");
    }

    #[test]
    fn json_carries_identity_and_name() {
        let category = Category::new("Finance");
        let attrs = CategoryResource.attrs_for_json(&category);
        assert_eq!(attrs["type"], "Category");
        assert_eq!(attrs["name"], "Finance");
        assert_eq!(attrs["display_name"], "Finance");
        assert_eq!(attrs["id"], category.uuid.to_string());
        assert!(attrs["created_at"].is_null());
    }
}
