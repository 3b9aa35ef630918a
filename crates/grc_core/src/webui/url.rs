//! Application URLs and widget fragments.

use crate::model::object_type::ObjectType;

/// Fragment of an object's info widget.
pub const INFO_WIDGET: &str = "#!info";
const WIDGET_PREFIX: &str = "#!";
const VERSIONS_SUFFIX: &str = "_versions";

/// Absolute URLs rooted at the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    base_url: String,
}

impl Urls {
    /// `base_url` gets a trailing `/` when it lacks one.
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base(&self) -> &str {
        &self.base_url
    }

    pub fn dashboard(&self) -> String {
        format!("{}dashboard", self.base_url)
    }

    /// Dashboard tab listing every object of `obj_type`.
    pub fn dashboard_objs_tab(&self, obj_type: ObjectType) -> String {
        format!("{}{}", self.dashboard(), widget_of_mapped_objs(obj_type, false))
    }

    pub fn my_assessments(&self) -> String {
        format!("{}assessments_view", self.base_url)
    }

    pub fn obj_url(&self, obj_type: ObjectType, id: i64) -> String {
        format!("{}{}/{id}", self.base_url, obj_type.descriptor().collection)
    }
}

/// Widget fragment listing mapped objects of `obj_type`: `#!control` or
/// `#!control_versions`.
pub fn widget_of_mapped_objs(obj_type: ObjectType, is_versions_widget: bool) -> String {
    let widget = obj_type.descriptor().widget;
    if is_versions_widget {
        format!("{WIDGET_PREFIX}{widget}{VERSIONS_SUFFIX}")
    } else {
        format!("{WIDGET_PREFIX}{widget}")
    }
}

/// Object page URL without its widget fragment.
pub fn src_obj_url(current_url: &str) -> &str {
    current_url
        .split_once('#')
        .map_or(current_url, |(page, _)| page)
}

/// Object page URL followed by a fixed widget fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    fragment: String,
}

impl UrlTemplate {
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    pub fn render(&self, obj_url: &str) -> String {
        format!("{}{}", src_obj_url(obj_url), self.fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::{src_obj_url, widget_of_mapped_objs, UrlTemplate, Urls, INFO_WIDGET};
    use crate::model::object_type::ObjectType;

    #[test]
    fn widget_fragments() {
        assert_eq!(widget_of_mapped_objs(ObjectType::Control, false), "#!control");
        assert_eq!(
            widget_of_mapped_objs(ObjectType::Control, true),
            "#!control_versions"
        );
        assert_eq!(
            widget_of_mapped_objs(ObjectType::TechnologyEnvironment, false),
            "#!technology_environment"
        );
    }

    #[test]
    fn src_obj_url_strips_fragment() {
        assert_eq!(
            src_obj_url("http://h/audits/7#!assessment"),
            "http://h/audits/7"
        );
        assert_eq!(src_obj_url("http://h/audits/7"), "http://h/audits/7");
    }

    #[test]
    fn template_replaces_existing_fragment() {
        let template = UrlTemplate::with_fragment(INFO_WIDGET);
        assert_eq!(template.render("http://h/risks/3#!control"), "http://h/risks/3#!info");
    }

    #[test]
    fn urls_are_rooted_at_base() {
        let urls = Urls::new("http://localhost:8080");
        assert_eq!(urls.dashboard(), "http://localhost:8080/dashboard");
        assert_eq!(
            urls.dashboard_objs_tab(ObjectType::Risk),
            "http://localhost:8080/dashboard#!risk"
        );
        assert_eq!(
            urls.obj_url(ObjectType::OrgGroup, 5),
            "http://localhost:8080/org_groups/5"
        );
    }
}
