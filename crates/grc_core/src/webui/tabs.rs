//! Inner navigation tabs of an object page.
//!
//! # Responsibility
//! - Track which tabs are listed in the tab bar and which are hidden behind
//!   the "Add tab" dropdown.
//!
//! # Invariants
//! - Tabs are ordered by `(order, title)`; hidden tabs by title.
//! - A routed tab is force-shown until it is closed.
//! - Version tabs, uncountable tabs, force-show-list tabs and prohibited
//!   pairs are never hidden.

use crate::webui::url::src_obj_url;

const VERSIONS_SUFFIX: &str = "_versions";

/// Tab pairs that always stay in the tab bar: `(instance type, tab model)`.
const PROHIBITED_HIDING: &[(&str, &[&str])] = &[
    ("Issue", &["Assessment", "Audit"]),
    ("Assessment", &["Evidence"]),
];

/// Returns whether `tab_model` tabs are exempt from hiding on pages of
/// `instance_type`.
pub fn is_prohibited(instance_type: &str, tab_model: &str) -> bool {
    PROHIBITED_HIDING
        .iter()
        .any(|(instance, models)| *instance == instance_type && models.contains(&tab_model))
}

/// Widget registration as provided by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    pub widget_id: String,
    pub title: String,
    pub order: i32,
    /// Short model name of the listed objects, e.g. `Assessment`.
    pub model: String,
    pub uncountable: bool,
    /// Counter name; defaults to `model`.
    pub counts_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub order: i32,
    pub model: String,
    pub is_version: bool,
    pub uncountable: bool,
    /// Empty for uncountable tabs.
    pub counts_name: String,
    pub count: usize,
    pub force_show: bool,
    pub in_force_show_list: bool,
}

/// Tab bar state of one object page.
#[derive(Debug, Clone)]
pub struct InnerNav {
    instance_type: String,
    show_all_tabs: bool,
    tabs: Vec<Tab>,
    hidden: Vec<String>,
    active: Option<String>,
}

impl InnerNav {
    pub fn new(
        instance_type: impl Into<String>,
        show_all_tabs: bool,
        force_show_list: &[&str],
        descriptors: Vec<TabDescriptor>,
    ) -> Self {
        let mut tabs: Vec<Tab> = descriptors
            .into_iter()
            .map(|descriptor| {
                let counts_name = if descriptor.uncountable {
                    String::new()
                } else {
                    descriptor
                        .counts_name
                        .unwrap_or_else(|| descriptor.model.clone())
                };
                Tab {
                    is_version: descriptor.widget_id.ends_with(VERSIONS_SUFFIX),
                    in_force_show_list: force_show_list.contains(&descriptor.title.as_str()),
                    id: descriptor.widget_id,
                    title: descriptor.title,
                    order: descriptor.order,
                    model: descriptor.model,
                    uncountable: descriptor.uncountable,
                    counts_name,
                    count: 0,
                    force_show: false,
                }
            })
            .collect();
        tabs.sort_by(|left, right| {
            left.order
                .cmp(&right.order)
                .then_with(|| left.title.cmp(&right.title))
        });
        Self {
            instance_type: instance_type.into(),
            show_all_tabs,
            tabs,
            hidden: Vec::new(),
            active: None,
        }
    }

    /// Tab bar as displayed by a page: registered tabs with their current
    /// counters. Nothing is routed or force-shown yet.
    pub fn from_displayed(instance_type: impl Into<String>, displayed: Vec<(TabDescriptor, usize)>) -> Self {
        let counts: Vec<(String, usize)> = displayed
            .iter()
            .filter(|(descriptor, _)| !descriptor.uncountable)
            .map(|(descriptor, count)| (descriptor.widget_id.clone(), *count))
            .collect();
        let mut nav = Self::new(
            instance_type,
            false,
            &[],
            displayed.into_iter().map(|(descriptor, _)| descriptor).collect(),
        );
        for (widget_id, count) in counts {
            if let Some(index) = nav.position(&widget_id) {
                nav.tabs[index].count = count;
                nav.update_hidden(index);
            }
        }
        nav
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.as_deref().and_then(|id| self.find(id))
    }

    /// Titles offered by the "Add tab" dropdown.
    pub fn hidden_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self
            .hidden
            .iter()
            .filter_map(|id| self.find(id))
            .map(|tab| tab.title.as_str())
            .collect();
        titles.sort_unstable();
        titles
    }

    /// Whether the "Add tab" dropdown offers a tab titled `title`.
    pub fn is_hidden(&self, title: &str) -> bool {
        let title = title.trim();
        self.hidden_titles()
            .iter()
            .any(|hidden| hidden.eq_ignore_ascii_case(title))
    }

    /// Activates the tab with `widget_id`; unknown ids fall back to the
    /// first tab.
    pub fn route(&mut self, widget_id: &str) -> Option<&Tab> {
        let Some(index) = self.position(widget_id) else {
            let first = self.tabs.first()?.id.clone();
            return self.route(&first);
        };
        self.tabs[index].force_show = true;
        self.active = Some(self.tabs[index].id.clone());
        self.update_hidden(index);
        self.tabs.get(index)
    }

    /// Activates the tab addressed by a URL fragment (`...#!control`).
    pub fn route_url(&mut self, url: &str) -> Option<&Tab> {
        let widget_id = url
            .get(src_obj_url(url).len()..)
            .unwrap_or_default()
            .trim_start_matches('#')
            .trim_start_matches('!')
            .to_string();
        self.route(&widget_id)
    }

    pub fn set_count(&mut self, counts_name: &str, count: usize) {
        if let Some(index) = self
            .tabs
            .iter()
            .position(|tab| !tab.counts_name.is_empty() && tab.counts_name == counts_name)
        {
            self.tabs[index].count = count;
            self.update_hidden(index);
        }
    }

    pub fn close_tab(&mut self, widget_id: &str) {
        let Some(index) = self.position(widget_id) else {
            return;
        };
        self.tabs[index].force_show = false;
        if self.active.as_deref() == Some(widget_id) {
            if let Some(first) = self.tabs.first().map(|tab| tab.id.clone()) {
                self.route(&first);
            }
        }
        self.update_hidden(index);
    }

    fn find(&self, widget_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == widget_id)
    }

    fn position(&self, widget_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == widget_id)
    }

    fn update_hidden(&mut self, index: usize) {
        let tab = &self.tabs[index];
        if self.show_all_tabs
            || tab.in_force_show_list
            || tab.is_version
            || tab.uncountable
            || is_prohibited(&self.instance_type, &tab.model)
        {
            return;
        }

        let id = tab.id.clone();
        if tab.count == 0 && !tab.force_show {
            if !self.hidden.contains(&id) {
                self.hidden.push(id);
            }
        } else {
            self.hidden.retain(|hidden| *hidden != id);
        }
    }
}
