#![allow(dead_code)]

use grc_core::model::entity::Entity;
use grc_core::model::object_type::ObjectType;
use grc_core::scope::Scope;
use grc_core::webui::pages::{
    BulkVerifyModal, CustomAttrValues, Dashboard, DropdownLcaFill, ExportPage, FormChanges,
    InfoPage, InfoPanel, InfoWidget, MenuItem, ObjectModal, PageCatalog, TreeView, UnifiedMapper,
};
use grc_core::webui::tabs::TabDescriptor;
use grc_core::webui::{Browser, DriverError, DriverErrorKind, DriverResult, MappingStatus};
use grc_core::WebUiConfig;
use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BASE_URL: &str = "https://grc.test";

pub fn test_config(export_dir: &Path) -> WebUiConfig {
    WebUiConfig {
        base_url: BASE_URL.to_string(),
        wait_timeout: Duration::from_millis(60),
        poll_interval: Duration::from_millis(5),
        export_dir: export_dir.to_path_buf(),
    }
}

pub fn obj_with_url(obj_type: ObjectType, title: &str, id: i64) -> Entity {
    let collection = obj_type.descriptor().collection;
    Entity::with_title(obj_type, title).with_url(format!("{BASE_URL}/{collection}/{id}"))
}

/// Scripted UI that records every call as `surface.method args`.
#[derive(Debug, Default)]
pub struct FakeUi {
    pub calls: Vec<String>,
    pub current_url: String,
    pub alert: Option<String>,
    /// Alert shown after this many `alert_text` reads.
    pub alert_after_reads: usize,
    alert_reads: usize,
    pub visible: BTreeSet<String>,

    pub member_count: usize,
    pub tree_rows: Vec<Scope>,
    pub item_menu: Vec<MenuItem>,
    pub fail_select_member: Option<DriverError>,

    pub info_scope: Scope,
    pub panel_scope: Scope,
    /// Successive `status()` values; the last one repeats.
    pub statuses: VecDeque<String>,
    pub three_bbs: Vec<MenuItem>,
    pub related_titles: Vec<String>,
    pub related_issue_rows: Vec<Scope>,
    pub related_snapshot_rows: Vec<Scope>,
    pub review_text: String,
    pub has_inline_edit: bool,

    pub has_latest_version_link: bool,
    pub success_message_shown: bool,

    pub mapper_rows: Vec<Scope>,
    pub mapper_statuses: Vec<MappingStatus>,
    pub mapper_aliases: Vec<String>,
    pub add_widget_aliases: Vec<String>,

    /// Page the browser lands on after a clone is confirmed.
    pub clone_redirect: Option<String>,

    pub export_csv: String,
    pub dashboard_tab_exists: bool,
    /// Tab bar of the opened info page with displayed counters.
    pub inner_nav: Vec<(TabDescriptor, usize)>,
    pub dashboard_items: Vec<(String, String)>,
    pub dashboard_content: String,
    pub bulk_rows: Vec<Scope>,
}

impl FakeUi {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|call| call.starts_with(prefix)).count()
    }

    pub fn has_call(&self, call: &str) -> bool {
        self.calls.iter().any(|recorded| recorded == call)
    }
}

impl Browser for FakeUi {
    fn open_url(&mut self, url: &str) -> DriverResult<()> {
        self.record(format!("browser.open_url {url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    fn open_url_via_js(&mut self, url: &str) -> DriverResult<()> {
        self.record(format!("browser.open_url_via_js {url}"));
        self.current_url = url.to_string();
        Ok(())
    }

    fn refresh(&mut self) -> DriverResult<()> {
        self.record("browser.refresh");
        Ok(())
    }

    fn current_url(&mut self) -> DriverResult<String> {
        Ok(self.current_url.clone())
    }

    fn alert_text(&mut self) -> DriverResult<Option<String>> {
        self.alert_reads += 1;
        if self.alert_reads > self.alert_after_reads {
            Ok(self.alert.clone())
        } else {
            Ok(None)
        }
    }

    fn is_element_visible(&mut self, css: &str) -> DriverResult<bool> {
        Ok(self.visible.contains(css))
    }

    fn wait_for_js(&mut self) -> DriverResult<()> {
        self.record("browser.wait_for_js");
        Ok(())
    }
}

impl TreeView for FakeUi {
    fn member_count(&mut self) -> DriverResult<usize> {
        Ok(self.member_count)
    }

    fn open_create(&mut self) -> DriverResult<()> {
        self.record("tree.open_create");
        Ok(())
    }

    fn set_visible_fields(&mut self) -> DriverResult<()> {
        self.record("tree.set_visible_fields");
        Ok(())
    }

    fn list_scopes(&mut self) -> DriverResult<Vec<Scope>> {
        Ok(self.tree_rows.clone())
    }

    fn filter(&mut self, query: &str) -> DriverResult<()> {
        self.record(format!("tree.filter {query}"));
        Ok(())
    }

    fn select_member_by_title(&mut self, title: &str) -> DriverResult<()> {
        if let Some(err) = self.fail_select_member.clone() {
            return Err(err);
        }
        self.record(format!("tree.select_member {title}"));
        Ok(())
    }

    fn item_menu(&mut self, _title: &str) -> DriverResult<Vec<MenuItem>> {
        Ok(self.item_menu.clone())
    }

    fn choose_item_menu(&mut self, title: &str, item: MenuItem) -> DriverResult<()> {
        self.record(format!("tree.choose_item_menu {title} {}", item.label()));
        Ok(())
    }

    fn open_map(&mut self) -> DriverResult<()> {
        self.record("tree.open_map");
        Ok(())
    }

    fn choose_three_bbs(&mut self, item: MenuItem) -> DriverResult<()> {
        self.record(format!("tree.three_bbs {}", item.label()));
        Ok(())
    }

    fn generate_asmts(
        &mut self,
        template_title: Option<&str>,
        objs_under_asmt_titles: &[String],
    ) -> DriverResult<()> {
        self.record(format!(
            "tree.generate_asmts {} {}",
            template_title.unwrap_or("-"),
            objs_under_asmt_titles.join("|")
        ));
        Ok(())
    }

    fn show_generated_results(&mut self) -> DriverResult<()> {
        self.record("tree.show_generated_results");
        Ok(())
    }

    fn wait_loading_after_actions(&mut self) -> DriverResult<()> {
        self.record("tree.wait_loading_after_actions");
        Ok(())
    }
}

impl InfoWidget for FakeUi {
    fn scope(&mut self) -> DriverResult<Scope> {
        let from_panel = self
            .calls
            .last()
            .is_some_and(|call| call.starts_with("tree.select_member"));
        Ok(if from_panel {
            self.panel_scope.clone()
        } else {
            self.info_scope.clone()
        })
    }

    fn status(&mut self) -> DriverResult<String> {
        if self.statuses.len() > 1 {
            Ok(self.statuses.pop_front().unwrap_or_default())
        } else {
            Ok(self.statuses.front().cloned().unwrap_or_default())
        }
    }

    fn three_bbs_items(&mut self) -> DriverResult<Vec<MenuItem>> {
        Ok(self.three_bbs.clone())
    }

    fn choose_three_bbs(&mut self, item: MenuItem) -> DriverResult<()> {
        self.record(format!("info.three_bbs {}", item.label()));
        Ok(())
    }
}

impl InfoPage for FakeUi {
    fn related_asmts_titles_via_modal(&mut self, asmt_type: &str) -> DriverResult<Vec<String>> {
        self.record(format!("info.related_asmts_modal {asmt_type}"));
        Ok(self.related_titles.clone())
    }

    fn related_asmts_titles_via_tab(&mut self, asmt_type: &str) -> DriverResult<Vec<String>> {
        self.record(format!("info.related_asmts_tab {asmt_type}"));
        Ok(self.related_titles.clone())
    }

    fn related_issues_scopes(&mut self) -> DriverResult<Vec<Scope>> {
        Ok(self.related_issue_rows.clone())
    }

    fn raise_issue(&mut self, issue: &Entity) -> DriverResult<()> {
        self.record(format!("info.raise_issue {}", issue.title_or_empty()));
        Ok(())
    }

    fn fill_local_cas(&mut self, values: &CustomAttrValues) -> DriverResult<()> {
        self.record(format!("info.fill_local_cas {}", values.len()));
        Ok(())
    }

    fn fill_global_cas_in_popup(&mut self, values: &CustomAttrValues) -> DriverResult<()> {
        self.record(format!("info.fill_global_cas_in_popup {}", values.len()));
        Ok(())
    }

    fn fill_global_cas_inline(&mut self, values: &CustomAttrValues) -> DriverResult<()> {
        self.record(format!("info.fill_global_cas_inline {}", values.len()));
        Ok(())
    }

    fn has_ca_inline_edit(&mut self, _ca_title: &str) -> DriverResult<bool> {
        Ok(self.has_inline_edit)
    }

    fn choose_and_fill_dropdown_lca(
        &mut self,
        dropdown_title: &str,
        fill: &DropdownLcaFill,
    ) -> DriverResult<()> {
        self.record(format!("info.dropdown_lca {dropdown_title}={}", fill.value));
        Ok(())
    }

    fn submit_for_review(&mut self, user_email: &str, _comment: &str) -> DriverResult<()> {
        self.record(format!("info.submit_for_review {user_email}"));
        Ok(())
    }

    fn click_approve_review(&mut self) -> DriverResult<()> {
        self.record("info.approve_review");
        Ok(())
    }

    fn click_undo_review(&mut self) -> DriverResult<()> {
        self.record("info.undo_review");
        Ok(())
    }

    fn review_text(&mut self) -> DriverResult<String> {
        Ok(self.review_text.clone())
    }

    fn inner_nav_tabs(&mut self) -> DriverResult<Vec<(TabDescriptor, usize)>> {
        Ok(self.inner_nav.clone())
    }

    fn add_tab(&mut self, tab_name: &str) -> DriverResult<()> {
        self.record(format!("info.add_tab {tab_name}"));
        Ok(())
    }

    fn click_complete(&mut self) -> DriverResult<()> {
        self.record("info.complete");
        Ok(())
    }

    fn click_verify(&mut self) -> DriverResult<()> {
        self.record("info.verify");
        Ok(())
    }

    fn click_needs_rework(&mut self) -> DriverResult<()> {
        self.record("info.needs_rework");
        Ok(())
    }

    fn wait_save(&mut self) -> DriverResult<()> {
        self.record("info.wait_save");
        Ok(())
    }

    fn edit_answers(&mut self) -> DriverResult<()> {
        self.record("info.edit_answers");
        Ok(())
    }

    fn add_evidence_url(&mut self, url: &str) -> DriverResult<()> {
        self.record(format!("info.add_evidence_url {url}"));
        Ok(())
    }

    fn add_primary_contact(&mut self, person: &str) -> DriverResult<()> {
        self.record(format!("info.add_primary_contact {person}"));
        Ok(())
    }

    fn add_assignee(&mut self, person: &str) -> DriverResult<()> {
        self.record(format!("info.add_assignee {person}"));
        Ok(())
    }

    fn related_snapshot_scopes(
        &mut self,
        control_title: &str,
        obj_type: ObjectType,
    ) -> DriverResult<Vec<Scope>> {
        self.record(format!("info.related_snapshots {control_title} {obj_type}"));
        Ok(self.related_snapshot_rows.clone())
    }

    fn confirm_clone(&mut self, include_templates: bool) -> DriverResult<()> {
        self.record(format!("info.confirm_clone {include_templates}"));
        if let Some(url) = self.clone_redirect.clone() {
            self.current_url = url;
        }
        Ok(())
    }

    fn confirm_update_objs(&mut self) -> DriverResult<()> {
        self.record("info.confirm_update_objs");
        Ok(())
    }
}

impl InfoPanel for FakeUi {
    fn has_get_latest_version_link(&mut self) -> DriverResult<bool> {
        Ok(self.has_latest_version_link)
    }

    fn get_latest_version(&mut self) -> DriverResult<()> {
        self.record("panel.get_latest_version");
        Ok(())
    }

    fn is_success_updating_message_shown(&mut self) -> DriverResult<bool> {
        Ok(self.success_message_shown)
    }

    fn add_comments(&mut self, descriptions: &[String]) -> DriverResult<()> {
        self.record(format!("panel.add_comments {}", descriptions.len()));
        Ok(())
    }
}

impl UnifiedMapper for FakeUi {
    fn set_visible_fields(&mut self) -> DriverResult<()> {
        self.record("mapper.set_visible_fields");
        Ok(())
    }

    fn search(&mut self, dest_type: &str, titles: &[String]) -> DriverResult<Vec<Scope>> {
        self.record(format!("mapper.search {dest_type} {}", titles.join("|")));
        Ok(self.mapper_rows.clone())
    }

    fn mapping_statuses(&mut self) -> DriverResult<Vec<MappingStatus>> {
        Ok(self.mapper_statuses.clone())
    }

    fn map(&mut self, dest_type: &str, titles: &[String]) -> DriverResult<()> {
        self.record(format!("mapper.map {dest_type} {}", titles.join("|")));
        Ok(())
    }

    fn available_obj_aliases(&mut self) -> DriverResult<Vec<String>> {
        Ok(self.mapper_aliases.clone())
    }

    fn close(&mut self) -> DriverResult<()> {
        self.record("mapper.close");
        Ok(())
    }
}

impl ObjectModal for FakeUi {
    fn submit(&mut self, obj: &Entity) -> DriverResult<()> {
        self.record(format!("modal.submit {} {}", obj.obj_type, obj.title_or_empty()));
        Ok(())
    }

    fn fill_form(&mut self, changes: &FormChanges) -> DriverResult<()> {
        let fields: Vec<String> = changes
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect();
        self.record(format!("modal.fill_form {}", fields.join(",")));
        Ok(())
    }

    fn map_objects(&mut self, objs: &[Entity]) -> DriverResult<()> {
        self.record(format!("modal.map_objects {}", objs.len()));
        Ok(())
    }

    fn save_and_close(&mut self) -> DriverResult<()> {
        self.record("modal.save_and_close");
        Ok(())
    }
}

impl ExportPage for FakeUi {
    fn open(&mut self) -> DriverResult<()> {
        self.record("export.open");
        Ok(())
    }

    fn download_csv(&mut self, dir: &Path) -> DriverResult<PathBuf> {
        let path = dir.join("export.csv");
        std::fs::write(&path, &self.export_csv)
            .map_err(|err| DriverError::new(DriverErrorKind::Other, err.to_string()))?;
        self.record("export.download_csv");
        Ok(path)
    }
}

impl Dashboard for FakeUi {
    fn open_lhn(&mut self) -> DriverResult<()> {
        self.record("lhn.open");
        Ok(())
    }

    fn expand_lhn_section(&mut self, section: &str) -> DriverResult<()> {
        self.record(format!("lhn.expand {section}"));
        Ok(())
    }

    fn select_lhn_accordion(&mut self, plural_title: &str) -> DriverResult<()> {
        self.record(format!("lhn.select {plural_title}"));
        Ok(())
    }

    fn lhn_create_new(&mut self) -> DriverResult<()> {
        self.record("lhn.create_new");
        Ok(())
    }

    fn mappable_via_add_widget_aliases(&mut self) -> DriverResult<Vec<String>> {
        Ok(self.add_widget_aliases.clone())
    }

    fn is_dashboard_tab_exist(&mut self) -> DriverResult<bool> {
        Ok(self.dashboard_tab_exists)
    }

    fn dashboard_tab_items(&mut self) -> DriverResult<Vec<(String, String)>> {
        Ok(self.dashboard_items.clone())
    }

    fn dashboard_tab_content(&mut self) -> DriverResult<String> {
        Ok(self.dashboard_content.clone())
    }

    fn select_all_statuses(&mut self) -> DriverResult<()> {
        self.record("dashboard.select_all_statuses");
        Ok(())
    }
}

impl BulkVerifyModal for FakeUi {
    fn assessment_scopes(&mut self, with_second_tier_info: bool) -> DriverResult<Vec<Scope>> {
        self.record(format!("bulk_verify.scopes {with_second_tier_info}"));
        Ok(self.bulk_rows.clone())
    }
}

impl PageCatalog for FakeUi {
    fn browser(&mut self) -> &mut dyn Browser {
        self
    }

    fn tree_view(&mut self, _obj_type: ObjectType, _is_versions_widget: bool) -> &mut dyn TreeView {
        self
    }

    fn info_page(&mut self, _obj_type: ObjectType) -> &mut dyn InfoPage {
        self
    }

    fn info_panel(&mut self, _obj_type: ObjectType) -> &mut dyn InfoPanel {
        self
    }

    fn unified_mapper(&mut self) -> &mut dyn UnifiedMapper {
        self
    }

    fn object_modal(&mut self, _obj_type: ObjectType) -> &mut dyn ObjectModal {
        self
    }

    fn export_page(&mut self) -> &mut dyn ExportPage {
        self
    }

    fn dashboard(&mut self) -> &mut dyn Dashboard {
        self
    }

    fn bulk_verify_modal(&mut self) -> &mut dyn BulkVerifyModal {
        self
    }
}

pub fn tab(widget_id: &str, title: &str, model: &str) -> TabDescriptor {
    TabDescriptor {
        widget_id: widget_id.to_string(),
        title: title.to_string(),
        order: 10,
        model: model.to_string(),
        uncountable: false,
        counts_name: None,
    }
}
