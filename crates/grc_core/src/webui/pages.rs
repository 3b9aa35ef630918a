//! Page-object contracts.
//!
//! # Responsibility
//! - Describe every UI surface the services drive, one trait per surface.
//! - Keep element lookup and clicking inside implementations; services only
//!   sequence calls and interpret returned scopes.
//!
//! # Invariants
//! - Every page object acts on the browser session of the catalog that
//!   handed it out.
//! - Methods returning scopes report the text exactly as displayed.

use crate::model::entity::Entity;
use crate::model::object_type::ObjectType;
use crate::scope::Scope;
use crate::webui::driver::{Browser, DriverResult};
use crate::webui::mapper::MappingStatus;
use crate::webui::tabs::TabDescriptor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Locator of the completed-state badge in the object header.
pub const HEADER_STATE_COMPLETED: &str = ".state-value.state-completed";
/// Locator of the verified icon on the assessment info widget.
pub const ICON_VERIFIED: &str = ".verified-icon";
/// Locator of the global loading spinner.
pub const SPINNER: &str = ".spinner";

/// Entries of the 3-dot menu and of tree-item action dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MenuItem {
    Open,
    Edit,
    Map,
    Unmap,
    Clone,
    UpdateObjs,
    Deprecate,
    Export,
    Generate,
    Delete,
}

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Edit => "Edit",
            Self::Map => "Map",
            Self::Unmap => "Unmap",
            Self::Clone => "Clone",
            Self::UpdateObjs => "Update objects to latest version",
            Self::Deprecate => "Deprecate",
            Self::Export => "Export",
            Self::Generate => "Generate",
            Self::Delete => "Delete",
        }
    }
}

/// Custom attribute values keyed by attribute title.
pub type CustomAttrValues = BTreeMap<String, String>;

/// Field changes for an edit modal, keyed by attribute name.
pub type FormChanges = BTreeMap<String, String>;

/// Value chosen for a dropdown local custom attribute and the extras the
/// chosen option may demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownLcaFill {
    pub value: String,
    pub comment: Option<String>,
    pub evidence_url: Option<String>,
}

/// Generic widget listing objects mapped to a source object.
pub trait TreeView {
    /// Count shown on the widget's tab.
    fn member_count(&mut self) -> DriverResult<usize>;
    fn open_create(&mut self) -> DriverResult<()>;
    /// Opens "Set visible fields" and applies every field.
    fn set_visible_fields(&mut self) -> DriverResult<()>;
    /// Rows as `header -> text` scopes for the currently visible fields.
    fn list_scopes(&mut self) -> DriverResult<Vec<Scope>>;
    fn filter(&mut self, query: &str) -> DriverResult<()>;
    /// Clicks the row with `title`, opening its info panel.
    fn select_member_by_title(&mut self, title: &str) -> DriverResult<()>;
    /// Opens the row's action dropdown and lists its entries.
    fn item_menu(&mut self, title: &str) -> DriverResult<Vec<MenuItem>>;
    fn choose_item_menu(&mut self, title: &str, item: MenuItem) -> DriverResult<()>;
    /// Opens the unified mapper from the widget header.
    fn open_map(&mut self) -> DriverResult<()>;
    fn choose_three_bbs(&mut self, item: MenuItem) -> DriverResult<()>;
    /// Fills and submits the assessment generation modal.
    fn generate_asmts(
        &mut self,
        template_title: Option<&str>,
        objs_under_asmt_titles: &[String],
    ) -> DriverResult<()>;
    fn show_generated_results(&mut self) -> DriverResult<()>;
    fn wait_loading_after_actions(&mut self) -> DriverResult<()>;
}

/// Behavior shared by the info page and the info panel.
pub trait InfoWidget {
    fn scope(&mut self) -> DriverResult<Scope>;
    /// Displayed state, e.g. `Not Started` or `Completed`.
    fn status(&mut self) -> DriverResult<String>;
    fn three_bbs_items(&mut self) -> DriverResult<Vec<MenuItem>>;
    fn choose_three_bbs(&mut self, item: MenuItem) -> DriverResult<()>;
}

/// Full object page.
pub trait InfoPage: InfoWidget {
    /// Opens the Related Assessments modal and reads titles.
    fn related_asmts_titles_via_modal(&mut self, asmt_type: &str) -> DriverResult<Vec<String>>;
    /// Reads titles from the Related Assessments tab.
    fn related_asmts_titles_via_tab(&mut self, asmt_type: &str) -> DriverResult<Vec<String>>;
    fn related_issues_scopes(&mut self) -> DriverResult<Vec<Scope>>;
    fn raise_issue(&mut self, issue: &Entity) -> DriverResult<()>;

    fn fill_local_cas(&mut self, values: &CustomAttrValues) -> DriverResult<()>;
    fn fill_global_cas_in_popup(&mut self, values: &CustomAttrValues) -> DriverResult<()>;
    fn fill_global_cas_inline(&mut self, values: &CustomAttrValues) -> DriverResult<()>;
    fn has_ca_inline_edit(&mut self, ca_title: &str) -> DriverResult<bool>;
    fn choose_and_fill_dropdown_lca(
        &mut self,
        dropdown_title: &str,
        fill: &DropdownLcaFill,
    ) -> DriverResult<()>;

    fn submit_for_review(&mut self, user_email: &str, comment: &str) -> DriverResult<()>;
    fn click_approve_review(&mut self) -> DriverResult<()>;
    fn click_undo_review(&mut self) -> DriverResult<()>;
    fn review_text(&mut self) -> DriverResult<String>;

    /// Tabs registered on the page, each with its displayed counter.
    fn inner_nav_tabs(&mut self) -> DriverResult<Vec<(TabDescriptor, usize)>>;
    fn add_tab(&mut self, tab_name: &str) -> DriverResult<()>;

    fn click_complete(&mut self) -> DriverResult<()>;
    fn click_verify(&mut self) -> DriverResult<()>;
    fn click_needs_rework(&mut self) -> DriverResult<()>;
    /// Blocks until the page reports pending edits as saved.
    fn wait_save(&mut self) -> DriverResult<()>;
    fn edit_answers(&mut self) -> DriverResult<()>;
    fn add_evidence_url(&mut self, url: &str) -> DriverResult<()>;
    fn add_primary_contact(&mut self, person: &str) -> DriverResult<()>;
    fn add_assignee(&mut self, person: &str) -> DriverResult<()>;
    /// Opens the mapped control snapshot and reads its related snapshots
    /// of `obj_type`.
    fn related_snapshot_scopes(
        &mut self,
        control_title: &str,
        obj_type: ObjectType,
    ) -> DriverResult<Vec<Scope>>;

    /// Confirms the clone modal opened from the 3-dot menu.
    fn confirm_clone(&mut self, include_templates: bool) -> DriverResult<()>;
    fn confirm_update_objs(&mut self) -> DriverResult<()>;
}

/// Side panel opened from a tree view row.
pub trait InfoPanel: InfoWidget {
    fn has_get_latest_version_link(&mut self) -> DriverResult<bool>;
    fn get_latest_version(&mut self) -> DriverResult<()>;
    fn is_success_updating_message_shown(&mut self) -> DriverResult<bool>;
    fn add_comments(&mut self, descriptions: &[String]) -> DriverResult<()>;
}

/// Modal for searching and mapping destination objects.
pub trait UnifiedMapper {
    fn set_visible_fields(&mut self) -> DriverResult<()>;
    /// Searches by titles and returns the result rows.
    fn search(&mut self, dest_type: &str, titles: &[String]) -> DriverResult<Vec<Scope>>;
    fn mapping_statuses(&mut self) -> DriverResult<Vec<MappingStatus>>;
    /// Searches by titles, selects every result and confirms mapping.
    fn map(&mut self, dest_type: &str, titles: &[String]) -> DriverResult<()>;
    /// Entries of the "object types" dropdown.
    fn available_obj_aliases(&mut self) -> DriverResult<Vec<String>>;
    fn close(&mut self) -> DriverResult<()>;
}

/// Create/edit modal of an object type.
pub trait ObjectModal {
    /// Fills every set attribute of `obj` and saves.
    fn submit(&mut self, obj: &Entity) -> DriverResult<()>;
    fn fill_form(&mut self, changes: &FormChanges) -> DriverResult<()>;
    fn map_objects(&mut self, objs: &[Entity]) -> DriverResult<()>;
    fn save_and_close(&mut self) -> DriverResult<()>;
}

/// Export page reached from a tree view's 3-dot menu.
pub trait ExportPage {
    fn open(&mut self) -> DriverResult<()>;
    /// Downloads the export into `dir` and returns the file path.
    fn download_csv(&mut self, dir: &Path) -> DriverResult<PathBuf>;
}

/// Dashboard, LHN and the object page header.
pub trait Dashboard {
    fn open_lhn(&mut self) -> DriverResult<()>;
    fn expand_lhn_section(&mut self, section: &str) -> DriverResult<()>;
    fn select_lhn_accordion(&mut self, plural_title: &str) -> DriverResult<()>;
    /// Clicks "Create new" inside the selected accordion.
    fn lhn_create_new(&mut self) -> DriverResult<()>;
    fn mappable_via_add_widget_aliases(&mut self) -> DriverResult<Vec<String>>;
    fn is_dashboard_tab_exist(&mut self) -> DriverResult<bool>;
    /// `(name, url)` of every item inside the Dashboard tab.
    fn dashboard_tab_items(&mut self) -> DriverResult<Vec<(String, String)>>;
    /// Text content of the active Dashboard tab.
    fn dashboard_tab_content(&mut self) -> DriverResult<String>;
    /// My Assessments status filter: select every state.
    fn select_all_statuses(&mut self) -> DriverResult<()>;
}

/// Bulk verify modal opened from My Assessments.
pub trait BulkVerifyModal {
    /// Assessment rows; second tier adds comments, evidence URLs and mapped
    /// objects.
    fn assessment_scopes(&mut self, with_second_tier_info: bool) -> DriverResult<Vec<Scope>>;
}

/// One browser session and the page objects acting on it.
pub trait PageCatalog {
    fn browser(&mut self) -> &mut dyn Browser;
    fn tree_view(&mut self, obj_type: ObjectType, is_versions_widget: bool) -> &mut dyn TreeView;
    fn info_page(&mut self, obj_type: ObjectType) -> &mut dyn InfoPage;
    fn info_panel(&mut self, obj_type: ObjectType) -> &mut dyn InfoPanel;
    fn unified_mapper(&mut self) -> &mut dyn UnifiedMapper;
    fn object_modal(&mut self, obj_type: ObjectType) -> &mut dyn ObjectModal;
    fn export_page(&mut self) -> &mut dyn ExportPage;
    fn dashboard(&mut self) -> &mut dyn Dashboard;
    fn bulk_verify_modal(&mut self) -> &mut dyn BulkVerifyModal;
}
