//! Web-UI service parameterized by object type.
//!
//! # Responsibility
//! - Sequence page-object calls for create, edit, read, map and verify
//!   scenarios of one object type.
//! - Turn scraped scopes into entities through `create_list_objs`.
//!
//! # Invariants
//! - The service exclusively owns its page catalog (one browser session).
//! - Every navigation drops the unified mapper handle.
//! - Browser failures propagate unchanged; nothing is retried.
//!
//! Type-specific operations live in sibling modules and fail with
//! `WebUiError::UnsupportedOperation` on services of other types.

mod assessment;
mod audit;
mod mapping;
mod review;
mod snapshot;

pub use review::REVIEW_COMPLETE_ALERT;

use crate::config::WebUiConfig;
use crate::model::entity::Entity;
use crate::model::object_type::ObjectType;
use crate::scope::csv_export::{first_block_scopes, read_export_csv, CsvScopes};
use crate::scope::{self, Scope, ScopeValue};
use crate::webui::driver::DriverError;
use crate::webui::error::{WebUiError, WebUiResult};
use crate::webui::mapper::UnifiedMapperHandle;
use crate::webui::pages::{Dashboard, FormChanges, InfoPage, InfoPanel, MenuItem, PageCatalog, TreeView};
use crate::webui::tabs::{is_prohibited, InnerNav};
use crate::webui::url::{widget_of_mapped_objs, UrlTemplate, Urls, INFO_WIDGET};
use log::info;
use std::path::{Path, PathBuf};

/// Review state shown for controls that were never reviewed.
pub const UNREVIEWED: &str = "Unreviewed";
/// Prefix added to titles by `edit_obj_via_edit_modal_from_info_page`.
pub const EDITED_TITLE_PREFIX: &str = "[EDITED]";

const REVIEW_STATUS_KEY: &str = "REVIEW_STATUS";
const REVIEW_STATUS_DISPLAY_NAME_KEY: &str = "REVIEW_STATUS_DISPLAY_NAME";

/// Browser-driven operations on objects of one type.
pub struct WebUiService<P: PageCatalog> {
    pages: P,
    obj_type: ObjectType,
    is_versions_widget: bool,
    config: WebUiConfig,
    urls: Urls,
    url_mapped_objs: UrlTemplate,
    url_obj_info_page: UrlTemplate,
    unified_mapper: Option<UnifiedMapperHandle>,
}

impl<P: PageCatalog> WebUiService<P> {
    pub fn new(pages: P, obj_type: ObjectType, config: WebUiConfig) -> Self {
        Self::build(pages, obj_type, false, config)
    }

    /// Service reading mapped objects from the type's versions widget.
    ///
    /// Fails for types without a versions widget.
    pub fn with_versions_widget(
        pages: P,
        obj_type: ObjectType,
        config: WebUiConfig,
    ) -> WebUiResult<Self> {
        if !obj_type.descriptor().versions_widget {
            return Err(WebUiError::UnsupportedOperation {
                operation: "versions_widget",
                obj_type,
            });
        }
        Ok(Self::build(pages, obj_type, true, config))
    }

    fn build(pages: P, obj_type: ObjectType, is_versions_widget: bool, config: WebUiConfig) -> Self {
        let config = config.normalized();
        Self {
            urls: Urls::new(&config.base_url),
            url_mapped_objs: UrlTemplate::with_fragment(widget_of_mapped_objs(
                obj_type,
                is_versions_widget,
            )),
            url_obj_info_page: UrlTemplate::with_fragment(INFO_WIDGET),
            pages,
            obj_type,
            is_versions_widget,
            config,
            unified_mapper: None,
        }
    }

    pub fn obj_type(&self) -> ObjectType {
        self.obj_type
    }

    pub fn is_versions_widget(&self) -> bool {
        self.is_versions_widget
    }

    pub fn urls(&self) -> &Urls {
        &self.urls
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    /// Currently open unified mapper, `None` when closed.
    pub fn unified_mapper(&self) -> Option<&UnifiedMapperHandle> {
        self.unified_mapper.as_ref()
    }

    fn ensure_supported(&self, operation: &'static str, supported: bool) -> WebUiResult<()> {
        if supported {
            Ok(())
        } else {
            Err(WebUiError::UnsupportedOperation {
                operation,
                obj_type: self.obj_type,
            })
        }
    }

    fn open_url(&mut self, url: &str, via_js: bool) -> WebUiResult<()> {
        self.unified_mapper = None;
        info!(
            "event=webui_open_url module=webui status=start obj_type={} via_js={via_js} url={url}",
            self.obj_type
        );
        let browser = self.pages.browser();
        if via_js {
            browser.open_url_via_js(url)?;
        } else {
            browser.open_url(url)?;
        }
        Ok(())
    }

    fn refresh(&mut self) -> WebUiResult<()> {
        self.unified_mapper = None;
        self.pages.browser().refresh()?;
        Ok(())
    }

    // ---- normalization ----

    /// Builds entities of the service type from raw scopes.
    pub fn create_list_objs(&self, scopes: &[Scope]) -> WebUiResult<Vec<Entity>> {
        Ok(scope::create_list_objs(self.obj_type, scopes)?)
    }

    fn create_obj(&self, scope: Scope) -> WebUiResult<Entity> {
        let mut objs = self.create_list_objs(&[scope])?;
        objs.pop()
            .ok_or_else(|| WebUiError::from(DriverError::element_not_found("object scope")))
    }

    /// Builds an entity from the currently opened info page.
    pub fn build_obj_from_page(&mut self) -> WebUiResult<Entity> {
        let scope = self.pages.info_page(self.obj_type).scope()?;
        self.create_obj(scope)
    }

    /// Builds entities from exported CSV blocks.
    ///
    /// The first block must declare the service type, plain or as snapshot;
    /// otherwise the call fails with a format error carrying the payload.
    pub fn build_objs_from_csv_scopes(&self, csv_scopes: &CsvScopes) -> WebUiResult<Vec<Entity>> {
        let Some(scopes) = first_block_scopes(self.obj_type, csv_scopes) else {
            return Err(WebUiError::CsvFormat {
                expected: self.obj_type,
                payload: format!("{csv_scopes:?}"),
            });
        };
        self.create_list_objs(&scopes)
    }

    /// Controls read from tree views and panels lack review columns; they
    /// are reported as unreviewed.
    pub fn add_review_status_if_not_in_control_scope(&self, scope: &mut Scope) {
        if self.obj_type != ObjectType::Control
            || scope.contains_key(REVIEW_STATUS_KEY)
            || scope.contains_key(REVIEW_STATUS_DISPLAY_NAME_KEY)
        {
            return;
        }
        scope.insert(REVIEW_STATUS_KEY.to_string(), UNREVIEWED.into());
        scope.insert(REVIEW_STATUS_DISPLAY_NAME_KEY.to_string(), UNREVIEWED.into());
    }

    // ---- navigation ----

    /// Opens the widget of mapped objects on the source object's page.
    pub fn open_widget_of_mapped_objs(&mut self, src_obj: &Entity) -> WebUiResult<&mut dyn TreeView> {
        let url = self.url_mapped_objs.render(obj_url(src_obj)?);
        self.open_url(&url, true)?;
        Ok(self.pages.tree_view(self.obj_type, self.is_versions_widget))
    }

    /// Opens the dashboard tab listing every object of the service type.
    pub fn open_obj_dashboard_tab(&mut self) -> WebUiResult<&mut dyn TreeView> {
        let url = self.urls.dashboard_objs_tab(self.obj_type);
        self.open_url(&url, false)?;
        Ok(self.pages.tree_view(self.obj_type, false))
    }

    pub fn open_info_page_of_obj(&mut self, obj: &Entity) -> WebUiResult<&mut dyn InfoPage> {
        let url = self.url_obj_info_page.render(obj_url(obj)?);
        self.open_url(&url, false)?;
        Ok(self.pages.info_page(self.obj_type))
    }

    /// Opens the info panel of `obj` from the source object's widget.
    pub fn open_info_panel_of_mapped_obj(
        &mut self,
        src_obj: &Entity,
        obj: &Entity,
    ) -> WebUiResult<&mut dyn InfoPanel> {
        self.open_widget_of_mapped_objs(src_obj)?
            .select_member_by_title(obj.title_or_empty())?;
        Ok(self.pages.info_panel(self.obj_type))
    }

    /// Opens the LHN on the dashboard and selects the accordion of
    /// `obj_type`, expanding its section first when needed.
    pub fn get_lhn_accordion(&mut self, obj_type: ObjectType) -> WebUiResult<&mut dyn Dashboard> {
        let url = self.urls.dashboard();
        self.open_url(&url, false)?;
        let descriptor = obj_type.descriptor();
        let dashboard = self.pages.dashboard();
        dashboard.open_lhn()?;
        if let Some(section) = descriptor.lhn_section {
            dashboard.expand_lhn_section(section.label())?;
        }
        dashboard.select_lhn_accordion(descriptor.plural_title)?;
        Ok(dashboard)
    }

    // ---- create / edit ----

    pub fn submit_obj_modal(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.pages.object_modal(obj.obj_type).submit(obj)?;
        Ok(())
    }

    /// Creates `obj` from the LHN and reads the created object back.
    pub fn create_obj_and_get_obj(&mut self, obj: &Entity) -> WebUiResult<Entity> {
        self.get_lhn_accordion(obj.obj_type)?.lhn_create_new()?;
        self.submit_obj_modal(obj)?;
        self.build_obj_from_page()
    }

    pub fn create_obj_via_tree_view(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<()> {
        self.open_widget_of_mapped_objs(src_obj)?.open_create()?;
        self.submit_obj_modal(obj)
    }

    /// Applies `changes` through the edit modal of `obj`.
    pub fn edit_obj(&mut self, obj: &Entity, changes: &FormChanges) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?
            .choose_three_bbs(MenuItem::Edit)?;
        let modal = self.pages.object_modal(obj.obj_type);
        modal.fill_form(changes)?;
        modal.save_and_close()?;
        Ok(())
    }

    /// Prefixes the title of `obj` with `[EDITED]` through the edit modal.
    pub fn edit_obj_via_edit_modal_from_info_page(
        &mut self,
        obj: &Entity,
    ) -> WebUiResult<&mut dyn InfoPage> {
        let mut changes = FormChanges::new();
        changes.insert(
            "title".to_string(),
            format!("{EDITED_TITLE_PREFIX}{}", obj.title_or_empty()),
        );
        self.edit_obj(obj, &changes)?;
        Ok(self.pages.info_page(self.obj_type))
    }

    // ---- read ----

    /// Shows every field on the source object's widget.
    pub fn set_list_objs_scopes_representation_on_tree_view(
        &mut self,
        src_obj: &Entity,
    ) -> WebUiResult<()> {
        self.open_widget_of_mapped_objs(src_obj)?
            .set_visible_fields()?;
        Ok(())
    }

    pub fn get_list_objs_scopes_from_tree_view(&mut self, src_obj: &Entity) -> WebUiResult<Vec<Scope>> {
        Ok(self.open_widget_of_mapped_objs(src_obj)?.list_scopes()?)
    }

    pub fn get_list_objs_from_tree_view(&mut self, src_obj: &Entity) -> WebUiResult<Vec<Entity>> {
        self.set_list_objs_scopes_representation_on_tree_view(src_obj)?;
        let mut scopes = self.get_list_objs_scopes_from_tree_view(src_obj)?;
        for scope in &mut scopes {
            self.add_review_status_if_not_in_control_scope(scope);
        }
        self.create_list_objs(&scopes)
    }

    /// Filters the widget with `filter_exp`, then reads it as entities.
    pub fn filter_and_get_list_objs_from_tree_view(
        &mut self,
        src_obj: &Entity,
        filter_exp: &str,
    ) -> WebUiResult<Vec<Entity>> {
        self.open_widget_of_mapped_objs(src_obj)?.filter(filter_exp)?;
        self.get_list_objs_from_tree_view(src_obj)
    }

    pub fn get_count_objs_from_tab(&mut self, src_obj: &Entity) -> WebUiResult<usize> {
        Ok(self.open_widget_of_mapped_objs(src_obj)?.member_count()?)
    }

    pub fn get_scope_from_info_page(&mut self, obj: &Entity) -> WebUiResult<Scope> {
        Ok(self.open_info_page_of_obj(obj)?.scope()?)
    }

    pub fn get_obj_from_info_page(&mut self, obj: &Entity) -> WebUiResult<Entity> {
        self.open_info_page_of_obj(obj)?;
        self.build_obj_from_page()
    }

    pub fn get_scope_from_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<Scope> {
        Ok(self.open_info_panel_of_mapped_obj(src_obj, obj)?.scope()?)
    }

    pub fn get_obj_from_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<Entity> {
        let mut scope = self.get_scope_from_info_panel(src_obj, obj)?;
        self.add_review_status_if_not_in_control_scope(&mut scope);
        self.create_obj(scope)
    }

    /// Reads each of `objs` from its info panel, in order.
    pub fn get_list_objs_from_info_panels(
        &mut self,
        src_obj: &Entity,
        objs: &[Entity],
    ) -> WebUiResult<Vec<Entity>> {
        objs.iter()
            .map(|obj| self.get_obj_from_info_panel(src_obj, obj))
            .collect()
    }

    // ---- capability checks ----

    pub fn is_obj_editable_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<bool> {
        self.info_panel_has_item(src_obj, obj, MenuItem::Edit)
    }

    pub fn is_obj_unmappable_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<bool> {
        self.info_panel_has_item(src_obj, obj, MenuItem::Unmap)
    }

    pub fn is_obj_page_exist_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<bool> {
        self.info_panel_has_item(src_obj, obj, MenuItem::Open)
    }

    fn info_panel_has_item(&mut self, src_obj: &Entity, obj: &Entity, item: MenuItem) -> WebUiResult<bool> {
        let items = self
            .open_info_panel_of_mapped_obj(src_obj, obj)?
            .three_bbs_items()?;
        Ok(items.contains(&item))
    }

    pub fn is_obj_mappable_via_tree_view(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<bool> {
        let items = self
            .open_widget_of_mapped_objs(src_obj)?
            .item_menu(obj.title_or_empty())?;
        Ok(items.contains(&MenuItem::Map))
    }

    /// Checks the Edit entry of the object's row on its dashboard tab.
    pub fn is_obj_editable_via_tree_view(&mut self, obj: &Entity) -> WebUiResult<bool> {
        let items = self.open_obj_dashboard_tab()?.item_menu(obj.title_or_empty())?;
        Ok(items.contains(&MenuItem::Edit))
    }

    pub fn is_dashboard_tab_exist(&mut self, obj: &Entity) -> WebUiResult<bool> {
        self.open_info_page_of_obj(obj)?;
        Ok(self.pages.dashboard().is_dashboard_tab_exist()?)
    }

    // ---- dashboard / tabs ----

    /// `(name, url)` of every item in the object's Dashboard tab.
    pub fn get_items_from_dashboard_widget(&mut self, obj: &Entity) -> WebUiResult<Vec<(String, String)>> {
        self.open_info_page_of_obj(obj)?;
        Ok(self.pages.dashboard().dashboard_tab_items()?)
    }

    pub fn get_dashboard_content(&mut self, obj: &Entity) -> WebUiResult<String> {
        self.open_info_page_of_obj(obj)?;
        Ok(self.pages.dashboard().dashboard_tab_content()?)
    }

    /// Adds a hidden tab to the source object's page through "Add tab".
    ///
    /// Tabs exempt from hiding on the source type are never offered there;
    /// other tabs must be hidden by the page's current tab bar.
    pub fn open_tab_via_add_tab_btn(&mut self, src_obj: &Entity, tab_name: &str) -> WebUiResult<()> {
        let instance_type = src_obj.obj_type.name();
        let tab_model = ObjectType::from_name(tab_name)
            .map(|obj_type| obj_type.name().to_string())
            .unwrap_or_else(|_| tab_name.trim().to_string());
        if is_prohibited(instance_type, &tab_model) {
            return Err(WebUiError::UnsupportedOperation {
                operation: "open_tab_via_add_tab_btn",
                obj_type: src_obj.obj_type,
            });
        }

        let page = self.open_info_page_of_obj(src_obj)?;
        let nav = InnerNav::from_displayed(instance_type, page.inner_nav_tabs()?);
        if !nav.is_hidden(tab_name) {
            return Err(WebUiError::TabNotOffered {
                tab: tab_name.trim().to_string(),
                offered: nav.hidden_titles().into_iter().map(str::to_string).collect(),
            });
        }
        page.add_tab(tab_name)?;
        Ok(())
    }

    // ---- export ----

    /// Exports the objects of the currently opened widget into `dir`.
    ///
    /// Returns the path of the downloaded CSV file.
    pub fn export_objs_via_tree_view(&mut self, dir: &Path) -> WebUiResult<PathBuf> {
        self.pages
            .tree_view(self.obj_type, self.is_versions_widget)
            .choose_three_bbs(MenuItem::Export)?;
        let export_page = self.pages.export_page();
        export_page.open()?;
        let path = export_page.download_csv(dir)?;
        info!(
            "event=csv_build module=webui status=ok obj_type={} path={}",
            self.obj_type,
            path.display()
        );
        Ok(path)
    }

    /// Exports the source object's widget into the configured export
    /// directory and reads the export back as entities.
    pub fn export_and_get_list_objs(&mut self, src_obj: &Entity) -> WebUiResult<Vec<Entity>> {
        self.open_widget_of_mapped_objs(src_obj)?;
        let dir = self.config.export_dir.clone();
        let path = self.export_objs_via_tree_view(&dir)?;
        let csv_scopes = read_export_csv(&path)?;
        self.build_objs_from_csv_scopes(&csv_scopes)
    }
}

fn obj_url(obj: &Entity) -> WebUiResult<&str> {
    obj.url
        .as_deref()
        .ok_or_else(|| WebUiError::MissingObjectUrl {
            obj_type: obj.obj_type,
            title: obj.title_or_empty().to_string(),
        })
}

/// Title text of a tree view row; header lookup ignores case.
fn scope_title(scope: &Scope) -> Option<&str> {
    scope
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("title"))
        .and_then(|(_, value)| match value {
            ScopeValue::Text(text) => Some(text.as_str()),
            _ => None,
        })
}

fn titles_of(objs: &[Entity]) -> Vec<String> {
    objs.iter().map(|obj| obj.title_or_empty().to_string()).collect()
}
