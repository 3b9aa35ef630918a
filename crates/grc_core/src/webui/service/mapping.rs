//! Mapping scenarios driven through the unified mapper and tree views.
//!
//! # Responsibility
//! - Open, search and close the unified mapper of a source object.
//! - Map and unmap destination objects from tree views and info panels.
//!
//! # Invariants
//! - At most one mapper handle is live, bound to the page it was opened on.

use super::{obj_url, scope_title, titles_of, WebUiService};
use crate::model::entity::Entity;
use crate::scope::Scope;
use crate::webui::driver::DriverError;
use crate::webui::error::WebUiResult;
use crate::webui::mapper::{MappingStatus, UnifiedMapperHandle};
use crate::webui::pages::{MenuItem, PageCatalog, UnifiedMapper};
use log::{debug, info};

impl<P: PageCatalog> WebUiService<P> {
    /// Returns the unified mapper of the source object's widget, opening it
    /// when it is closed or bound to another page.
    pub fn open_unified_mapper(&mut self, src_obj: &Entity) -> WebUiResult<&mut dyn UnifiedMapper> {
        let src_url = obj_url(src_obj)?.to_string();
        let is_open = self
            .unified_mapper
            .as_ref()
            .is_some_and(|handle| handle.is_bound_to(&src_url));
        if !is_open {
            self.open_widget_of_mapped_objs(src_obj)?.open_map()?;
            self.unified_mapper = Some(UnifiedMapperHandle::opened_from(src_url.as_str()));
            info!(
                "event=unified_mapper_open module=webui status=ok obj_type={} src_url={src_url}",
                self.obj_type
            );
        }
        Ok(self.pages.unified_mapper())
    }

    /// Closes the unified mapper; a no-op when it is already closed.
    pub fn close_unified_mapper(&mut self) -> WebUiResult<()> {
        if let Some(handle) = self.unified_mapper.take() {
            self.pages.unified_mapper().close()?;
            info!(
                "event=unified_mapper_close module=webui status=ok obj_type={} src_url={}",
                self.obj_type, handle.src_url
            );
        }
        Ok(())
    }

    /// Searches `dest_objs` by title in the unified mapper.
    ///
    /// Returns the result rows and one mapping status per searched title.
    pub fn search_objs_via_tree_view(
        &mut self,
        src_obj: &Entity,
        dest_objs: &[Entity],
    ) -> WebUiResult<(Vec<Scope>, Vec<MappingStatus>)> {
        let Some(dest_type) = dest_objs.first().map(|obj| obj.obj_type.name()) else {
            return Ok((Vec::new(), Vec::new()));
        };
        let titles = titles_of(dest_objs);
        let mapper = self.open_unified_mapper(src_obj)?;
        let scopes = mapper.search(dest_type, &titles)?;
        let statuses = mapper.mapping_statuses()?;
        if let Some(handle) = self.unified_mapper.as_mut() {
            handle.mark_searched();
        }
        Ok((scopes, statuses))
    }

    /// Reads `dest_objs` from the unified mapper results and closes it.
    pub fn get_list_objs_from_mapper(
        &mut self,
        src_obj: &Entity,
        dest_objs: &[Entity],
    ) -> WebUiResult<(Vec<Entity>, Vec<MappingStatus>)> {
        self.open_unified_mapper(src_obj)?.set_visible_fields()?;
        let (mut scopes, statuses) = self.search_objs_via_tree_view(src_obj, dest_objs)?;
        self.close_unified_mapper()?;
        for scope in &mut scopes {
            self.add_review_status_if_not_in_control_scope(scope);
        }
        Ok((self.create_list_objs(&scopes)?, statuses))
    }

    /// Maps `dest_objs` to the source object from its widget, then reloads
    /// the page.
    pub fn map_objs_via_tree_view(&mut self, src_obj: &Entity, dest_objs: &[Entity]) -> WebUiResult<()> {
        let Some(dest_type) = dest_objs.first().map(|obj| obj.obj_type.name()) else {
            debug!("event=webui_map module=webui status=ok mapped=0");
            return Ok(());
        };
        let titles = titles_of(dest_objs);
        self.open_widget_of_mapped_objs(src_obj)?.open_map()?;
        self.pages.unified_mapper().map(dest_type, &titles)?;
        self.refresh()
    }

    /// Maps `dest_objs` to every object listed on the source widget through
    /// each row's action dropdown.
    pub fn map_objs_via_tree_view_item(&mut self, src_obj: &Entity, dest_objs: &[Entity]) -> WebUiResult<()> {
        let Some(dest_type) = dest_objs.first().map(|obj| obj.obj_type.name()) else {
            return Ok(());
        };
        let titles = titles_of(dest_objs);
        let rows = self.open_widget_of_mapped_objs(src_obj)?.list_scopes()?;
        for row in &rows {
            let row_title = scope_title(row).unwrap_or_default();
            self.pages
                .tree_view(self.obj_type, self.is_versions_widget)
                .choose_item_menu(row_title, MenuItem::Map)?;
            self.pages.unified_mapper().map(dest_type, &titles)?;
        }
        Ok(())
    }

    pub fn unmap_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<()> {
        self.open_info_panel_of_mapped_obj(src_obj, obj)?
            .choose_three_bbs(MenuItem::Unmap)?;
        Ok(())
    }

    /// Sorted entries of the mapper's "object types" dropdown, opened from
    /// the first row of the source widget.
    pub fn get_objs_available_to_map_via_mapper(&mut self, src_obj: &Entity) -> WebUiResult<Vec<String>> {
        let tree_view = self.open_widget_of_mapped_objs(src_obj)?;
        let rows = tree_view.list_scopes()?;
        let first_title = rows
            .first()
            .and_then(scope_title)
            .ok_or_else(|| DriverError::element_not_found("first tree view item"))?;
        tree_view.choose_item_menu(first_title, MenuItem::Map)?;
        let mut aliases = self.pages.unified_mapper().available_obj_aliases()?;
        aliases.sort();
        Ok(aliases)
    }

    /// Sorted object names offered by the "Add tab" dropdown of the source
    /// object's page.
    pub fn get_objs_available_to_map_via_add_widget(&mut self, src_obj: &Entity) -> WebUiResult<Vec<String>> {
        self.open_info_page_of_obj(src_obj)?;
        let mut aliases = self.pages.dashboard().mappable_via_add_widget_aliases()?;
        aliases.sort();
        Ok(aliases)
    }
}
