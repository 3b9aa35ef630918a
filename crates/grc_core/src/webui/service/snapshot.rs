//! Snapshot version updates.
//!
//! # Responsibility
//! - Update outdated snapshots to their latest version from the info panel.
//!
//! # Invariants
//! - Only types with a versions widget accept these operations.

use super::WebUiService;
use crate::model::entity::Entity;
use crate::webui::error::WebUiResult;
use crate::webui::pages::PageCatalog;
use crate::webui::wait::wait_for;

impl<P: PageCatalog> WebUiService<P> {
    fn ensure_versioned(&self, operation: &'static str) -> WebUiResult<()> {
        self.ensure_supported(operation, self.obj_type.descriptor().versions_widget)
    }

    /// Updates the snapshot of `obj` to its latest version from the info
    /// panel and waits for the widget to reload.
    pub fn update_obj_ver_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<()> {
        self.ensure_versioned("update_obj_ver_via_info_panel")?;
        let panel = self.open_info_panel_of_mapped_obj(src_obj, obj)?;
        panel.get_latest_version()?;
        let (timeout, poll) = (self.config.wait_timeout, self.config.poll_interval);
        let panel = self.pages.info_panel(self.obj_type);
        wait_for("snapshot update message", timeout, poll, || {
            panel.is_success_updating_message_shown()
        })?;
        self.pages
            .tree_view(self.obj_type, self.is_versions_widget)
            .wait_loading_after_actions()?;
        Ok(())
    }

    /// Whether the info panel offers a link to the latest version.
    pub fn is_obj_updateble_via_info_panel(&mut self, src_obj: &Entity, obj: &Entity) -> WebUiResult<bool> {
        self.ensure_versioned("is_obj_updateble_via_info_panel")?;
        Ok(self
            .open_info_panel_of_mapped_obj(src_obj, obj)?
            .has_get_latest_version_link()?)
    }
}
