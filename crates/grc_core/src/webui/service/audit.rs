//! Audit-only scenarios.
//!
//! # Responsibility
//! - Clone audits and bulk-update their snapshots from the info page.
//!
//! # Invariants
//! - Services of any other type fail with `WebUiError::UnsupportedOperation`.

use super::WebUiService;
use crate::model::entity::Entity;
use crate::model::object_type::ObjectType;
use crate::webui::error::WebUiResult;
use crate::webui::pages::{MenuItem, PageCatalog};
use crate::webui::url::src_obj_url;
use log::info;

impl<P: PageCatalog> WebUiService<P> {
    fn ensure_audit(&self, operation: &'static str) -> WebUiResult<()> {
        self.ensure_supported(operation, self.obj_type == ObjectType::Audit)
    }

    /// Clones the audit with its assessment templates and reads the clone
    /// from its info page.
    pub fn clone_via_info_page_and_get_obj(&mut self, audit: &Entity) -> WebUiResult<Entity> {
        self.ensure_audit("clone_via_info_page_and_get_obj")?;
        let info_page = self.open_info_page_of_obj(audit)?;
        info_page.choose_three_bbs(MenuItem::Clone)?;
        info_page.confirm_clone(true)?;

        let current_url = self.pages.browser().current_url()?;
        let cloned_url = src_obj_url(&current_url).to_string();
        info!("event=audit_clone module=webui status=ok cloned_url={cloned_url}");
        let cloned = Entity::empty(ObjectType::Audit).with_url(cloned_url.as_str());
        let mut actual = self.get_obj_from_info_page(&cloned)?;
        self.refresh()?;
        actual.url = Some(cloned_url);
        Ok(actual)
    }

    /// Updates every snapshot of the audit to its latest version.
    pub fn bulk_update_via_info_page(&mut self, audit: &Entity) -> WebUiResult<()> {
        self.ensure_audit("bulk_update_via_info_page")?;
        let info_page = self.open_info_page_of_obj(audit)?;
        info_page.choose_three_bbs(MenuItem::UpdateObjs)?;
        info_page.confirm_update_objs()?;
        Ok(())
    }
}
