//! Review workflow and custom attribute edits.
//!
//! # Responsibility
//! - Submit, approve and undo reviews from an info page.
//! - Fill global and local custom attributes in popups or inline.

use super::WebUiService;
use crate::model::entity::Entity;
use crate::model::object_type::ObjectType;
use crate::webui::error::WebUiResult;
use crate::webui::pages::{CustomAttrValues, PageCatalog};
use crate::webui::wait::wait_for;

/// Flash message shown once a review is approved.
pub const REVIEW_COMPLETE_ALERT: &str = "Review is complete.";

impl<P: PageCatalog> WebUiService<P> {
    pub fn submit_for_review(&mut self, obj: &Entity, user_email: &str, comment: &str) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?
            .submit_for_review(user_email, comment)?;
        Ok(())
    }

    /// Approves the review and waits for the completion alert.
    pub fn approve_review(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?.click_approve_review()?;
        let (timeout, poll) = (self.config.wait_timeout, self.config.poll_interval);
        let browser = self.pages.browser();
        wait_for("review complete alert", timeout, poll, || {
            Ok(browser.alert_text()?.as_deref() == Some(REVIEW_COMPLETE_ALERT))
        })
    }

    pub fn undo_review_approval(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?.click_undo_review()?;
        Ok(())
    }

    /// Review message displayed on the info page.
    pub fn get_obj_review_txt(&mut self, obj: &Entity) -> WebUiResult<String> {
        Ok(self.open_info_page_of_obj(obj)?.review_text()?)
    }

    /// Titles listed in the Related Assessments modal of `obj`.
    pub fn get_obj_related_asmts_titles(&mut self, obj: &Entity) -> WebUiResult<Vec<String>> {
        let asmt_type = obj.obj_type.name();
        Ok(self
            .open_info_page_of_obj(obj)?
            .related_asmts_titles_via_modal(asmt_type)?)
    }

    /// Fills local custom attributes of an assessment.
    pub fn fill_asmt_lcas(&mut self, obj: &Entity, values: &CustomAttrValues) -> WebUiResult<()> {
        self.ensure_supported("fill_asmt_lcas", self.obj_type == ObjectType::Assessment)?;
        self.open_info_page_of_obj(obj)?.fill_local_cas(values)?;
        Ok(())
    }

    pub fn fill_obj_gcas_in_popup(&mut self, obj: &Entity, values: &CustomAttrValues) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?
            .fill_global_cas_in_popup(values)?;
        Ok(())
    }

    pub fn fill_obj_gcas_inline(&mut self, obj: &Entity, values: &CustomAttrValues) -> WebUiResult<()> {
        self.open_info_page_of_obj(obj)?
            .fill_global_cas_inline(values)?;
        Ok(())
    }

    /// Whether the inline editor of `ca_title` is open.
    pub fn has_gca_inline_edit(&mut self, obj: &Entity, ca_title: &str) -> WebUiResult<bool> {
        Ok(self.open_info_page_of_obj(obj)?.has_ca_inline_edit(ca_title)?)
    }
}
