//! Assessment lifecycle scenarios.
//!
//! # Responsibility
//! - Complete, verify, reject and deprecate assessments.
//! - Add comments, evidence, contacts and related issues.
//! - Read assessments back from dashboards and bulk update modals.

use super::{scope_title, titles_of, WebUiService};
use crate::model::entity::Entity;
use crate::model::object_type::ObjectType;
use crate::webui::error::WebUiResult;
use crate::webui::pages::{
    Dashboard, DropdownLcaFill, InfoPage, MenuItem, PageCatalog, HEADER_STATE_COMPLETED,
    ICON_VERIFIED, SPINNER,
};
use crate::webui::wait::wait_for;

/// Assessment type used when an assessment does not carry one.
const DEFAULT_ASMT_TYPE: &str = "Control";

impl<P: PageCatalog> WebUiService<P> {
    fn ensure_assessment(&self, operation: &'static str) -> WebUiResult<()> {
        self.ensure_supported(operation, self.obj_type == ObjectType::Assessment)
    }

    /// Adds comments to `obj` from its info panel.
    pub fn add_comments(&mut self, src_obj: &Entity, obj: &Entity, descriptions: &[String]) -> WebUiResult<()> {
        self.ensure_assessment("add_comments")?;
        self.open_info_panel_of_mapped_obj(src_obj, obj)?
            .add_comments(descriptions)?;
        Ok(())
    }

    /// Generates assessments for `objs_under_asmt` from the source widget,
    /// optionally from a template, and shows the generated results.
    pub fn generate_objs_via_tree_view(
        &mut self,
        src_obj: &Entity,
        objs_under_asmt: &[Entity],
        asmt_tmpl: Option<&Entity>,
    ) -> WebUiResult<()> {
        self.ensure_assessment("generate_objs_via_tree_view")?;
        let titles = titles_of(objs_under_asmt);
        let tree_view = self.open_widget_of_mapped_objs(src_obj)?;
        tree_view.choose_three_bbs(MenuItem::Generate)?;
        tree_view.generate_asmts(asmt_tmpl.map(Entity::title_or_empty), &titles)?;
        tree_view.show_generated_results()?;
        Ok(())
    }

    /// Titles from the Related Assessments tab of an assessment.
    pub fn get_asmt_related_asmts_titles(&mut self, asmt: &Entity) -> WebUiResult<Vec<String>> {
        self.ensure_assessment("get_asmt_related_asmts_titles")?;
        let asmt_type = asmt.assessment_type.as_deref().unwrap_or(DEFAULT_ASMT_TYPE);
        Ok(self
            .open_info_page_of_obj(asmt)?
            .related_asmts_titles_via_tab(asmt_type)?)
    }

    pub fn get_related_issues_titles(&mut self, obj: &Entity) -> WebUiResult<Vec<String>> {
        self.ensure_assessment("get_related_issues_titles")?;
        let rows = self.open_info_page_of_obj(obj)?.related_issues_scopes()?;
        Ok(rows
            .iter()
            .filter_map(scope_title)
            .map(str::to_string)
            .collect())
    }

    pub fn raise_issue(&mut self, src_obj: &Entity, issue: &Entity) -> WebUiResult<()> {
        self.ensure_assessment("raise_issue")?;
        self.open_info_page_of_obj(src_obj)?.raise_issue(issue)?;
        Ok(())
    }

    /// Completes the assessment, then waits for the state to change and the
    /// spinner to disappear.
    pub fn complete_assessment(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.ensure_assessment("complete_assessment")?;
        let info_page = self.open_info_page_of_obj(obj)?;
        let initial_state = info_page.status()?;
        info_page.click_complete()?;

        let (timeout, poll) = (self.config.wait_timeout, self.config.poll_interval);
        let info_page = self.pages.info_page(self.obj_type);
        wait_for("assessment state change", timeout, poll, || {
            Ok(info_page.status()? != initial_state)
        })?;
        let browser = self.pages.browser();
        wait_for("spinner to disappear", timeout, poll, || {
            Ok(!browser.is_element_visible(SPINNER)?)
        })
    }

    /// Verifies the assessment and waits for the completed badge and the
    /// verified icon.
    pub fn verify_assessment(&mut self, obj: &Entity) -> WebUiResult<&mut dyn InfoPage> {
        self.ensure_assessment("verify_assessment")?;
        self.open_info_page_of_obj(obj)?.click_verify()?;
        let (timeout, poll) = (self.config.wait_timeout, self.config.poll_interval);
        for locator in [HEADER_STATE_COMPLETED, ICON_VERIFIED] {
            let browser = self.pages.browser();
            wait_for(locator, timeout, poll, || browser.is_element_visible(locator))?;
        }
        Ok(self.pages.info_page(self.obj_type))
    }

    /// Returns the assessment for rework.
    pub fn reject_assessment(&mut self, obj: &Entity) -> WebUiResult<&mut dyn InfoPage> {
        self.ensure_assessment("reject_assessment")?;
        self.open_info_page_of_obj(obj)?.click_needs_rework()?;
        Ok(self.pages.info_page(self.obj_type))
    }

    pub fn deprecate_assessment(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.ensure_assessment("deprecate_assessment")?;
        let info_page = self.open_info_page_of_obj(obj)?;
        info_page.choose_three_bbs(MenuItem::Deprecate)?;
        info_page.wait_save()?;
        Ok(())
    }

    pub fn edit_assessment_answers(&mut self, obj: &Entity) -> WebUiResult<()> {
        self.ensure_assessment("edit_assessment_answers")?;
        self.open_info_page_of_obj(obj)?.edit_answers()?;
        Ok(())
    }

    /// Adds evidence URLs one at a time, waiting for each save. Applies to
    /// assessments and audits.
    pub fn add_evidence_urls(&mut self, obj: &Entity, urls: &[String]) -> WebUiResult<()> {
        self.ensure_supported(
            "add_evidence_urls",
            matches!(self.obj_type, ObjectType::Assessment | ObjectType::Audit),
        )?;
        let info_page = self.open_info_page_of_obj(obj)?;
        for url in urls {
            info_page.add_evidence_url(url)?;
            info_page.wait_save()?;
        }
        Ok(())
    }

    pub fn add_primary_contact(&mut self, obj: &Entity, person: &str) -> WebUiResult<()> {
        self.ensure_assessment("add_primary_contact")?;
        let info_page = self.open_info_page_of_obj(obj)?;
        info_page.add_primary_contact(person)?;
        info_page.wait_save()?;
        Ok(())
    }

    pub fn add_asignee(&mut self, obj: &Entity, person: &str) -> WebUiResult<()> {
        self.ensure_assessment("add_asignee")?;
        let info_page = self.open_info_page_of_obj(obj)?;
        info_page.add_assignee(person)?;
        info_page.wait_save()?;
        Ok(())
    }

    /// Maps `objs_to_map` through the assessment edit modal.
    pub fn map_objs_in_edit_modal(&mut self, obj: &Entity, objs_to_map: &[Entity]) -> WebUiResult<()> {
        self.ensure_assessment("map_objs_in_edit_modal")?;
        self.open_info_page_of_obj(obj)?
            .choose_three_bbs(MenuItem::Edit)?;
        let modal = self.pages.object_modal(ObjectType::Assessment);
        modal.map_objects(objs_to_map)?;
        modal.save_and_close()?;
        Ok(())
    }

    pub fn choose_and_fill_dropdown_lca(
        &mut self,
        asmt: &Entity,
        dropdown_title: &str,
        fill: &DropdownLcaFill,
    ) -> WebUiResult<()> {
        self.ensure_assessment("choose_and_fill_dropdown_lca")?;
        self.open_info_page_of_obj(asmt)?
            .choose_and_fill_dropdown_lca(dropdown_title, fill)?;
        Ok(())
    }

    /// Snapshots of `obj_type` related to the control snapshot mapped to
    /// the assessment.
    pub fn get_snapshots_which_are_related_to_control_snapshot(
        &mut self,
        asmt: &Entity,
        control: &Entity,
        obj_type: ObjectType,
    ) -> WebUiResult<Vec<Entity>> {
        self.ensure_assessment("get_snapshots_which_are_related_to_control_snapshot")?;
        let scopes = self
            .open_info_page_of_obj(asmt)?
            .related_snapshot_scopes(control.title_or_empty(), obj_type)?;
        Ok(crate::scope::create_list_objs(obj_type, &scopes)?)
    }

    /// Opens My Assessments with every state selected in the status filter.
    pub fn open_my_assessments_page(&mut self) -> WebUiResult<&mut dyn Dashboard> {
        self.ensure_assessment("open_my_assessments_page")?;
        let url = self.urls.my_assessments();
        self.open_url(&url, false)?;
        self.pages.browser().wait_for_js()?;
        let dashboard = self.pages.dashboard();
        dashboard.select_all_statuses()?;
        Ok(dashboard)
    }

    /// Assessments listed in the bulk verify modal.
    pub fn get_objs_from_bulk_update_modal(&mut self, with_second_tier_info: bool) -> WebUiResult<Vec<Entity>> {
        self.ensure_assessment("get_objs_from_bulk_update_modal")?;
        let scopes = self
            .pages
            .bulk_verify_modal()
            .assessment_scopes(with_second_tier_info)?;
        self.create_list_objs(&scopes)
    }
}
