//! Resource use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points that speak request forms and JSON mappings.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Responses are re-read from storage so timestamps reflect persisted state.
//! - Operations on a missing id return `RepoError::NotFound`.

use super::{Form, JsonAttrs, Resource};
use crate::repo::{RepoError, RepoResult, ResourceRepository};
use uuid::Uuid;

/// CRUD service over one resource type.
pub struct ResourceService<R: Resource, S: ResourceRepository<R::Model>> {
    resource: R,
    repo: S,
}

impl<R: Resource, S: ResourceRepository<R::Model>> ResourceService<R, S> {
    pub fn new(resource: R, repo: S) -> Self {
        Self { resource, repo }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Creates a record from `form` and returns its JSON representation.
    pub fn create(&self, form: &Form) -> RepoResult<JsonAttrs> {
        let mut obj = self.resource.new_object();
        self.resource.update_object_from_form(&mut obj, form);
        let id = self.write("create", self.repo.create(&obj))?;
        self.read(id)
    }

    /// Applies `form` on top of the stored record.
    pub fn update(&self, id: Uuid, form: &Form) -> RepoResult<JsonAttrs> {
        let mut obj = self.load(id)?;
        self.resource.update_object_from_form(&mut obj, form);
        self.write("update", self.repo.update(&obj))?;
        self.read(id)
    }

    pub fn read(&self, id: Uuid) -> RepoResult<JsonAttrs> {
        let obj = self.load(id)?;
        Ok(self.resource.attrs_for_json(&obj))
    }

    /// All records, most recently updated first.
    pub fn list(&self) -> RepoResult<Vec<JsonAttrs>> {
        Ok(self
            .repo
            .list()?
            .iter()
            .map(|obj| self.resource.attrs_for_json(obj))
            .collect())
    }

    pub fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.write("delete", self.repo.delete(id))
    }

    fn load(&self, id: Uuid) -> RepoResult<R::Model> {
        self.repo.get(id)?.ok_or(RepoError::NotFound {
            resource: self.resource.type_name(),
            id,
        })
    }

    fn write<T>(&self, action: &str, result: RepoResult<T>) -> RepoResult<T> {
        match &result {
            Ok(_) => log::info!(
                "event=resource_write module=resource status=ok type={} action={action}",
                self.resource.type_name()
            ),
            Err(err) => log::warn!(
                "event=resource_write module=resource status=error type={} action={action} error={err}",
                self.resource.type_name()
            ),
        }
        result
    }
}

