//! Core logic for the GRC web UI test toolkit.
//! Holds the object model, scope normalization, the UI service layer and
//! the resource adapters served by the application.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod resource;
pub mod scope;
pub mod webui;

pub use config::{ConfigError, WebUiConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Comment, Entity};
pub use model::object_type::{ObjectType, UnknownObjectType};
pub use repo::{RepoError, RepoResult, ResourceRepository};
pub use resource::{CategoryResource, FacilityResource, Form, Resource, ResourceService};
pub use scope::{create_list_objs, normalize_scope, Scope, ScopeError, ScopeValue};
pub use webui::{WebUiError, WebUiResult, WebUiService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
