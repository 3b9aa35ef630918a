//! Repository contracts and SQLite implementations for resource records.
//!
//! # Responsibility
//! - Define CRUD access to persisted categories and facilities.
//! - Keep SQL inside this module.
//!
//! # Invariants
//! - Updates and deletes of a missing id return `RepoError::NotFound`.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod category_repo;
pub mod facility_repo;

use crate::db::DbError;
use crate::model::category::Category;
use crate::model::facility::Facility;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use category_repo::SqliteCategoryRepository;
pub use facility_repo::SqliteFacilityRepository;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { resource: &'static str, id: Uuid },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD contract shared by every resource record store.
pub trait ResourceRepository<M> {
    /// Inserts `record` and returns its id.
    fn create(&self, record: &M) -> RepoResult<Uuid>;
    fn update(&self, record: &M) -> RepoResult<()>;
    fn get(&self, id: Uuid) -> RepoResult<Option<M>>;
    /// All records, most recently updated first.
    fn list(&self) -> RepoResult<Vec<M>>;
    fn delete(&self, id: Uuid) -> RepoResult<()>;
}

pub trait CategoryRepository: ResourceRepository<Category> {}

impl<T: ResourceRepository<Category>> CategoryRepository for T {}

pub trait FacilityRepository: ResourceRepository<Facility> {}

impl<T: ResourceRepository<Facility>> FacilityRepository for T {}

fn parse_uuid(table: &str, text: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.uuid")))
}

fn parse_epoch_ms(column: &str, value: i64) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| RepoError::InvalidData(format!("timestamp `{value}` out of range in {column}")))
}
