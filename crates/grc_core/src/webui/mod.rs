//! Browser-driven UI service layer.
//!
//! # Responsibility
//! - Define the browser and page-object boundaries.
//! - Provide the parameterized `WebUiService` and its helpers (URLs, bounded
//!   waits, mapper lifecycle, inner navigation tabs).

pub mod driver;
pub mod error;
pub mod mapper;
pub mod pages;
pub mod service;
pub mod tabs;
pub mod url;
pub mod wait;

pub use driver::{Browser, DriverError, DriverErrorKind, DriverResult};
pub use error::{WebUiError, WebUiResult};
pub use mapper::{MapperState, MappingStatus, UnifiedMapperHandle};
pub use pages::PageCatalog;
pub use service::WebUiService;
