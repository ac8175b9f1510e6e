pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{json_store::JsonDocumentStore, storage::LocalStorage};
pub use app::{Reply, Session};
pub use config::TomlConfig;
pub use crate::core::{enrollment::EnrollmentEngine, registry::StudentRegistry};
pub use utils::error::{RecordsError, Result};
