pub mod enrollment;
pub mod registry;
pub mod reports;

pub use crate::domain::catalog::{Catalog, Discipline, Program};
pub use crate::domain::model::{Course, Status, Student};
pub use crate::domain::ports::{DocumentStore, Storage};
pub use crate::utils::error::Result;
