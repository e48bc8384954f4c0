pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ProviderConfig;

pub use client::{IdentityV3Client, ProviderClientFactory};
pub use crate::core::{data_source::ProjectDataSource, lookup::read_project};
pub use domain::model::{Project, ProjectDataSourceModel, ProjectFilter};
pub use utils::error::{LookupError, Result};
