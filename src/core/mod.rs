pub mod data_source;
pub mod lookup;
pub mod pagination;
pub mod schema;

#[cfg(test)]
pub(crate) mod mock;

pub use crate::domain::model::{
    PageRequest, Project, ProjectDataSourceModel, ProjectFilter, ProjectPage,
};
pub use crate::domain::ports::{ClientFactory, IdentityClient};
pub use crate::utils::error::Result;
