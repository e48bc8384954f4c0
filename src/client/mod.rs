// HTTP side of the identity service: token issuance, catalog lookup, project listing.

pub mod auth;
pub mod factory;
pub mod identity;

pub use factory::ProviderClientFactory;
pub use identity::IdentityV3Client;
