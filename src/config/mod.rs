#[cfg(feature = "cli")]
pub mod cli;
pub mod provider;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use provider::ProviderConfig;
