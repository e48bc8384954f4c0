use crate::domain::model::ProjectDataSourceModel;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "project-lookup")]
#[command(about = "Look up exactly one identity v3 project and print its attributes")]
pub struct CliConfig {
    /// Provider configuration (TOML); OS_* environment variables are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Region of the identity endpoint, defaults to the provider region
    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub domain_id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub parent_id: Option<String>,

    /// Print the data source schema and exit
    #[arg(long)]
    pub schema: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_model(&self) -> ProjectDataSourceModel {
        ProjectDataSourceModel {
            region: self.region.clone(),
            domain_id: self.domain_id.clone(),
            name: self.name.clone(),
            parent_id: self.parent_id.clone(),
            ..ProjectDataSourceModel::default()
        }
    }
}
