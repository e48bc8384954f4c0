use anyhow::Context;
use clap::Parser;
use project_lookup::core::schema::project_schema;
use project_lookup::utils::error::ErrorSeverity;
use project_lookup::utils::{logger, validation::Validate};
use project_lookup::{CliConfig, ProjectDataSource, ProviderClientFactory, ProviderConfig};

fn load_provider_config(cli: &CliConfig) -> anyhow::Result<ProviderConfig> {
    let config = match &cli.config {
        Some(path) => ProviderConfig::from_file(path)
            .with_context(|| format!("failed to load provider config '{}'", path))?,
        None => ProviderConfig::from_env()
            .context("failed to read provider config from OS_* environment variables")?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.schema {
        println!("{}", serde_json::to_string_pretty(&project_schema())?);
        return Ok(());
    }

    tracing::info!("🚀 Starting project lookup");

    let provider_config = match load_provider_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Pass --config <file> or export OS_AUTH_URL and credentials");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = provider_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let factory = ProviderClientFactory::new(provider_config)?;
    let data_source = ProjectDataSource::new(factory);
    let mut model = cli.to_model();

    match data_source.read(&mut model).await {
        Ok(()) => {
            tracing::info!(
                "✅ Resolved project {}",
                model.id.as_deref().unwrap_or_default()
            );
            println!("{}", serde_json::to_string_pretty(&model.to_value()?)?);
        }
        Err(e) => {
            // 零筆或多筆結果是查詢條件問題，不是執行失敗
            if e.is_user_error() {
                tracing::warn!("⚠️ Lookup did not resolve a single project: {}", e);
            } else {
                tracing::error!(
                    "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            }

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::High => 1,    // 查詢條件或設定錯誤
                ErrorSeverity::Medium => 2,  // 遠端服務錯誤
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
