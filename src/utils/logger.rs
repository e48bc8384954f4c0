use tracing_subscriber::fmt::{self, format};
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter};

type StderrLayer<S> = fmt::Layer<S, format::DefaultFields, format::Format, fn() -> std::io::Stderr>;

/// `RUST_LOG` 優先，未設定時使用 `default`
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "project_lookup=debug,info"
    } else {
        "project_lookup=info"
    }
}

// stdout 保留給 JSON 結果，日誌一律寫 stderr
fn stderr_layer<S>() -> StderrLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr as fn() -> std::io::Stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// CLI 日誌，精簡格式
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(default_directive(verbose)))
        .with(stderr_layer().compact())
        .init();
}

/// 給外部編排引擎使用的 JSON 格式日誌
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(default_directive(false)))
        .with(stderr_layer().json())
        .init();
}
