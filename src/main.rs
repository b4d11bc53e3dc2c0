use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use titleforge_server::config::{FileConfig, LlmConfig};
use titleforge_server::generation::{GenerationService, DEFAULT_MIN_INTERVAL};
use titleforge_server::llm::{LlmProvider, OpenAiProvider, RetryPolicy};
use titleforge_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use titleforge_server::user::{JwtKeys, SqliteUserStore};

/// Placeholder secret for local development only.
const DEV_JWT_SECRET: &str = "titleforge-dev-secret-change-in-production";

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite database file to use for user storage.
    #[clap(value_parser = parse_path)]
    pub user_store_file_path: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Path to an optional TOML configuration file (LLM endpoints live
    /// here).
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Disable the registration endpoint.
    #[clap(long, default_value_t = false)]
    pub disable_registration: bool,
}

fn build_provider(config: &LlmConfig) -> Option<Arc<dyn LlmProvider>> {
    if !config.is_configured() {
        return None;
    }
    let base_url = config.base_url.clone()?;
    let model = config.model.clone()?;
    info!("LLM endpoint configured: {} ({})", base_url, model);
    Some(Arc::new(OpenAiProvider::new(
        base_url,
        model,
        config.api_key.clone(),
    )))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            FileConfig::load(path)?
        }
        None => FileConfig::default(),
    };

    let jwt_secret = std::env::var("JWT_SECRET")
        .ok()
        .or_else(|| file_config.jwt_secret.clone())
        .unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });
    let jwt_keys = Arc::new(JwtKeys::new(&jwt_secret));

    info!(
        "Opening SQLite user database at {:?}...",
        cli_args.user_store_file_path
    );
    let user_store = Arc::new(SqliteUserStore::new(&cli_args.user_store_file_path)?);

    let generation_config = file_config.generation.clone().unwrap_or_default();
    let retry = RetryPolicy::new(
        generation_config.max_retries.unwrap_or(3),
        Duration::from_secs(generation_config.retry_delay_secs.unwrap_or(1)),
    );
    let timeout = Duration::from_secs(generation_config.timeout_secs.unwrap_or(30));

    let primary = file_config.llm.as_ref().and_then(build_provider);
    let fallback = file_config.fallback_llm.as_ref().and_then(build_provider);
    if primary.is_none() && fallback.is_none() {
        info!("No LLM endpoint configured; titles are generated heuristically");
    }
    let generation = Arc::new(GenerationService::new(primary, fallback, retry, timeout));

    let config = ServerConfig {
        requests_logging_level: cli_args.logging_level,
        port: file_config.port.unwrap_or(cli_args.port),
        frontend_dir_path: file_config
            .frontend_dir_path
            .or(cli_args.frontend_dir_path),
        disable_registration: file_config
            .disable_registration
            .unwrap_or(cli_args.disable_registration),
        generation_min_interval: generation_config
            .min_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MIN_INTERVAL),
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(user_store, jwt_keys, generation, config).await
}
