//! Udyam registration service daemon.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use udyam_service::{ServiceConfig, Server};

/// Udyam registration service.
#[derive(Parser)]
#[command(name = "udyamd")]
#[command(about = "Udyam registration service", long_about = None)]
#[command(version)]
struct Cli {
    /// Listen address
    #[arg(
        short,
        long,
        env = "UDYAM_LISTEN_ADDR",
        default_value = "127.0.0.1:8080"
    )]
    listen: String,

    /// Form schema document (uses the embedded schema when omitted)
    #[arg(long, env = "UDYAM_SCHEMA")]
    schema: Option<std::path::PathBuf>,

    /// Disable permissive CORS
    #[arg(long, env = "UDYAM_NO_CORS")]
    no_cors: bool,

    /// Log level
    #[arg(long, env = "UDYAM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig {
        listen_addr: cli
            .listen
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid listen address: {err}"))?,
        schema_path: cli.schema,
        enable_cors: !cli.no_cors,
    };

    println!(
        "udyamd {} listening on {}",
        env!("CARGO_PKG_VERSION"),
        config.listen_addr
    );

    let server = Server::new(config)?;
    server.run().await?;
    Ok(())
}
