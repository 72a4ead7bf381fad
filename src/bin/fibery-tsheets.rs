use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
#[command(name = "fibery-tsheets", about = "Fibery integration app for TSheets")]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// TSheets REST API base URL
    #[arg(long, env = "TSHEETS_API_BASE", default_value = fibery_tsheets::config::DEFAULT_API_BASE)]
    api_base: String,

    /// OAuth client id registered with TSheets
    #[arg(long, env = "TSHEETS_OAUTH_CLIENT_ID")]
    client_id: String,

    /// OAuth client secret registered with TSheets
    #[arg(long, env = "TSHEETS_OAUTH_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Timeout for each provider request, in seconds
    #[arg(long, env = "TSHEETS_REQUEST_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// SVG served from /logo
    #[arg(long, env = "LOGO_PATH", default_value = "logo.svg")]
    logo: PathBuf,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = fibery_tsheets::Config::new(&cli.api_base, &cli.client_id, &cli.client_secret)?
        .with_request_timeout(Duration::from_secs(cli.timeout_secs))
        .with_logo_path(cli.logo);
    let connector = Arc::new(fibery_tsheets::Connector::new(&config)?);
    let app = fibery_tsheets::build_router(connector);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
