use std::io::{self, BufReader};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_admin::config::{ConsoleConfig, DEFAULT_ADMIN_URL, DEFAULT_PUBLIC_URL};
use catalog_admin::console::AdminConsole;
use catalog_admin::error::ConsoleError;
use catalog_admin::net::api::CatalogApi;
use catalog_admin::net::transport::HttpTransport;
use catalog_admin::shell::{Shell, Terminal};

#[derive(Parser, Debug)]
#[command(name = "catalog-admin", about = "Product catalog admin console")]
struct Cli {
    /// Base URL of the session/admin API.
    #[arg(long, env = "ADMIN_API_BASE_URL", default_value = DEFAULT_ADMIN_URL)]
    admin_url: String,

    /// Base URL of the public catalog API.
    #[arg(long, env = "PUBLIC_API_BASE_URL", default_value = DEFAULT_PUBLIC_URL)]
    public_url: String,

    /// Username used by `login` when none is given.
    #[arg(long, env = "ADMIN_USERNAME")]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    // Logs go to stderr so they never interleave with the rendered console.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::new(&cli.admin_url, &cli.public_url, cli.username)?;
    tracing::info!(admin = %config.admin_url, public = %config.public_url, "starting admin console");

    let transport = Arc::new(HttpTransport::new()?);
    let api = CatalogApi::new(transport, &config.admin_url, &config.public_url);
    let terminal = Arc::new(Terminal::new(BufReader::new(io::stdin()), io::stdout()));
    let console = AdminConsole::new(api, terminal.clone());

    let mut shell = Shell::new(console, terminal, config.username);
    shell.run().await
}
