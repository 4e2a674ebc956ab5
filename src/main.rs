use std::net::{Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use comptoir_config::Settings;
use comptoir_notion::NotionClient;
use comptoir_schema::EntityType;
use comptoir_server::AppState;

/// Comptoir - proxy and sync bridge between the ERP admin UI and its
/// Notion-backed store
#[derive(Parser)]
#[command(name = "comptoir")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the HTTP proxy server
  Serve {
    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
  },

  /// Check configuration and remote connectivity, then exit
  Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Serve { port } => {
      let mut settings = Settings::from_env().context("loading configuration")?;
      if let Some(port) = port {
        settings.port = port;
      }

      tracing::info!(
        port = settings.port,
        api_key = %settings.masked_api_key(),
        "starting proxy"
      );

      let state = Arc::new(AppState::new(settings).context("building server state")?);
      comptoir_server::serve(state).await.context("serving")?;
      Ok(ExitCode::SUCCESS)
    }
    Commands::Check => run_checks().await,
  }
}

/// Diagnostics: report configuration, port availability and store
/// connectivity. Exits non-zero when any check fails.
async fn run_checks() -> Result<ExitCode> {
  let mut failed = false;

  let settings = match Settings::from_env() {
    Ok(settings) => {
      println!(
        "ok: configuration loaded (api key {})",
        settings.masked_api_key()
      );
      Some(settings)
    }
    Err(e) => {
      println!("error: {e}");
      println!("       add NOTION_API_KEY=secret_xxx to the environment");
      failed = true;
      None
    }
  };

  if let Some(settings) = &settings {
    // Bind and release to prove the port is free.
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port));
    match tokio::net::TcpListener::bind(addr).await {
      Ok(_) => println!("ok: port {} is available", settings.port),
      Err(e) => {
        println!("error: port {} is not available: {e}", settings.port);
        failed = true;
      }
    }

    match NotionClient::new(&settings.notion_api_key) {
      Ok(client) => match client.list_users().await {
        Ok(count) => println!("ok: store connection works ({count} users visible)"),
        Err(e) => {
          println!("error: store connection failed: {e}");
          failed = true;
        }
      },
      Err(e) => {
        println!("error: {e}");
        failed = true;
      }
    }

    for entity in EntityType::ALL {
      match settings.database_id(entity) {
        Some(id) => println!("ok: {entity} database configured ({id})"),
        None => println!("note: no database configured for {entity}"),
      }
    }
  }

  if failed {
    println!("one or more checks failed");
    Ok(ExitCode::FAILURE)
  } else {
    println!("all checks passed; run 'comptoir serve' to start the proxy");
    Ok(ExitCode::SUCCESS)
  }
}
