use rmcp::{ServiceExt, transport::stdio};

use chatrelay::config::Config;
use chatrelay::server::RelayServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Load .env from the binary's directory (MCP servers may start with any CWD).
    // Falls back to dotenvy's default CWD search if the binary path can't be resolved.
    let env_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
        .filter(|p| p.exists());
    match env_path {
        Some(path) => {
            dotenvy::from_path(&path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    tracing::info!("chatrelay starting");

    let config = Config::load();
    let server = RelayServer::new(config)?;

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {e:?}"))?;

    service.waiting().await?;

    tracing::info!("chatrelay shutting down");
    Ok(())
}
