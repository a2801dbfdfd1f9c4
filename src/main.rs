use std::path::PathBuf;

use clap::Parser;
use tidehttp::config::Config;
use tidehttp::server;

#[derive(Parser)]
#[command(name = "tidehttp")]
#[command(about = "Minimal HTTP/1.1 server", long_about = None)]
struct Cli {
    /// Storage directory served under /files/<name>
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on (overrides LISTEN and the config file)
    #[arg(long)]
    listen: Option<String>,

    /// Optional YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        }
        .with_env();

        if let Some(addr) = self.listen {
            cfg = cfg.with_listen_addr(addr);
        }
        if let Some(dir) = self.directory {
            cfg = cfg.with_directory(dir);
        }
        Ok(cfg)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Cli::parse().into_config()?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
