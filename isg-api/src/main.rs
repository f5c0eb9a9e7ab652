use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use isg_api::AppState;
use isg_common::observability::init_logging;
use isg_config::{IsgConfig, IsgConfigLoader, default_config_path};
use isg_http::HttpClient;
use isg_scrape::IsgClient;
use tokio::net::TcpListener;

const MISSING_HOST: &str = "ERROR: Please provide ISG IP as first command-line argument";

#[derive(Parser)]
#[command(name = "isg-api", about = "REST API server for Stiebel Eltron ISG web interfaces")]
struct Cli {
    /// ISG host or IP (optionally with :port)
    host: Option<String>,
    /// Config file (default: <config dir>/isg/isg.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Listen address, e.g. 0.0.0.0:5432
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, CLI wins over both)
    let loader = match (&cli.config, default_config_path()) {
        (Some(path), _) => IsgConfigLoader::new().with_file(path),
        (None, Some(path)) => IsgConfigLoader::new().with_optional_file(path),
        (None, None) => IsgConfigLoader::new(),
    };
    let mut cfg: IsgConfig = loader.load()?;
    if let Some(listen) = cli.listen {
        cfg.server.listen = listen;
    }

    let Some(host) = resolve_host(cli.host, &cfg) else {
        eprintln!("{MISSING_HOST}");
        return Ok(ExitCode::FAILURE);
    };

    // 2) Logging
    let log_path = init_logging(cfg.log.to_log_config())?;

    // 3) Device client
    let http = HttpClient::new(&IsgConfig::base_url(&host))
        .with_context(|| format!("invalid ISG host '{host}'"))?
        .with_timeout(Duration::from_secs(cfg.device.timeout_secs))
        .with_retries(cfg.device.retries);
    let state = AppState::new(IsgClient::new(http, &cfg.table), cfg.table.clone());

    // 4) Serve
    let addr = cfg.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        listen = %addr,
        device = %state.device_url,
        log_file = %log_path.display(),
        "ISG API server started"
    );

    isg_api::serve(listener, state).await?;
    Ok(ExitCode::SUCCESS)
}

/// The positional argument wins over `device.host` from file or env.
fn resolve_host(cli_host: Option<String>, cfg: &IsgConfig) -> Option<String> {
    cli_host
        .or_else(|| cfg.device.host.clone())
        .filter(|host| !host.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_host(host: Option<&str>) -> IsgConfig {
        let mut cfg = IsgConfig::default();
        cfg.device.host = host.map(str::to_string);
        cfg
    }

    #[test]
    fn positional_host_wins_over_config() {
        let cfg = config_with_host(Some("10.0.0.7"));
        assert_eq!(
            resolve_host(Some("192.168.1.126".into()), &cfg).as_deref(),
            Some("192.168.1.126")
        );
    }

    #[test]
    fn config_host_is_the_fallback() {
        let cfg = config_with_host(Some("10.0.0.7"));
        assert_eq!(resolve_host(None, &cfg).as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn no_host_anywhere_is_none() {
        assert_eq!(resolve_host(None, &config_with_host(None)), None);
        assert_eq!(resolve_host(Some("  ".into()), &config_with_host(None)), None);
    }

    #[test]
    fn cli_parses_host_and_listen() {
        let cli = Cli::parse_from(["isg-api", "192.168.1.126", "--listen", "127.0.0.1:8080"]);
        assert_eq!(cli.host.as_deref(), Some("192.168.1.126"));
        assert_eq!(cli.listen.as_deref(), Some("127.0.0.1:8080"));
        assert!(cli.config.is_none());
    }
}
