//! CLI command implementations
//!
//! `serve` wires the index store, reload loop and HTTP server together and
//! runs until Ctrl-C. `check` parses a dataset once and reports its size.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig, SuggestState};
use crate::index::{DatasetError, IndexStore, RankedIndex};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::reload::{FileSource, Reloader};

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Service configuration.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Dataset file (default: "suggestions.json")
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Reload period in minutes (default: 15)
    #[serde(default = "default_period_minutes")]
    pub period_minutes: u64,

    /// Per-request timeout in seconds (default: 2)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub http: HttpServerConfig,
}

/// Upper bound on the reload period (one year)
const MAX_PERIOD_MINUTES: u64 = 365 * 24 * 60;

fn default_file() -> PathBuf {
    PathBuf::from("suggestions.json")
}
fn default_period_minutes() -> u64 {
    15
}
fn default_timeout_secs() -> u64 {
    2
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            period_minutes: default_period_minutes(),
            timeout_secs: default_timeout_secs(),
            http: HttpServerConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: ServiceConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve `serve` flags: config file first, explicit flags on top
    pub fn resolve(args: &ServeArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(file) = &args.file {
            config.file = file.clone();
        }
        if let Some(period) = args.period {
            config.period_minutes = period;
        }
        if let Some(timeout) = args.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(port) = args.port {
            config.http.port = port;
        }
        if let Some(host) = &args.host {
            config.http.host = host.clone();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.period_minutes == 0 {
            return Err(CliError::config_error("period must be > 0"));
        }
        if self.period_minutes > MAX_PERIOD_MINUTES {
            return Err(CliError::config_error(format!(
                "period must be at most {} minutes",
                MAX_PERIOD_MINUTES
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::config_error("timeout must be > 0"));
        }
        Ok(())
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_minutes.saturating_mul(60))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => {
            let config = ServiceConfig::resolve(&args)?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))
        }
        Command::Check { file } => check(&file),
    }
}

/// Serve suggestions until Ctrl-C.
///
/// The server starts immediately with an empty index; the first reload
/// runs concurrently and installs generation 1 as soon as it succeeds.
pub async fn serve(config: ServiceConfig) -> CliResult<()> {
    Logger::info(Event::BootStart, &[]);
    Logger::info(
        Event::ConfigLoaded,
        &[
            ("file", &config.file.display().to_string()),
            ("period_minutes", &config.period_minutes.to_string()),
            ("port", &config.http.port.to_string()),
            ("timeout_secs", &config.timeout_secs.to_string()),
        ],
    );

    let store = Arc::new(IndexStore::new());
    let metrics = Arc::new(MetricsRegistry::new());

    let reloader = Reloader::new(
        Arc::new(FileSource::new(config.file.clone())),
        Arc::clone(&store),
        Arc::clone(&metrics),
    );
    let reload_handle = reloader.start(config.period());

    let state = Arc::new(SuggestState::new(store, metrics, config.timeout()));
    let server = HttpServer::new(config.http.clone(), state);
    let served = server.start_with_shutdown(shutdown_signal()).await;

    if let Err(e) = reload_handle.stop().await {
        Logger::error(Event::ReloadStopped, &[("error", &e.to_string())]);
    }
    Logger::info(Event::ShutdownComplete, &[]);

    served.map_err(CliError::from)
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    file: String,
    bytes: usize,
    keys: usize,
    entries: usize,
}

/// Parse a dataset file once and print its key and entry counts
pub fn check(file: &Path) -> CliResult<()> {
    let bytes = fs::read(file).map_err(|e| {
        DatasetError::fetch(format!("failed to read {}: {}", file.display(), e))
    })?;
    let index = RankedIndex::from_json(&bytes)?;

    write_response(&CheckReport {
        file: file.display().to_string(),
        bytes: bytes.len(),
        keys: index.key_count(),
        entries: index.entry_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::resolve(&ServeArgs::default()).unwrap();
        assert_eq!(config.file, PathBuf::from("suggestions.json"));
        assert_eq!(config.period(), Duration::from_secs(15 * 60));
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = write_config(r#"{"file": "from_config.json", "timeout_secs": 9, "http": {"port": 7000}}"#);
        let args = ServeArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(7100),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(&args).unwrap();
        assert_eq!(config.file, PathBuf::from("from_config.json"));
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.http.port, 7100);
        assert_eq!(config.period_minutes, 15);
    }

    #[test]
    fn test_zero_period_rejected() {
        let args = ServeArgs {
            period: Some(0),
            ..Default::default()
        };
        assert!(matches!(ServiceConfig::resolve(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn test_oversized_period_rejected() {
        let args = ServeArgs {
            period: Some(u64::MAX),
            ..Default::default()
        };
        let err = ServiceConfig::resolve(&args).unwrap_err();
        assert!(err.to_string().contains("period must be at most"));

        let config = ServiceConfig {
            period_minutes: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.period(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_zero_timeout_in_file_rejected() {
        let file = write_config(r#"{"timeout_secs": 0}"#);
        assert!(ServiceConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_config_json() {
        let file = write_config("{not json");
        let err = ServiceConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config JSON"));
    }

    #[test]
    fn test_check_rejects_malformed_dataset() {
        let file = write_config(r#"[{"id": "a""#);
        assert!(matches!(check(file.path()), Err(CliError::Dataset(_))));
    }

    #[test]
    fn test_check_accepts_dataset() {
        let file = write_config(r#"[{"id":"a","cost":1,"name":"apple"}]"#);
        check(file.path()).unwrap();
    }
}
