use crate::sources::{FileSource, SourceError, SourceFormat};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the CLI and HTTP service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub source: SourceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = env::var("APP_SOURCE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let format = match env::var("APP_SOURCE_FORMAT") {
            Ok(value) if !value.trim().is_empty() => Some(
                SourceFormat::parse(&value).ok_or(ConfigError::InvalidSourceFormat(value))?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            source: SourceConfig { path, format },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Default politician export used when a command or request names none.
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    pub path: Option<PathBuf>,
    pub format: Option<SourceFormat>,
}

impl SourceConfig {
    /// Builds a file source from `path` or, failing that, the configured path.
    ///
    /// The configured format only applies to the configured path; an explicit
    /// path is read as `format` or as its extension suggests.
    pub fn resolve(
        &self,
        path: Option<PathBuf>,
        format: Option<SourceFormat>,
    ) -> Result<Option<FileSource>, SourceError> {
        match (path, &self.path) {
            (Some(path), _) => FileSource::open(path, format).map(Some),
            (None, Some(configured)) => {
                FileSource::open(configured.clone(), format.or(self.format)).map(Some)
            }
            (None, None) => Ok(None),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSourceFormat(String),
    MissingSource,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSourceFormat(value) => {
                write!(f, "APP_SOURCE_FORMAT must be json or csv, got '{}'", value)
            }
            ConfigError::MissingSource => write!(
                f,
                "no politician export given; pass --input or set APP_SOURCE_PATH"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSourceFormat(_)
            | ConfigError::MissingSource => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_SOURCE_PATH");
        env::remove_var("APP_SOURCE_FORMAT");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.source.path.is_none());
        assert!(config.source.format.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_source_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SOURCE_PATH", "data/politicians.export");
        env::set_var("APP_SOURCE_FORMAT", "JSON");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        let source = config
            .source
            .resolve(None, None)
            .expect("source resolves")
            .expect("source configured");
        assert_eq!(source.format(), SourceFormat::Json);

        let overridden = config
            .source
            .resolve(Some(PathBuf::from("speeches.csv")), None)
            .expect("override resolves")
            .expect("override present");
        assert_eq!(overridden.format(), SourceFormat::Csv);
    }

    #[test]
    fn rejects_unknown_source_format() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SOURCE_FORMAT", "xml");
        let error = AppConfig::load().expect_err("format rejected");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidSourceFormat(ref value) if value == "xml"));
    }

    #[test]
    fn unconfigured_source_resolves_to_none() {
        let config = SourceConfig::default();
        assert!(config.resolve(None, None).expect("resolves").is_none());
        let source = config
            .resolve(Some(PathBuf::from("speeches.csv")), None)
            .expect("resolves")
            .expect("present");
        assert_eq!(source.format(), SourceFormat::Csv);
    }
}
