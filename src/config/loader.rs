//! Configuration loading from the command line and environment.

use clap::Parser;

use crate::config::schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, UpstreamConfig,
    DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT,
};
use crate::config::validation::{validate_config, ValidationError};

/// Command-line arguments. Every flag falls back to an environment variable.
#[derive(Debug, Parser)]
#[command(name = "pumparena-proxy")]
#[command(about = "CORS-friendly pass-through proxy for the pump.fun public API", long_about = None)]
pub struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Base URL of the upstream API.
    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// User-Agent sent to the upstream.
    #[arg(long, env = "UPSTREAM_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Abort upstream calls after this many seconds.
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Serve Prometheus metrics on this address.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl From<Args> for ProxyConfig {
    fn from(args: Args) -> Self {
        Self {
            listener: ListenerConfig {
                host: args.host,
                port: args.port,
            },
            upstream: UpstreamConfig {
                base_url: args.upstream_url,
                user_agent: args.user_agent,
                timeout_secs: args.upstream_timeout_secs,
            },
            observability: ObservabilityConfig {
                log_format: args.log_format,
                metrics_address: args.metrics_address,
            },
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Build and validate configuration from parsed arguments.
pub fn load_config(args: Args) -> Result<ProxyConfig, ConfigError> {
    let config = ProxyConfig::from(args);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["pumparena-proxy"]).unwrap();
        let config = load_config(args).unwrap();
        assert_eq!(config.listener.port, 3001);
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_args_override() {
        let args = Args::try_parse_from([
            "pumparena-proxy",
            "--port",
            "9000",
            "--upstream-url",
            "http://127.0.0.1:4000",
            "--upstream-timeout-secs",
            "5",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = load_config(args).unwrap();
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.upstream.timeout_secs, Some(5));
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_config_reports_every_error() {
        let args = Args::try_parse_from([
            "pumparena-proxy",
            "--upstream-url",
            "mailto:someone@example.com",
            "--upstream-timeout-secs",
            "0",
        ])
        .unwrap();
        let err = load_config(args).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("upstream URL"));
        assert!(message.contains("timeout"));
    }
}
