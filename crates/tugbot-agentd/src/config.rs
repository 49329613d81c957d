use std::{net::SocketAddr, path::Path, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use tugbot_docker::DockerConfig;
use tugbot_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

use crate::cli::Cli;

/// Default polling interval: one minute.
pub const DEFAULT_INTERVAL_MS: u64 = 60_000;

/// Agent configuration file. Every field is optional; command-line flags win.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Time between polling ticks, in milliseconds.
    pub interval_ms: u64,
    pub docker: DockerConfig,
    pub logger: LoggerConfig,
    /// Address for the Prometheus `/metrics` endpoint; disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            docker: DockerConfig::default(),
            logger: LoggerConfig::default(),
            metrics_addr: None,
        }
    }
}

impl AgentConfig {
    /// Load `path` (JSON) or start from defaults, then apply command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        cfg.apply(cli)?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn apply(&mut self, cli: &Cli) -> anyhow::Result<()> {
        if let Some(ms) = cli.interval_ms {
            self.interval_ms = ms;
        }
        if let Some(host) = &cli.docker_host {
            self.docker.host = Some(host.clone());
        }
        if let Some(level) = &cli.log_level {
            self.logger.level = LoggerLevel::new(level.as_str())?;
        }
        if let Some(format) = &cli.log_format {
            self.logger.format = format.parse::<LoggerFormat>()?;
        }
        if let Some(addr) = cli.metrics_addr {
            self.metrics_addr = Some(addr);
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tugbot").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_poll_every_minute() {
        let cfg = AgentConfig::resolve(&cli(&[])).unwrap();

        assert_eq!(cfg.interval(), Duration::from_secs(60));
        assert_eq!(cfg.docker, DockerConfig::default());
        assert!(cfg.metrics_addr.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let raw = r#"{
            "interval_ms": 5000,
            "docker": {"host": "unix:///run/docker.sock"},
            "logger": {"format": "json"},
            "metrics_addr": "127.0.0.1:9464"
        }"#;
        let cfg = AgentConfig::parse(raw).unwrap();

        assert_eq!(cfg.interval_ms, 5000);
        assert_eq!(cfg.docker.host.as_deref(), Some("unix:///run/docker.sock"));
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(cfg.metrics_addr, Some("127.0.0.1:9464".parse().unwrap()));
    }

    #[test]
    fn flags_override_file_values() {
        let mut cfg = AgentConfig::parse(r#"{"interval_ms": 5000}"#).unwrap();
        cfg.apply(&cli(&[
            "--interval-ms",
            "250",
            "--docker-host",
            "tcp://10.0.0.5:2375",
            "--log-level",
            "tugbot_core=debug,info",
        ]))
        .unwrap();

        assert_eq!(cfg.interval_ms, 250);
        assert_eq!(cfg.docker.host.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert_eq!(cfg.logger.level.as_str(), "tugbot_core=debug,info");
    }

    #[test]
    fn bad_flag_values_are_errors() {
        let mut cfg = AgentConfig::default();
        assert!(cfg.apply(&cli(&["--log-format", "xml"])).is_err());
        assert!(cfg.apply(&cli(&["--log-level", "tugbot=loud"])).is_err());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let err = AgentConfig::load(Path::new("/nonexistent/tugbot.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tugbot.json"));
    }
}
