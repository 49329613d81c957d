use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "tugbot",
    version,
    about = "Re-launches exited test containers on a fixed interval"
)]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Polling interval in milliseconds.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Docker Engine address (unix:///path, tcp://host:port). Defaults to `DOCKER_HOST`
    /// or the platform socket.
    #[arg(long)]
    pub docker_host: Option<String>,

    /// Log filter, e.g. "info" or "tugbot_core=debug,info".
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format: text, json or journald.
    #[arg(long)]
    pub log_format: Option<String>,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,
}
