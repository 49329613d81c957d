use clap::Parser;

use tugbot_observe::{init_local_offset, init_logger};

mod agent;
mod cli;
mod config;
mod http;

use cli::Cli;
use config::AgentConfig;

fn main() -> anyhow::Result<()> {
    // must run while the process is still single-threaded
    init_local_offset();

    let cli = Cli::parse();
    let cfg = AgentConfig::resolve(&cli)?;
    init_logger(&cfg.logger)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(agent::run(cfg))
}
