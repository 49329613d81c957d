use std::{sync::Arc, time::Duration};

use anyhow::anyhow;
use taskvisor::{
    BackoffPolicy, JitterPolicy, RestartPolicy, Subscribe, Supervisor, SupervisorConfig,
    TaskError, TaskFn, TaskRef, TaskSpec,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use tugbot_core::Ticker;
use tugbot_docker::DockerClient;
use tugbot_observe::SupervisorEvents;
use tugbot_prometheus::PrometheusMetrics;

use crate::{config::AgentConfig, http};

const TICKER_TASK: &str = "tugbot-ticker";

/// Run the agent until the supervisor receives a shutdown signal.
pub async fn run(cfg: AgentConfig) -> anyhow::Result<()> {
    let client = DockerClient::connect(&cfg.docker)?;
    if let Err(err) = client.ping().await {
        // list failures are retried every tick
        warn!(error = %err, "docker engine not reachable yet");
    }

    let metrics = PrometheusMetrics::new()?;
    let ticker = Ticker::new(Arc::new(client), cfg.interval())
        .with_metrics(Arc::new(metrics.clone()));
    info!(interval = ?ticker.interval(), docker = ?cfg.docker.host, "tugbot starting");

    let server_cancel = CancellationToken::new();
    let server = match cfg.metrics_addr {
        Some(addr) => {
            let listener = http::bind(addr).await?;
            let cancel = server_cancel.clone();
            Some(tokio::spawn(async move {
                // the ticker keeps running without its metrics endpoint
                if let Err(err) = http::serve(listener, metrics, cancel).await {
                    error!(error = %format!("{err:#}"), "metrics server stopped");
                }
            }))
        }
        None => None,
    };

    let subscribers: Vec<Arc<dyn Subscribe>> = vec![Arc::new(SupervisorEvents)];
    let sup = Supervisor::builder(SupervisorConfig::default())
        .with_subscribers(subscribers)
        .build();

    let result = sup.run(vec![ticker_spec(ticker)]).await;

    server_cancel.cancel();
    if let Some(server) = server {
        server.await?;
    }

    result.map_err(|e| anyhow!("supervisor exited with error: {e}"))?;
    info!("tugbot stopped");
    Ok(())
}

/// Supervised task running the ticker until taskvisor cancels it.
fn ticker_spec(ticker: Ticker) -> TaskSpec {
    let task: TaskRef = TaskFn::arc(TICKER_TASK, move |cancel: CancellationToken| {
        let ticker = ticker.clone();
        async move {
            ticker.run(cancel).await;
            Ok::<(), TaskError>(())
        }
    });

    TaskSpec::new(task, RestartPolicy::OnFailure, restart_backoff(), None)
}

fn restart_backoff() -> BackoffPolicy {
    BackoffPolicy {
        first: Duration::from_secs(1),
        max: Duration::from_secs(30),
        jitter: JitterPolicy::Equal,
        factor: 2.0,
    }
}

