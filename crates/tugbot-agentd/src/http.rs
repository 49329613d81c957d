use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tugbot_prometheus::PrometheusMetrics;

/// Routes:
/// - GET /metrics - Prometheus text exposition
pub fn router(metrics: PrometheusMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(metrics))
}

/// Bind the metrics listener. Done before anything else starts so a taken port fails startup.
pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding metrics listener on {addr}"))
}

/// Serve `/metrics` on `listener` until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    metrics: PrometheusMetrics,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "serving metrics");
    }

    axum::serve(listener, router(metrics))
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .context("metrics server")
}

async fn metrics_handler(State(metrics): State<Arc<PrometheusMetrics>>) -> Response {
    match metrics.encode() {
        Ok(body) => ([(header::CONTENT_TYPE, metrics.content_type())], body).into_response(),
        Err(err) => {
            warn!(error = %err, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use tugbot_core::{LaunchOutcome, TickerMetrics};

    use super::*;

    #[tokio::test]
    async fn handler_exposes_recorded_metrics() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_launch(LaunchOutcome::Launched);

        let resp = metrics_handler(State(Arc::new(metrics))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(
            resp.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains(r#"tugbot_launches_total{outcome="launched"} 1"#));
    }

    #[tokio::test]
    async fn serve_stops_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        serve(listener, PrometheusMetrics::new().unwrap(), cancel)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bind_fails_on_a_taken_port() {
        let taken = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
        let addr = taken.local_addr().unwrap();

        let err = bind(addr).await.unwrap_err();
        assert!(format!("{err:#}").contains(&addr.to_string()));
    }
}
