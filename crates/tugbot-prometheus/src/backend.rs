use std::sync::Arc;

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use tugbot_core::{LaunchOutcome, TickerMetrics};

/// Prometheus metrics backend for the ticker.
///
/// Label cardinality is bounded: `outcome` is one of "launched", "failed", "missing_image".
#[derive(Clone)]
pub struct PrometheusMetrics {
    ticks: IntCounter,
    tick_duration: Histogram,
    list_failures: IntCounter,
    launches: IntCounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a backend registering into `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let ticks = IntCounter::with_opts(Opts::new(
            "tugbot_ticks_total",
            "Total number of polling ticks that reached the runtime",
        ))?;
        registry.register(Box::new(ticks.clone()))?;

        let tick_duration = Histogram::with_opts(
            HistogramOpts::new(
                "tugbot_tick_duration_seconds",
                "Duration of a polling tick in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
        )?;
        registry.register(Box::new(tick_duration.clone()))?;

        let list_failures = IntCounter::with_opts(Opts::new(
            "tugbot_list_failures_total",
            "Total number of failed container list calls",
        ))?;
        registry.register(Box::new(list_failures.clone()))?;

        let launches = IntCounterVec::new(
            Opts::new(
                "tugbot_launches_total",
                "Total number of re-launch attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(launches.clone()))?;

        Ok(Self {
            ticks,
            tick_duration,
            list_failures,
            launches,
            registry,
        })
    }

    /// Create a backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metric families for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Content type matching [`PrometheusMetrics::encode`].
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl TickerMetrics for PrometheusMetrics {
    fn record_tick(&self, duration_ms: u64) {
        self.ticks.inc();
        self.tick_duration.observe(duration_ms as f64 / 1000.0);
    }

    fn record_list_failure(&self) {
        self.list_failures.inc();
    }

    fn record_launch(&self, outcome: LaunchOutcome) {
        self.launches.with_label_values(&[outcome.as_label()]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_for<'a>(body: &'a str, prefix: &str) -> &'a str {
        body.lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("no sample starting with {prefix:?} in:\n{body}"))
    }

    #[test]
    fn fresh_backend_exposes_counters() {
        let metrics = PrometheusMetrics::new().unwrap();
        let body = metrics.encode().unwrap();

        assert_eq!(line_for(&body, "tugbot_ticks_total "), "tugbot_ticks_total 0");
        assert_eq!(
            line_for(&body, "tugbot_list_failures_total "),
            "tugbot_list_failures_total 0"
        );
    }

    #[test]
    fn ticks_feed_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_tick(150);
        metrics.record_tick(20);

        let body = metrics.encode().unwrap();
        assert_eq!(line_for(&body, "tugbot_ticks_total "), "tugbot_ticks_total 2");
        assert_eq!(
            line_for(&body, "tugbot_tick_duration_seconds_count"),
            "tugbot_tick_duration_seconds_count 2"
        );
    }

    #[test]
    fn launches_are_split_by_outcome() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_launch(LaunchOutcome::Launched);
        metrics.record_launch(LaunchOutcome::Launched);
        metrics.record_launch(LaunchOutcome::MissingImage);
        metrics.record_list_failure();

        let body = metrics.encode().unwrap();
        assert_eq!(
            line_for(&body, r#"tugbot_launches_total{outcome="launched"}"#),
            r#"tugbot_launches_total{outcome="launched"} 2"#
        );
        assert_eq!(
            line_for(&body, r#"tugbot_launches_total{outcome="missing_image"}"#),
            r#"tugbot_launches_total{outcome="missing_image"} 1"#
        );
        assert!(!body.contains(r#"outcome="failed""#));
        assert_eq!(
            line_for(&body, "tugbot_list_failures_total "),
            "tugbot_list_failures_total 1"
        );
    }

    #[test]
    fn shared_registry_rejects_second_backend() {
        let registry = Arc::new(Registry::new());
        let _first = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();

        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }

    #[test]
    fn content_type_is_text_format() {
        let metrics = PrometheusMetrics::new().unwrap();
        assert!(metrics.content_type().starts_with("text/plain"));
    }
}
