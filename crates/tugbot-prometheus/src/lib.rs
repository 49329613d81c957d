//! Prometheus backend for the tugbot ticker metrics.
//!
//! [`PrometheusMetrics`] implements [`tugbot_core::TickerMetrics`]; hand it to
//! [`tugbot_core::Ticker::with_metrics`] and serve [`PrometheusMetrics::encode`] from
//! whatever HTTP server the process already runs.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tugbot_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let _handle: tugbot_core::MetricsHandle = Arc::new(metrics.clone());
//!
//! let body = metrics.encode()?;
//! assert!(body.contains("tugbot_ticks_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `tugbot_ticks_total` - Counter
//! - `tugbot_tick_duration_seconds` - Histogram
//! - `tugbot_list_failures_total` - Counter
//! - `tugbot_launches_total{outcome}` - Counter

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
