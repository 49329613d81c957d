mod error;
pub use error::TickError;

mod metrics;
pub use metrics::{LaunchOutcome, MetricsHandle, NoOpMetrics, TickerMetrics, noop_metrics};

mod runtime;
pub use runtime::{Filter, RuntimeClient, RuntimeError};

mod ticker;
pub use ticker::{MIN_TICK_INTERVAL, TickReport, Ticker, run_ticker_test_containers};

pub mod prelude {
    pub use crate::error::TickError;
    pub use crate::runtime::{Filter, RuntimeClient, RuntimeError};
    pub use crate::ticker::{Ticker, run_ticker_test_containers};
}
