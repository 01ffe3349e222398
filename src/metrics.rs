//! Prometheus metrics for HTTP request counts and latency.
//!
//! Each [`HttpMetrics`] owns its own recorder instead of installing a
//! process-global one, so every router instance exports an independent
//! registry. The `metrics` macros are routed to it with
//! [`metrics::with_local_recorder`].

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram, with_local_recorder};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use tracing::debug;

// === Metric Name Constants ===

/// Completed requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Request latency histogram metric name.
pub const METRIC_HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Content type of the text exposition format.
pub const CONTENT_TYPE_LATEST: &str = "text/plain; version=0.0.4; charset=utf-8";

/// How often buffered histogram samples are folded into their buckets.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Default Prometheus latency buckets, in seconds.
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Request metrics backed by a dedicated Prometheus recorder.
pub struct HttpMetrics {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl HttpMetrics {
    /// Build the recorder and register metric descriptions.
    pub fn new() -> crate::Result<Self> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(METRIC_HTTP_REQUEST_DURATION.to_string()),
                &DEFAULT_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        with_local_recorder(&recorder, || {
            describe_counter!(METRIC_HTTP_REQUESTS, "Total HTTP requests");
            describe_histogram!(
                METRIC_HTTP_REQUEST_DURATION,
                "HTTP request latency in seconds"
            );
        });

        debug!("Metrics initialized");
        Ok(Self { recorder, handle })
    }

    /// Record one completed request.
    ///
    /// Never fails: a panic raised while recording is caught and dropped so
    /// that metrics can not break request handling.
    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            with_local_recorder(&self.recorder, || {
                histogram!(METRIC_HTTP_REQUEST_DURATION).record(elapsed.as_secs_f64());
                counter!(
                    METRIC_HTTP_REQUESTS,
                    "method" => method.to_string(),
                    "path" => path.to_string(),
                    "status" => status.to_string()
                )
                .increment(1);
            })
        }));
    }

    /// Fold buffered histogram samples into their buckets.
    ///
    /// The recorder spawns no background task, so this must be called on
    /// an interval ([`UPKEEP_INTERVAL`]) or samples accumulate until the
    /// next scrape.
    pub fn run_upkeep(&self) {
        self.handle.run_upkeep();
    }

    /// Render current state in Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Wall-clock timer for a single request.
#[derive(Debug, Clone, Copy)]
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    /// Start timing now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the timer was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
