//! Logging and request metrics for the EventMart portals
//!
//! Logging goes through `tracing`; [`init_with_config`] installs the
//! subscriber once per process. Request statistics are kept per API
//! operation (`admin.block_vendor`, `vendor.login`, ...) in a global
//! [`RequestStats`] registry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

static STATS: Lazy<RequestStats> = Lazy::new(RequestStats::new);

/// Identifies one process run in log lines
static RUN_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Text output goes to
/// stderr so command output on stdout stays machine-readable.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.show_target)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    tracing::debug!(run_id = %run_id(), version = env!("CARGO_PKG_VERSION"), "Logging ready");
    Ok(())
}

/// Id of this process run
pub fn run_id() -> &'static str {
    &RUN_ID
}

/// Subscriber settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// One JSON object per line instead of compact text
    pub json: bool,
    /// Include the module path of each event
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Preset for `--verbose`
    pub fn verbose() -> Self {
        Self {
            log_level: "debug".to_string(),
            show_target: true,
            ..Self::default()
        }
    }
}

/// Counters for one API operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    /// Requests that went out on the wire
    pub requests: u64,
    /// Requests that ended in an error
    pub failures: u64,
    /// Triggers that attached to a request already in flight
    pub joined: u64,
    /// Reads answered from the query cache
    pub cache_hits: u64,
    /// Summed latency of sent requests
    pub total_ms: f64,
    /// Slowest sent request
    pub max_ms: f64,
}

impl OperationStats {
    /// Mean latency of sent requests
    pub fn mean_ms(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_ms / self.requests as f64
        }
    }
}

/// Per-operation request statistics
#[derive(Debug)]
pub struct RequestStats {
    operations: Mutex<BTreeMap<String, OperationStats>>,
    started: Instant,
}

impl RequestStats {
    fn new() -> Self {
        Self {
            operations: Mutex::new(BTreeMap::new()),
            started: Instant::now(),
        }
    }

    fn update(&self, operation: &str, f: impl FnOnce(&mut OperationStats)) {
        let mut operations = self.operations.lock().unwrap_or_else(PoisonError::into_inner);
        f(operations.entry(operation.to_string()).or_default());
    }

    /// A request finished, successfully or not
    pub fn record_request(&self, operation: &str, elapsed: Duration, ok: bool) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.update(operation, |stats| {
            stats.requests += 1;
            if !ok {
                stats.failures += 1;
            }
            stats.total_ms += ms;
            stats.max_ms = stats.max_ms.max(ms);
        });
    }

    /// A trigger shared another caller's request
    pub fn record_joined(&self, operation: &str) {
        self.update(operation, |stats| stats.joined += 1);
    }

    /// A query page was served from cache
    pub fn record_cache_hit(&self, operation: &str) {
        self.update(operation, |stats| stats.cache_hits += 1);
    }

    /// Stats for one operation (zeroed when never seen)
    pub fn operation(&self, operation: &str) -> OperationStats {
        self.operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(operation)
            .cloned()
            .unwrap_or_default()
    }

    /// Everything recorded so far, as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let operations = self
            .operations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        serde_json::json!({
            "runId": run_id(),
            "uptimeSecs": self.started.elapsed().as_secs(),
            "operations": operations,
        })
    }
}

/// The process-wide registry
pub fn stats() -> &'static RequestStats {
    &STATS
}

/// Measures one request; recorded when finished or dropped
pub struct RequestTimer {
    operation: &'static str,
    started: Instant,
    done: bool,
}

impl RequestTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            operation,
            started: Instant::now(),
            done: false,
        }
    }

    /// Record the outcome and return the elapsed time
    pub fn finish(mut self, ok: bool) -> Duration {
        let elapsed = self.started.elapsed();
        stats().record_request(self.operation, elapsed, ok);
        self.done = true;
        elapsed
    }
}

impl Drop for RequestTimer {
    // A dropped request future never reports back; count it as failed
    fn drop(&mut self) {
        if !self.done {
            stats().record_request(self.operation, self.started.elapsed(), false);
        }
    }
}
