//! Logging setup.
//!
//! The harness logs through `tracing`. The stores log through the `log`
//! facade; [`StoreLogBridge`] forwards those records into `tracing` under the
//! [`STORE_LOG_TARGET`] target so the subscriber's filter decides what is
//! shown. During a run the bridge itself only passes errors.

use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tracing_subscriber::EnvFilter;

use crate::config::BenchConfig;

pub const STORE_LOG_TARGET: &str = "store_lib";

static BRIDGE: Once = Once::new();

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(config: &BenchConfig) {
    let filter = EnvFilter::builder().parse_lossy(&config.log_filter);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Route `log` records from the stores into `tracing`, errors only.
pub fn install_store_log_bridge() {
    BRIDGE.call_once(|| {
        let bridge = StoreLogBridge::new(LevelFilter::Error);
        if log::set_boxed_logger(Box::new(bridge)).is_ok() {
            log::set_max_level(LevelFilter::Error);
        }
    });
}

pub struct StoreLogBridge {
    max_level: LevelFilter,
}

impl StoreLogBridge {
    pub fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }
}

/// Severity a store record is re-emitted at. Store `info` is demoted to debug.
pub fn bridged_level(level: Level) -> tracing::Level {
    match level {
        Level::Error => tracing::Level::ERROR,
        Level::Warn => tracing::Level::WARN,
        Level::Info | Level::Debug => tracing::Level::DEBUG,
        Level::Trace => tracing::Level::TRACE,
    }
}

impl Log for StoreLogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let message = message.trim_matches('\n');
        let namespace = record.target();

        let level = bridged_level(record.level());
        if level == tracing::Level::ERROR {
            tracing::error!(target: STORE_LOG_TARGET, { "code.namespace" = namespace }, "{message}");
        } else if level == tracing::Level::WARN {
            tracing::warn!(target: STORE_LOG_TARGET, { "code.namespace" = namespace }, "{message}");
        } else if level == tracing::Level::DEBUG {
            tracing::debug!(target: STORE_LOG_TARGET, { "code.namespace" = namespace }, "{message}");
        } else {
            tracing::trace!(target: STORE_LOG_TARGET, { "code.namespace" = namespace }, "{message}");
        }
    }

    fn flush(&self) {}
}
