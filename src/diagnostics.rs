//! Diagnostic side channel.
//!
//! stdout carries protocol traffic only. Components receive an
//! `Arc<dyn Diagnostics>` at construction instead of writing to a global
//! logger, so tests can swap in a silent or recording implementation.

use tracing_subscriber::EnvFilter;

/// Sink for human-readable diagnostic lines.
pub trait Diagnostics: Send + Sync {
    fn info(&self, component: &'static str, message: &str);
    fn warn(&self, component: &'static str, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, component: &'static str, message: &str) {
        tracing::info!(component, "{message}");
    }

    fn warn(&self, component: &'static str, message: &str) {
        tracing::warn!(component, "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn info(&self, _component: &'static str, _message: &str) {}
    fn warn(&self, _component: &'static str, _message: &str) {}
}

/// Install a timestamped stderr subscriber. Filter comes from `RUST_LOG`,
/// falling back to `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
