//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalogue_refresh_total` (counter): refreshes by outcome
//! - `catalogue_refresh_duration_seconds` (histogram): refresh latency
//! - `catalogue_resources` (gauge): resources in the current snapshot
//! - `catalogue_url_patterns` (gauge): canonical patterns in the current snapshot
//! - `catalogue_diagnostics_total` (counter): build diagnostics by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::catalogue::CatalogueSnapshot;

/// Installs the Prometheus recorder and its scrape endpoint.
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_refresh_success(snapshot: &CatalogueSnapshot, start: Instant) {
    ::metrics::counter!("catalogue_refresh_total", "outcome" => "ok").increment(1);
    ::metrics::histogram!("catalogue_refresh_duration_seconds", "outcome" => "ok")
        .record(start.elapsed().as_secs_f64());
    ::metrics::gauge!("catalogue_resources").set(snapshot.resources.len() as f64);
    ::metrics::gauge!("catalogue_url_patterns").set(snapshot.urls.len() as f64);
    for diagnostic in &snapshot.diagnostics {
        ::metrics::counter!("catalogue_diagnostics_total", "kind" => diagnostic.kind.as_str())
            .increment(1);
    }
}

pub fn record_refresh_failure(start: Instant) {
    ::metrics::counter!("catalogue_refresh_total", "outcome" => "error").increment(1);
    ::metrics::histogram!("catalogue_refresh_duration_seconds", "outcome" => "error")
        .record(start.elapsed().as_secs_f64());
}
