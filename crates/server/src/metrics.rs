//! Prometheus metrics for the helpdesk server.
//!
//! HTTP and WebSocket traffic are counted as they happen. Ticket totals by
//! status are refreshed from the store each time `/metrics` is scraped.

use helpdesk_core::{TicketFilter, TicketStatus};
use once_cell::sync::Lazy;
use prometheus::{
    core::Collector, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    IntGaugeVec, Opts, Registry, TextEncoder,
};
use regex_lite::Regex;
use tracing::error;

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "helpdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("helpdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "helpdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// WebSocket Metrics
// =============================================================================

/// Active WebSocket connections.
pub static WS_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "helpdesk_ws_connections_active",
        "Number of active WebSocket connections",
    )
    .unwrap()
});

/// Total WebSocket connections (cumulative).
pub static WS_CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "helpdesk_ws_connections_total",
        "Total WebSocket connections since startup",
    )
    .unwrap()
});

/// WebSocket messages sent by type.
pub static WS_MESSAGES_SENT: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("helpdesk_ws_messages_sent_total", "WebSocket messages sent"),
        &["type"],
    )
    .unwrap()
});

/// WebSocket lag events (when client falls behind).
pub static WS_LAG_EVENTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "helpdesk_ws_lag_events_total",
        "WebSocket lag events (client fell behind)",
    )
    .unwrap()
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets by current status (collected dynamically).
pub static TICKETS_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("helpdesk_tickets_by_status", "Current ticket count by status"),
        &["status"],
    )
    .unwrap()
});

/// Ticket status transitions made through edits.
pub static TICKET_STATUS_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "helpdesk_ticket_status_transitions_total",
            "Ticket status transitions",
        ),
        &["from_status", "to_status"],
    )
    .unwrap()
});

/// Tickets created total.
pub static TICKETS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "helpdesk_tickets_created_total",
        "Total tickets created since startup",
    )
    .unwrap()
});

/// Tickets deleted total.
pub static TICKETS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "helpdesk_tickets_deleted_total",
        "Total tickets deleted since startup",
    )
    .unwrap()
});

/// Ratings accepted total.
pub static TICKETS_RATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "helpdesk_tickets_rated_total",
        "Total ratings accepted since startup",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn Collector>> = vec![
        // HTTP
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        // WebSocket
        Box::new(WS_CONNECTIONS_ACTIVE.clone()),
        Box::new(WS_CONNECTIONS_TOTAL.clone()),
        Box::new(WS_MESSAGES_SENT.clone()),
        Box::new(WS_LAG_EVENTS.clone()),
        // Tickets
        Box::new(TICKETS_BY_STATUS.clone()),
        Box::new(TICKET_STATUS_TRANSITIONS.clone()),
        Box::new(TICKETS_CREATED_TOTAL.clone()),
        Box::new(TICKETS_DELETED_TOTAL.clone()),
        Box::new(TICKETS_RATED_TOTAL.clone()),
    ];

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            error!("Failed to register metric: {}", e);
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Refresh gauges that mirror the store before a scrape.
pub fn collect_dynamic_metrics(state: &AppState) {
    let ticket_store = state.ticket_store();
    for status in TicketStatus::ALL {
        let filter = TicketFilter::new().with_status(status);
        match ticket_store.count(&filter) {
            Ok(count) => TICKETS_BY_STATUS
                .with_label_values(&[status.label()])
                .set(count as i64),
            Err(e) => error!("Failed to count {} tickets: {}", status, e),
        }
    }
}

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .unwrap()
});

static NUMERIC_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace ticket ids with placeholders).
pub fn normalize_path(path: &str) -> String {
    let result = UUID_SEGMENT.replace_all(path, "{id}");
    let result = NUMERIC_SEGMENT.replace_all(&result, "/{id}$1");
    result.into_owned()
}
