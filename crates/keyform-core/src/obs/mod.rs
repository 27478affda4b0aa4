//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Transforms never log. Everything they report flows through
//! `MetricsEvent` into the active `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, TransformKind, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
