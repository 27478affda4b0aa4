//! Metrics sink boundary.
//!
//! Transform logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between transform logic
//! and the per-thread metrics state.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// TransformKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransformKind {
    ToItem,
    FromItem,
    AffectedIndexes,
    UpdateItem,
    Key,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    Transform {
        kind: TransformKind,
        entity: &'a str,
    },
    KeyFields {
        entity: &'a str,
        written: u64,
        omitted: u64,
    },
    SchemaMismatch {
        entity: &'a str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

/// GlobalMetricsSink
/// Default sink that writes into the per-thread metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::Transform { kind, entity } => {
                metrics::with_state_mut(|m| {
                    let entry = m.entities.entry(entity.to_string()).or_default();

                    match kind {
                        TransformKind::ToItem => {
                            m.ops.to_item_calls = m.ops.to_item_calls.saturating_add(1);
                            entry.to_item_calls = entry.to_item_calls.saturating_add(1);
                        }
                        TransformKind::FromItem => {
                            m.ops.from_item_calls = m.ops.from_item_calls.saturating_add(1);
                            entry.from_item_calls = entry.from_item_calls.saturating_add(1);
                        }
                        TransformKind::AffectedIndexes => {
                            m.ops.affected_index_calls =
                                m.ops.affected_index_calls.saturating_add(1);
                            entry.affected_index_calls =
                                entry.affected_index_calls.saturating_add(1);
                        }
                        TransformKind::UpdateItem => {
                            m.ops.update_item_calls = m.ops.update_item_calls.saturating_add(1);
                            entry.update_item_calls = entry.update_item_calls.saturating_add(1);
                        }
                        TransformKind::Key => {
                            m.ops.key_calls = m.ops.key_calls.saturating_add(1);
                            entry.key_calls = entry.key_calls.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::KeyFields {
                entity,
                written,
                omitted,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.key_fields_written = m.ops.key_fields_written.saturating_add(written);
                    m.ops.key_fields_omitted = m.ops.key_fields_omitted.saturating_add(omitted);

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.key_fields_written = entry.key_fields_written.saturating_add(written);
                    entry.key_fields_omitted = entry.key_fields_omitted.saturating_add(omitted);
                });
            }

            MetricsEvent::SchemaMismatch { entity } => {
                metrics::with_state_mut(|m| {
                    m.ops.schema_mismatches = m.ops.schema_mismatches.saturating_add(1);

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.schema_mismatches = entry.schema_mismatches.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a live `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, unwinding included.
        // - `record` is synchronous and never keeps `ptr` past this call.
        // - Only a shared reference is materialized, matching the original borrow.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's metrics.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - The erased pointer is installed only for the dynamic scope of `f`.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` dereferences synchronously and never persists the pointer.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that records one transform call and, on drop, the key fields
/// it wrote or left out. Finish accounting happens even on early return.

pub(crate) struct Span<'a> {
    entity: &'a str,
    written: u64,
    omitted: u64,
}

impl<'a> Span<'a> {
    #[must_use]
    pub(crate) fn new(kind: TransformKind, entity: &'a str) -> Self {
        record(MetricsEvent::Transform { kind, entity });

        Self {
            entity,
            written: 0,
            omitted: 0,
        }
    }

    pub(crate) const fn key_written(&mut self) {
        self.written = self.written.saturating_add(1);
    }

    pub(crate) const fn key_omitted(&mut self) {
        self.omitted = self.omitted.saturating_add(1);
    }
}

impl Drop for Span<'_> {
    fn drop(&mut self) {
        if self.written == 0 && self.omitted == 0 {
            return;
        }

        record(MetricsEvent::KeyFields {
            entity: self.entity,
            written: self.written,
            omitted: self.omitted,
        });
    }
}
