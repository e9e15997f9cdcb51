// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recording of pattern decisions.

use std::time::Duration;

use opentelemetry::{
    InstrumentationScope, KeyValue,
    metrics::{Counter, Gauge, Histogram, Meter, MeterProvider},
};
use thread_aware::Arc;

use crate::{
    action::ActionKind,
    aspect::CacheName,
    telemetry::{CacheActivity, CacheOperation, CacheTelemetry, attributes},
};

const METER_NAME: &str = "cachewrap";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";
const EVENT_COUNT_NAME: &str = "cache.event.count";
const BACKEND_CALL_DURATION_NAME: &str = "cache.operation.duration_ns";
const SIZE_NAME: &str = "cache.size";

#[derive(Clone, Debug)]
pub(crate) struct CacheTelemetryInner {
    logging_enabled: bool,
    event_counter: Option<Counter<u64>>,
    operation_duration: Option<Histogram<f64>>,
    cache_size: Option<Gauge<u64>>,
}

impl CacheTelemetry {
    /// Creates a new telemetry sink.
    ///
    /// `logging_enabled` turns on structured `tracing` events; passing a
    /// [`Meter`] turns on the event counter, the backend call duration
    /// histogram, and the entry count gauge.
    #[must_use]
    pub fn new(logging_enabled: bool, meter: Option<&Meter>) -> Self {
        Self {
            inner: Arc::from_unaware(CacheTelemetryInner {
                logging_enabled,
                event_counter: meter.map(|m| {
                    m.u64_counter(EVENT_COUNT_NAME)
                        .with_description("Pattern decisions per aspect, action, backend call, and outcome")
                        .with_unit("{event}")
                        .build()
                }),
                operation_duration: meter.map(|m| {
                    m.f64_histogram(BACKEND_CALL_DURATION_NAME)
                        .with_description("Time spent in backend calls issued by an aspect")
                        .with_unit("ns")
                        .build()
                }),
                cache_size: meter.map(|m| {
                    m.u64_gauge(SIZE_NAME)
                        .with_description("Entries held by the backend after a write or eviction")
                        .with_unit("{entry}")
                        .build()
                }),
            }),
        }
    }

    /// Creates a sink that feeds the instruments of the given meter provider.
    ///
    /// The meter is scoped as `cachewrap` at this crate's version.
    #[must_use]
    pub fn with_meter_provider(logging_enabled: bool, provider: &dyn MeterProvider) -> Self {
        let scope = InstrumentationScope::builder(METER_NAME)
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_schema_url(SCHEMA_URL)
            .build();
        Self::new(logging_enabled, Some(&provider.meter_with_scope(scope)))
    }

    #[inline]
    pub(crate) fn record(
        &self,
        cache_name: CacheName,
        action: ActionKind,
        operation: CacheOperation,
        activity: CacheActivity,
        duration: Option<Duration>,
    ) {
        let attrs = [
            KeyValue::new(attributes::CACHE_NAME, cache_name),
            KeyValue::new(attributes::CACHE_ACTION_NAME, action.as_str()),
            KeyValue::new(attributes::CACHE_OPERATION_NAME, operation.as_str()),
            KeyValue::new(attributes::CACHE_ACTIVITY_NAME, activity.as_str()),
        ];

        if let Some(c) = &self.inner.event_counter {
            c.add(1, &attrs);
        }

        if let (Some(d), Some(h)) = (duration, &self.inner.operation_duration) {
            h.record(d.as_secs_f64() * 1e9, &attrs);
        }

        if self.inner.logging_enabled {
            Self::emit(cache_name, action, operation, activity, duration);
        }
    }

    #[inline]
    pub(crate) fn record_size(&self, cache_name: CacheName, size: u64) {
        let attrs = [KeyValue::new(attributes::CACHE_NAME, cache_name)];
        if let Some(g) = &self.inner.cache_size {
            g.record(size, &attrs);
        }
    }

    #[cfg_attr(not(any(feature = "logs", test)), expect(unused_variables, reason = "tracing is only linked with logs"))]
    fn emit(cache_name: CacheName, action: ActionKind, operation: CacheOperation, activity: CacheActivity, duration: Option<Duration>) {
        #[cfg(any(feature = "logs", test))]
        {
            use opentelemetry::logs::Severity;

            let action = action.as_str();
            let op = operation.as_str();
            let ev = activity.as_str();
            let duration_ns = duration.map(|d| d.as_nanos());

            // Field names must match the constants in attributes.rs.
            macro_rules! emit_event {
                ($level:ident) => {
                    tracing::$level!(
                        cache.name = cache_name,
                        cache.action = action,
                        cache.operation = op,
                        cache.activity = ev,
                        cache.duration_ns = ?duration_ns,
                        "cache.event"
                    )
                };
            }

            match activity.severity() {
                Severity::Error => emit_event!(error),
                Severity::Info => emit_event!(info),
                Severity::Debug => emit_event!(debug),
                _ => {}
            }
        }
    }
}
