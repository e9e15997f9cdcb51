// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Helpers for asserting on emitted telemetry.

use std::io::Write;
use std::sync::{Arc, Mutex};

use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, Metric, MetricData, ResourceMetrics, ScopeMetrics};
use opentelemetry_sdk::metrics::{InMemoryMetricExporter, SdkMeterProvider};
use tracing_subscriber::fmt::MakeWriter;

/// Collects metrics into memory so tests can inspect their attributes.
#[derive(Debug)]
pub(crate) struct MetricTester {
    exporter: InMemoryMetricExporter,
    provider: SdkMeterProvider,
}

impl MetricTester {
    #[must_use]
    pub fn new() -> Self {
        let exporter = InMemoryMetricExporter::default();

        Self {
            provider: SdkMeterProvider::builder().with_periodic_exporter(exporter.clone()).build(),
            exporter,
        }
    }

    #[must_use]
    pub fn meter_provider(&self) -> &SdkMeterProvider {
        &self.provider
    }

    #[must_use]
    pub fn collect_attributes(&self) -> Vec<KeyValue> {
        self.provider.force_flush().expect("flushing metrics failed");

        self.exporter
            .get_finished_metrics()
            .expect("reading exported metrics failed")
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(ScopeMetrics::metrics)
            .flat_map(attributes_of)
            .collect()
    }

    /// Returns `(scope, instrument)` name pairs of everything exported so far.
    #[must_use]
    pub fn collect_instruments(&self) -> Vec<(String, String)> {
        self.provider.force_flush().expect("flushing metrics failed");

        self.exporter
            .get_finished_metrics()
            .expect("reading exported metrics failed")
            .iter()
            .flat_map(ResourceMetrics::scope_metrics)
            .flat_map(|scope| {
                scope
                    .metrics()
                    .map(|metric| (scope.scope().name().to_string(), metric.name().to_string()))
            })
            .collect()
    }

    pub fn assert_attributes_contain(&self, expected: &[KeyValue]) {
        let attributes = self.collect_attributes();

        for attr in expected {
            assert!(
                attributes.contains(attr),
                "attribute {attr:?} not found in collected attributes: {attributes:?}"
            );
        }
    }
}

macro_rules! data_point_attributes {
    ($data:expr) => {
        match $data {
            MetricData::Gauge(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect::<Vec<_>>(),
            MetricData::Sum(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect::<Vec<_>>(),
            MetricData::Histogram(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect::<Vec<_>>(),
            MetricData::ExponentialHistogram(data) => data.data_points().flat_map(|v| v.attributes().cloned()).collect::<Vec<_>>(),
        }
    };
}

fn attributes_of(metric: &Metric) -> Vec<KeyValue> {
    match metric.data() {
        AggregatedMetrics::F64(data) => data_point_attributes!(data),
        AggregatedMetrics::U64(data) => data_point_attributes!(data),
        AggregatedMetrics::I64(data) => data_point_attributes!(data),
    }
}

/// Captures formatted `tracing` output into a shared buffer.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("log buffer poisoned")).to_string()
    }

    pub fn assert_contains(&self, expected: &str) {
        let output = self.output();
        assert!(
            output.contains(expected),
            "log output does not contain '{expected}', got:\n{output}"
        );
    }

    /// Subscriber writing into this buffer; install it with `set_default()`.
    #[must_use]
    pub fn subscriber(&self) -> impl tracing::Subscriber {
        use tracing_subscriber::layer::SubscriberExt;
        tracing_subscriber::registry().with(tracing_subscriber::fmt::layer().with_writer(self.clone()).with_ansi(false))
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

pub(crate) struct LogCaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().expect("log buffer poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
