// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use tick::Clock;

use crate::{
    action::ActionKind,
    aspect::CacheName,
    telemetry::{CacheActivity, CacheOperation, CacheTelemetry},
};

/// Result of a timed async operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimedResult<R> {
    pub result: R,
    pub duration: Duration,
}

pub(crate) trait ClockExt {
    /// Times an async operation and returns both its output and the elapsed duration.
    fn timed_async<F, R>(&self, f: F) -> impl Future<Output = TimedResult<R>>
    where
        F: Future<Output = R>;
}

impl ClockExt for Clock {
    async fn timed_async<F, R>(&self, f: F) -> TimedResult<R>
    where
        F: Future<Output = R>,
    {
        let stopwatch = self.stopwatch();
        let result = f.await;
        TimedResult {
            result,
            duration: stopwatch.elapsed(),
        }
    }
}

pub(crate) trait CacheTelemetryExt {
    fn record(&self, name: CacheName, action: ActionKind, operation: CacheOperation, activity: CacheActivity, duration: Duration);

    fn record_size(&self, name: CacheName, size: u64);
}

impl CacheTelemetryExt for Option<CacheTelemetry> {
    #[allow(unused_variables, reason = "No-op when telemetry is disabled")]
    fn record(&self, name: CacheName, action: ActionKind, operation: CacheOperation, activity: CacheActivity, duration: Duration) {
        #[cfg(any(feature = "logs", feature = "metrics", test))]
        if let Some(t) = self {
            t.record(name, action, operation, activity, Some(duration));
        }
    }

    #[allow(unused_variables, reason = "No-op when telemetry is disabled")]
    fn record_size(&self, name: CacheName, size: u64) {
        #[cfg(any(feature = "logs", feature = "metrics", test))]
        if let Some(t) = self {
            t.record_size(name, size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn timed_async_measures_clock_time() {
        block_on(async {
            let control = tick::ClockControl::new();
            let clock = control.to_clock();

            let timed = clock
                .timed_async(async {
                    control.advance(Duration::from_millis(250));
                    "done"
                })
                .await;

            assert_eq!(timed.result, "done");
            assert_eq!(timed.duration, Duration::from_millis(250));
        });
    }

    #[test]
    fn missing_telemetry_is_silent() {
        use crate::telemetry::testing::LogCapture;

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let telemetry: Option<CacheTelemetry> = None;
        telemetry.record(
            "cache",
            ActionKind::Evict,
            CacheOperation::Flush,
            CacheActivity::Flushed,
            Duration::from_millis(1),
        );
        telemetry.record_size("cache", 42);

        assert!(capture.output().is_empty());
    }

    #[test]
    fn enabled_telemetry_logs_through_option() {
        use crate::telemetry::testing::LogCapture;

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let telemetry = Some(CacheTelemetry::new(true, None));
        telemetry.record(
            "cache",
            ActionKind::Cacheable,
            CacheOperation::Set,
            CacheActivity::Stored,
            Duration::from_millis(1),
        );

        capture.assert_contains(CacheActivity::Stored.as_str());
    }
}
