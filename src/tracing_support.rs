//! Logging and span timing.
//!
//! With the `tracing` feature (the default) the log macros used throughout the
//! crate are the `tracing` ones, and [`init_tracing`] installs a subscriber
//! that prints events and accumulates per-span wall time.  Without the
//! feature every macro expands to nothing.

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        collections::BTreeMap,
        sync::{Mutex, Once},
        time::{Duration, Instant},
    };

    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{
        Layer, Registry, layer::Context, layer::SubscriberExt, registry::LookupSpan,
        util::SubscriberInitExt,
    };

    static SPAN_TIMINGS: Mutex<BTreeMap<&'static str, (Duration, usize)>> =
        Mutex::new(BTreeMap::new());

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            _attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(Instant::now());
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(start) = span.extensions().get::<Instant>().copied() else {
                return;
            };
            if let Ok(mut totals) = SPAN_TIMINGS.lock() {
                let entry = totals
                    .entry(span.metadata().name())
                    .or_insert((Duration::ZERO, 0));
                entry.0 += start.elapsed();
                entry.1 += 1;
            }
        }
    }

    /// Installs the global subscriber once: formatted events at `DEBUG` and
    /// above on the test-aware writer, plus span timing.
    pub fn init_tracing() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let fmt = tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_filter(LevelFilter::DEBUG);
            let _ = Registry::default().with(TimingLayer).with(fmt).try_init();
        });
    }

    /// Returns `(span name, total time, count)` for every closed span,
    /// slowest first.
    pub fn span_timings() -> Vec<(&'static str, Duration, usize)> {
        let Ok(totals) = SPAN_TIMINGS.lock() else {
            return Vec::new();
        };
        let mut entries: Vec<_> = totals
            .iter()
            .map(|(name, (total, count))| (*name, *total, *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub use tracing::{debug, info_span, trace, warn};
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use std::time::Duration;

    pub fn init_tracing() {}

    pub fn span_timings() -> Vec<(&'static str, Duration, usize)> {
        Vec::new()
    }

    macro_rules! noop_event {
        ($($tt:tt)*) => {{}};
    }

    macro_rules! noop_span {
        ($($tt:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    pub(crate) use noop_event as debug;
    pub(crate) use noop_event as trace;
    pub(crate) use noop_event as warn;
    pub(crate) use noop_span as info_span;

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
