//! Logging and span timing.
//!
//! With the `tracing` feature the crate emits `tracing` events and spans and
//! [`init_tracing`] installs a formatting subscriber plus a layer that sums
//! the time spent in each span and remembers the largest `vertices` field the
//! span carried.  Without the feature every entry point here is
//! a no-op, so the rest of the crate can log unconditionally.

/// How much the formatting subscriber prints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogLevel {
    /// Only warnings and errors.
    #[default]
    Quiet,
    Info,
    Debug,
}

#[cfg(feature = "tracing")]
mod enabled {
    use std::{
        cell::RefCell,
        collections::BTreeMap,
        collections::HashMap,
        fmt,
        sync::Once,
        time::{Duration, Instant},
    };

    use tracing::field::{Field, Visit};
    use tracing_subscriber::{
        Layer, Registry, filter::LevelFilter, layer::Context, layer::SubscriberExt,
        registry::LookupSpan, util::SubscriberInitExt,
    };

    use super::LogLevel;

    /// Span field that carries the size of the graph being worked on.
    const VERTICES_FIELD: &str = "vertices";

    type ScopeTimings = BTreeMap<&'static str, MethodTiming>;

    thread_local! {
        static TIMING_SCOPES: RefCell<HashMap<TimingScope, ScopeTimings>> =
            RefCell::new(HashMap::new());
        static TIMING_SCOPE: RefCell<TimingScope> = const { RefCell::new(TimingScope::Query) };
    }

    /// Bucket that closed spans are charged to.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        /// Traversals and predicates called directly.
        Query,
        /// Everything run inside an exhaustive subset search.
        Search,
    }

    pub struct TimingScopeGuard {
        previous: TimingScope,
    }

    impl Drop for TimingScopeGuard {
        fn drop(&mut self) {
            TIMING_SCOPE.with(|scope| {
                *scope.borrow_mut() = self.previous;
            });
        }
    }

    /// Charges spans closed on this thread to `scope` until the guard drops.
    pub fn set_timing_scope(scope: TimingScope) -> TimingScopeGuard {
        let previous = TIMING_SCOPE.with(|current| current.replace(scope));
        TimingScopeGuard { previous }
    }

    /// Totals for every closed span with one name.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct MethodTiming {
        total: Duration,
        calls: usize,
        /// Largest `vertices` field seen on any of the spans.
        largest_graph: Option<u64>,
    }

    impl MethodTiming {
        fn add(&mut self, elapsed: Duration, vertices: Option<u64>) {
            self.total += elapsed;
            self.calls += 1;
            self.largest_graph = self.largest_graph.max(vertices);
        }
    }

    impl fmt::Display for MethodTiming {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?} ({}x", self.total, self.calls)?;
            if let Some(vertices) = self.largest_graph {
                write!(f, ", up to {vertices} vertices")?;
            }
            write!(f, ")")
        }
    }

    /// Stored in the extensions of each open span.
    struct OpenSpan {
        start: Instant,
        vertices: Option<u64>,
    }

    #[derive(Default)]
    struct VertexCount(Option<u64>);

    impl Visit for VertexCount {
        fn record_u64(&mut self, field: &Field, value: u64) {
            if field.name() == VERTICES_FIELD {
                self.0 = Some(value);
            }
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            if field.name() == VERTICES_FIELD {
                self.0 = u64::try_from(value).ok();
            }
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
    }

    struct TimingLayer;

    impl<S> Layer<S> for TimingLayer
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            id: &tracing::Id,
            ctx: Context<'_, S>,
        ) {
            if let Some(span) = ctx.span(id) {
                let mut count = VertexCount::default();
                attrs.record(&mut count);
                span.extensions_mut().insert(OpenSpan {
                    start: Instant::now(),
                    vertices: count.0,
                });
            }
        }

        fn on_close(&self, id: tracing::Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let name = span.metadata().name();
            if let Some(open) = span.extensions().get::<OpenSpan>() {
                let elapsed = open.start.elapsed();
                let scope = TIMING_SCOPE.with(|scope| *scope.borrow());
                TIMING_SCOPES.with(|totals| {
                    let mut totals = totals.borrow_mut();
                    let entries = totals.entry(scope).or_default();
                    entries.entry(name).or_default().add(elapsed, open.vertices);
                });
            }
        }
    }

    /// Installs the global subscriber.  Only the first call has any effect.
    pub fn init_tracing(level: LogLevel) {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let filter = match level {
                LogLevel::Quiet => LevelFilter::WARN,
                LogLevel::Info => LevelFilter::INFO,
                LogLevel::Debug => LevelFilter::DEBUG,
            };
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter);
            let _ = Registry::default()
                .with(TimingLayer)
                .with(fmt_layer)
                .try_init();
        });
    }

    /// Prints accumulated span timings to stderr, slowest first, with the
    /// largest graph each traced call saw.
    pub fn dump_method_timings() {
        for scope in [TimingScope::Query, TimingScope::Search] {
            eprintln!("{scope:?} timings (desc):");
            for line in scope_timing_lines(scope) {
                eprintln!("  {line}");
            }
        }
    }

    pub fn reset_method_timings() {
        TIMING_SCOPES.with(|totals| totals.borrow_mut().clear());
    }

    fn scope_timing_lines(scope: TimingScope) -> Vec<String> {
        TIMING_SCOPES.with(|totals| {
            let totals = totals.borrow();
            let Some(entries) = totals.get(&scope) else {
                return Vec::new();
            };
            let mut entries: Vec<_> = entries.iter().collect();
            entries.sort_by(|a, b| b.1.total.cmp(&a.1.total));
            entries
                .into_iter()
                .map(|(name, timing)| format!("{name}: {timing}"))
                .collect()
        })
    }

    pub(crate) use tracing::{debug, info_span, warn};

}

#[cfg(not(feature = "tracing"))]
mod disabled {
    use super::LogLevel;

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum TimingScope {
        Query,
        Search,
    }

    pub struct TimingScopeGuard;

    pub fn set_timing_scope(_scope: TimingScope) -> TimingScopeGuard {
        TimingScopeGuard
    }

    pub fn init_tracing(_level: LogLevel) {}

    pub fn dump_method_timings() {}

    pub fn reset_method_timings() {}

    macro_rules! noop_span {
        ($($args:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    macro_rules! noop_event {
        ($($args:tt)*) => {{}};
    }

    pub(crate) use {noop_event as debug, noop_event as warn, noop_span as info_span};

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

#[cfg(feature = "tracing")]
pub(crate) use enabled::{debug, info_span, warn};

#[cfg(not(feature = "tracing"))]
pub(crate) use disabled::{debug, info_span, warn};
