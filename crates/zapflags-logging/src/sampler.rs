use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::callsite::Identifier;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Sampling policy: within each tick, let the first `first` records with a
/// given key through, then every `thereafter`-th one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub tick: Duration,
    pub first: u64,
    pub thereafter: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            first: 100,
            thereafter: 100,
        }
    }
}

#[derive(Debug)]
struct Counter {
    window_end: Instant,
    count: u64,
}

/// Per-key counters for one sampling policy.
#[derive(Debug)]
pub(crate) struct Counters<K> {
    config: SamplingConfig,
    counters: HashMap<K, Counter>,
}

impl<K: Hash + Eq> Counters<K> {
    pub(crate) fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            counters: HashMap::new(),
        }
    }

    pub(crate) fn admit(&mut self, key: K, now: Instant) -> bool {
        let tick = self.config.tick;
        let counter = self.counters.entry(key).or_insert(Counter {
            window_end: now + tick,
            count: 0,
        });
        if now >= counter.window_end {
            counter.window_end = now + tick;
            counter.count = 0;
        }
        counter.count += 1;

        let n = counter.count;
        if n <= self.config.first {
            return true;
        }
        self.config.thereafter > 0 && (n - self.config.first) % self.config.thereafter == 0
    }
}

/// Layer that drops repetitive records before they reach the encoder.
///
/// Records are keyed by callsite and level, so every `info!` statement in the
/// program gets its own budget.
#[derive(Debug)]
pub struct Sampler {
    counters: Mutex<Counters<(Identifier, Level)>>,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            counters: Mutex::new(Counters::new(config)),
        }
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

impl<S: Subscriber> Layer<S> for Sampler {
    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        let metadata = event.metadata();
        let key = (metadata.callsite(), *metadata.level());
        match self.counters.lock() {
            Ok(mut counters) => counters.admit(key, Instant::now()),
            // A panic elsewhere must not silence logging.
            Err(_) => true,
        }
    }
}
