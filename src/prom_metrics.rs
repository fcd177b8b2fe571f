//! # Prometheus Metrics — Exposition for the HTTP Service
//!
//! Exposes computation metrics in the Prometheus text exposition format for
//! scraping by Prometheus, Grafana Agent, or any OpenMetrics-compatible
//! collector.
//!
//! ## Metrics Exposed
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `mathwork_computations_total` | Counter | `work_type`, `outcome` | Dispatched computations |
//! | `mathwork_computation_seconds` | Histogram | `work_type` | Handler wall time |
//! | `mathwork_cache_hits_total` | Counter | | Results served from the cache |
//! | `mathwork_cache_misses_total` | Counter | | Results computed fresh |
//!
//! `outcome` is `success` or the error kind (`invalid_input`,
//! `computation_overflow`). Every unrecognized work type shares the
//! `work_type="unrecognized"` label, so the series count is bounded by the
//! catalog size.
//!
//! The registry itself records nothing: the server updates these after each
//! dispatch, and `/metrics` renders the current state on each scrape.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

use crate::registry::ComputationResult;
use crate::work_type::WorkTypeKey;

/// Label value shared by every key outside the catalog.
pub const UNRECOGNIZED_LABEL: &str = "unrecognized";

#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct ComputationLabel {
    pub work_type: String,
    pub outcome: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, prometheus_client::encoding::EncodeLabelSet)]
pub struct WorkTypeLabel {
    pub work_type: String,
}

/// 100 µs up to ~26 s in ×4 steps.
fn computation_histogram() -> Histogram {
    Histogram::new(exponential_buckets(0.0001, 4.0, 10))
}

/// Thread-safe metrics registry for the computation service.
///
/// All fields use atomic types and are safe to update from any thread or
/// async task.
pub struct Metrics {
    pub registry: Registry,
    pub computations: Family<ComputationLabel, Counter>,
    pub computation_seconds: Family<WorkTypeLabel, Histogram, fn() -> Histogram>,
    pub cache_hits: Counter,
    pub cache_misses: Counter,
}

impl Metrics {
    /// Create a new metrics registry with all service metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let computations = Family::<ComputationLabel, Counter>::default();
        registry.register(
            "mathwork_computations",
            "Computations dispatched, by work type and outcome",
            computations.clone(),
        );

        let computation_seconds = Family::<WorkTypeLabel, Histogram, fn() -> Histogram>::new_with_constructor(
            computation_histogram,
        );
        registry.register(
            "mathwork_computation_seconds",
            "Computation wall time in seconds, by work type",
            computation_seconds.clone(),
        );

        let cache_hits = Counter::default();
        registry.register(
            "mathwork_cache_hits",
            "Computation results served from the result cache",
            cache_hits.clone(),
        );

        let cache_misses = Counter::default();
        registry.register(
            "mathwork_cache_misses",
            "Computation results not found in the result cache",
            cache_misses.clone(),
        );

        Self {
            registry,
            computations,
            computation_seconds,
            cache_hits,
            cache_misses,
        }
    }

    /// Count one finished dispatch and observe its duration.
    pub fn record(&self, result: &ComputationResult) {
        let outcome = match &result.error {
            None => "success",
            Some(e) => e.kind.as_str(),
        };
        let work_type = match WorkTypeKey::parse(&result.work_type) {
            WorkTypeKey::Known(w) => w.as_str(),
            WorkTypeKey::Unrecognized(_) => UNRECOGNIZED_LABEL,
        };
        self.computations
            .get_or_create(&ComputationLabel {
                work_type: work_type.to_string(),
                outcome: outcome.to_string(),
            })
            .inc();
        self.computation_seconds
            .get_or_create(&WorkTypeLabel {
                work_type: work_type.to_string(),
            })
            .observe(result.elapsed_time);
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        encode(&mut buf, &self.registry).expect("encoding metrics should not fail");
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::registry::{Parameters, Registry as WorkRegistry};

    #[test]
    fn metrics_encode_returns_valid_text() {
        let m = Metrics::new();
        m.cache_hits.inc();
        let output = m.encode();
        assert!(output.contains("mathwork_cache_hits_total 1"));
        assert!(output.contains("mathwork_cache_misses_total 0"));
    }

    #[test]
    fn record_labels_by_outcome() {
        let m = Metrics::new();
        let reg = WorkRegistry::new(&EngineConfig::default());
        m.record(&reg.dispatch("twin-primes", 1, &Parameters::new()));
        m.record(&reg.dispatch("twin-primes", 0, &Parameters::new()));

        let output = m.encode();
        assert!(output.contains("mathwork_computations_total"));
        assert!(output.contains("outcome=\"success\""));
        assert!(output.contains("outcome=\"invalid_input\""));
        assert!(output.contains("mathwork_computation_seconds_bucket"));
        assert!(output.contains("work_type=\"twin-primes\""));
    }

    #[test]
    fn unrecognized_keys_share_one_series() {
        let m = Metrics::new();
        let reg = WorkRegistry::new(&EngineConfig::default());
        for i in 0..50 {
            m.record(&reg.dispatch(&format!("made-up-key-{}", i), 1, &Parameters::new()));
        }
        m.record(&reg.dispatch("made-up-key-0", 0, &Parameters::new()));

        let output = m.encode();
        let counter_series = output
            .lines()
            .filter(|l| l.starts_with("mathwork_computations_total{"))
            .count();
        assert_eq!(counter_series, 2);
        let count_series = output
            .lines()
            .filter(|l| l.starts_with("mathwork_computation_seconds_count{"))
            .count();
        assert_eq!(count_series, 1);
        assert!(output.contains("work_type=\"unrecognized\""));
        assert!(!output.contains("made-up-key"));
        assert_eq!(
            m.computations
                .get_or_create(&ComputationLabel {
                    work_type: UNRECOGNIZED_LABEL.into(),
                    outcome: "success".into(),
                })
                .get(),
            50
        );
    }
}
