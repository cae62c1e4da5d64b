//! Metrics collection.
//!
//! # Responsibilities
//! - Define router metrics (navigations, fetches, cache hits, failures)
//! - Record through the `metrics` facade; the host installs a recorder
//!
//! # Metrics
//! - `router_navigations_total` (counter): by outcome
//! - `router_fragment_fetches_total` (counter): by artifact
//! - `router_cache_hits_total` (counter)
//! - `router_load_failures_total` (counter): by failure kind
//! - `router_hook_failures_total` (counter): by hook
//! - `router_cached_fragments` (gauge): resident bundles
//!
//! # Design Decisions
//! - No recorder installed here; without one these calls are no-ops

use metrics::{counter, gauge};

use crate::error::{Artifact, FailureKind};

pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_fetch(artifact: Artifact) {
    counter!("router_fragment_fetches_total", "artifact" => artifact.as_str()).increment(1);
}

pub fn record_cache_hit() {
    counter!("router_cache_hits_total").increment(1);
}

pub fn record_load_failure(kind: FailureKind) {
    counter!("router_load_failures_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_hook_failure(hook: &'static str) {
    counter!("router_hook_failures_total", "hook" => hook).increment(1);
}

pub fn record_cached_fragments(count: usize) {
    gauge!("router_cached_fragments").set(count as f64);
}
