use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use futures::future;
use reqwest::Method;
use tracing::{debug, warn};

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::DoctorSummary;

/// Fans one backend search request out per resolved term and merges the
/// outcomes into a single deduplicated list.
///
/// A failed term fetch is logged and contributes nothing; it is never
/// retried here and never surfaces to the caller. The service also tracks a
/// search generation per client so that a response arriving after that same
/// client started a newer search is discarded instead of overwriting fresher
/// results. Distinct clients never supersede one another.
pub struct SearchService {
    backend: BackendClient,
    generations: Mutex<HashMap<String, u64>>,
}

impl SearchService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
            generations: Mutex::new(HashMap::new()),
        }
    }

    fn generations(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // A poisoned counter table is still usable; generations only grow.
        self.generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn fetch_term(&self, term: &str, city: &str) -> Result<Vec<DoctorSummary>> {
        let mut query: Vec<(&str, &str)> = vec![("term", term)];
        if !city.is_empty() {
            query.push(("city", city));
        }
        self.backend
            .request_with_query(Method::GET, "/doctors/search", &query, None, None)
            .await
    }

    /// Run one aggregation pass. All term fetches start concurrently so the
    /// alias fan-out does not multiply latency; the join tolerates any
    /// subset of them failing.
    pub async fn search(&self, terms: &[String], city: &str) -> Vec<DoctorSummary> {
        let fetches = terms.iter().map(|term| self.fetch_term(term, city));
        let outcomes = future::join_all(fetches).await;
        merge_outcomes(terms, outcomes)
    }

    /// Like `search`, but returns None when `client` started another search
    /// while this one was in flight. Stale outcomes must not reach that
    /// client's UI; searches from other clients are unaffected.
    pub async fn search_latest(
        &self,
        client: &str,
        terms: &[String],
        city: &str,
    ) -> Option<Vec<DoctorSummary>> {
        let generation = {
            let mut generations = self.generations();
            let current = generations.entry(client.to_string()).or_insert(0);
            *current += 1;
            *current
        };

        let merged = self.search(terms, city).await;

        if self.generations().get(client) != Some(&generation) {
            debug!(
                "Discarding superseded search for client {} (generation {})",
                client, generation
            );
            return None;
        }
        Some(merged)
    }
}

/// Merge per-term outcomes into one list, unique by doctor id.
///
/// Outcomes are walked in the order the terms were issued, never in
/// completion order, and each outcome's records keep their backend order.
/// The result is therefore a pure function of the inputs, independent of
/// network timing.
pub fn merge_outcomes(
    terms: &[String],
    outcomes: Vec<Result<Vec<DoctorSummary>>>,
) -> Vec<DoctorSummary> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for (term, outcome) in terms.iter().zip(outcomes) {
        match outcome {
            Ok(records) => {
                for record in records {
                    if seen.insert(record.id) {
                        merged.push(record);
                    }
                }
            }
            Err(e) => {
                warn!("Search fetch for term '{}' failed: {}", term, e);
            }
        }
    }

    merged
}
