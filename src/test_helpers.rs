//! Shared test doubles for the retriever and checkpoint seams.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::checkpoint::CheckpointSink;
use crate::error::{Error, Result, RetrievalError};
use crate::retrieval::Retriever;
use crate::types::{CategoryMapping, CategoryMappings, IdCollection, Outcome, PdbId, Retrieval};

/// Retriever that answers from a fixed script.
///
/// Identifiers without a script entry fail as if the server returned 404.
#[derive(Default)]
pub(crate) struct ScriptedRetriever {
    script: HashMap<PdbId, (Option<Retrieval>, Duration)>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRetriever {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn complete(self, id: &str) -> Self {
        self.scripted(id, Some(Retrieval::Complete), Duration::ZERO)
    }

    pub(crate) fn incomplete(self, id: &str) -> Self {
        self.scripted(id, Some(Retrieval::Incomplete), Duration::ZERO)
    }

    pub(crate) fn failing(self, id: &str) -> Self {
        self.scripted(id, None, Duration::ZERO)
    }

    /// Script an answer that only arrives after `delay`
    pub(crate) fn scripted(
        mut self,
        id: &str,
        answer: Option<Retrieval>,
        delay: Duration,
    ) -> Self {
        self.script.insert(PdbId::from(id), (answer, delay));
        self
    }

    /// Total number of retrieve calls so far
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of retrieve calls observed running at once
    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Retriever for ScriptedRetriever {
    async fn retrieve(&self, id: &PdbId) -> std::result::Result<Retrieval, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (answer, delay) = self
            .script
            .get(id)
            .cloned()
            .unwrap_or((None, Duration::ZERO));
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answer.ok_or_else(|| RetrievalError::Status {
            status: 404,
            url: format!("http://scripted.test/{id}.pdb"),
        })
    }
}

/// Checkpoint sink that keeps every write in memory.
#[derive(Default)]
pub(crate) struct RecordingSink {
    writes: Mutex<Vec<(Outcome, CategoryMapping)>>,
    fail: bool,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A sink whose every save fails
    pub(crate) fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Every individual save, in order
    pub(crate) fn writes(&self) -> Vec<(Outcome, CategoryMapping)> {
        self.writes.lock().unwrap().clone()
    }

    /// Full three-mapping snapshots, reassembled from consecutive saves
    pub(crate) fn snapshots(&self) -> Vec<CategoryMappings> {
        self.writes()
            .chunks(Outcome::ALL.len())
            .map(|chunk| {
                let mut snapshot = CategoryMappings::default();
                for (outcome, mapping) in chunk {
                    match outcome {
                        Outcome::Complete => snapshot.complete = mapping.clone(),
                        Outcome::Incomplete => snapshot.incomplete = mapping.clone(),
                        Outcome::NotRetrievable => snapshot.not_downloadable = mapping.clone(),
                    }
                }
                snapshot
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl CheckpointSink for RecordingSink {
    async fn save(&self, outcome: Outcome, mapping: &CategoryMapping) -> Result<()> {
        if self.fail {
            return Err(Error::CheckpointWrite {
                path: format!("memory://{outcome}").into(),
                reason: "sink configured to fail".to_string(),
            });
        }
        self.writes.lock().unwrap().push((outcome, mapping.clone()));
        Ok(())
    }
}

/// Build a collection from `(group, ids)` pairs
pub(crate) fn collection(groups: &[(&str, &[&str])]) -> IdCollection {
    groups
        .iter()
        .map(|(group, ids)| {
            (
                group.to_string(),
                ids.iter().map(|id| PdbId::from(*id)).collect(),
            )
        })
        .collect()
}

/// Shorthand for a list of identifiers
pub(crate) fn ids(raw: &[&str]) -> Vec<PdbId> {
    raw.iter().map(|id| PdbId::from(*id)).collect()
}
