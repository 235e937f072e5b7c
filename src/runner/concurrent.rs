//! Concurrent mode: bounded worker pool feeding a single aggregating consumer.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::classifier::classify;
use crate::retrieval::Retriever;
use crate::types::{CategoryMappings, IdCollection, Outcome, PdbId};

use super::BatchRunner;

impl BatchRunner {
    /// Classify every identifier on its own task, at most `max_concurrent` at once.
    ///
    /// Tasks own their inputs and hand `(group, id, outcome)` back through the
    /// stream; only this consumer touches `mappings`, so entries within a
    /// group land in completion order.
    pub(super) async fn run_concurrent(
        &self,
        collection: &IdCollection,
        mappings: &mut CategoryMappings,
    ) {
        let jobs = collection
            .iter()
            .flat_map(|(group, ids)| ids.iter().map(move |id| (group.clone(), id.clone())));

        let mut results = stream::iter(jobs)
            .map(|(group, id)| {
                let retriever = Arc::clone(&self.retriever);
                async move {
                    let outcome = spawn_classification(retriever, id.clone()).await;
                    (group, id, outcome)
                }
            })
            .buffer_unordered(self.max_concurrent);

        while let Some((group, id, outcome)) = results.next().await {
            mappings.record(&group, id, outcome);
        }
    }
}

/// Run one classification on the runtime's worker threads.
///
/// A panicking retriever is contained here and counted as not retrievable.
pub(super) async fn spawn_classification(retriever: Arc<dyn Retriever>, id: PdbId) -> Outcome {
    let task_id = id.clone();
    let handle = tokio::spawn(async move { classify(retriever.as_ref(), &task_id).await });

    match handle.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(pdb_id = %id, error = %e, "Classification task panicked");
            Outcome::NotRetrievable
        }
    }
}
