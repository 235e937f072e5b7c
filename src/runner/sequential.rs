//! Sequential mode: one identifier at a time, checkpointing every N items.

use std::sync::Arc;

use crate::error::Result;
use crate::types::{CategoryMappings, IdCollection};

use super::BatchRunner;
use super::concurrent::spawn_classification;

impl BatchRunner {
    /// Classify in input order, returning the number of periodic checkpoints written.
    ///
    /// The processed counter is global across groups and counts failures too,
    /// so at most `checkpoint_interval - 1` classifications are lost on a crash.
    /// Each item still runs on a spawned task so a panicking retriever is
    /// contained to that item.
    pub(super) async fn run_sequential(
        &self,
        collection: &IdCollection,
        mappings: &mut CategoryMappings,
    ) -> Result<usize> {
        let mut processed = 0usize;
        let mut checkpoints = 0usize;

        for (group, ids) in collection {
            for id in ids {
                let outcome = spawn_classification(Arc::clone(&self.retriever), id.clone()).await;
                mappings.record(group, id.clone(), outcome);
                processed += 1;

                if processed % self.checkpoint_interval == 0 {
                    self.checkpoint(mappings).await?;
                    checkpoints += 1;
                    tracing::debug!(processed, "Progress checkpoint saved");
                }
            }
            tracing::debug!(group = %group, size = ids.len(), "Group classified");
        }

        Ok(checkpoints)
    }
}
