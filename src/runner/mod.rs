//! Batch runner -- drives the classifier over a grouped collection.
//!
//! Split into focused submodules:
//! - [`sequential`] - Input-order processing with periodic checkpoints
//! - [`concurrent`] - Bounded worker pool with a single aggregating consumer
//!
//! Both modes prune empty groups and write one final checkpoint before
//! returning.

mod concurrent;
mod sequential;


use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::checkpoint::CheckpointSink;
use crate::config::Config;
use crate::error::Result;
use crate::retrieval::Retriever;
use crate::types::{CategoryMappings, IdCollection, Outcome, ProcessingMode, total_ids};

/// Everything a finished run hands back for reporting.
#[derive(Clone, Debug)]
pub struct RunOutput {
    /// Pruned category mappings, identical to the final checkpoint
    pub mappings: CategoryMappings,
    /// Number of identifiers in the input, counted before processing
    pub total: usize,
    /// Full three-mapping snapshots written, the final one included
    pub checkpoints_written: usize,
    /// Wall time spent classifying and checkpointing
    pub elapsed: Duration,
}

/// Classifies every identifier of a collection and checkpoints the results.
///
/// The runner owns the in-memory mappings for the duration of a run; the
/// checkpoint sink only ever sees full snapshots.
pub struct BatchRunner {
    retriever: Arc<dyn Retriever>,
    sink: Arc<dyn CheckpointSink>,
    checkpoint_interval: usize,
    max_concurrent: usize,
}

impl BatchRunner {
    /// Create a runner with the checkpoint interval and pool width from `config`
    pub fn new(
        retriever: Arc<dyn Retriever>,
        sink: Arc<dyn CheckpointSink>,
        config: &Config,
    ) -> Self {
        Self {
            retriever,
            sink,
            checkpoint_interval: config.checkpoint.interval.max(1),
            max_concurrent: config.retrieval.max_concurrent.max(1),
        }
    }

    /// Classify `collection` under `mode`.
    ///
    /// Per-identifier failures never surface here; only a failed checkpoint
    /// write aborts the run.
    pub async fn run(&self, collection: &IdCollection, mode: ProcessingMode) -> Result<RunOutput> {
        let total = total_ids(collection);
        let started = Instant::now();

        tracing::info!(
            mode = %mode,
            groups = collection.len(),
            total,
            "Starting classification run"
        );

        let mut mappings = CategoryMappings::for_collection(collection);
        let mut checkpoints_written = match mode {
            ProcessingMode::Sequential => self.run_sequential(collection, &mut mappings).await?,
            ProcessingMode::Concurrent => {
                self.run_concurrent(collection, &mut mappings).await;
                0
            }
        };

        mappings.prune();
        self.checkpoint(&mappings).await?;
        checkpoints_written += 1;

        let elapsed = started.elapsed();
        tracing::info!(
            complete = mappings.count(Outcome::Complete),
            incomplete = mappings.count(Outcome::Incomplete),
            not_downloadable = mappings.count(Outcome::NotRetrievable),
            checkpoints = checkpoints_written,
            elapsed_secs = elapsed.as_secs_f64(),
            "Classification run finished"
        );

        Ok(RunOutput {
            mappings,
            total,
            checkpoints_written,
            elapsed,
        })
    }

    /// Persist a pruned snapshot of all three mappings.
    async fn checkpoint(&self, mappings: &CategoryMappings) -> Result<()> {
        let snapshot = mappings.pruned();
        self.sink.save_all(&snapshot).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to write checkpoint, aborting run");
        })
    }
}
