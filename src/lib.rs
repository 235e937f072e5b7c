//! # pdb-classify
//!
//! Batch retrieval of PDB structure files, classifying every accession code
//! as complete, incomplete or not downloadable while checkpointing progress.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use pdb_classify::{BatchRunner, CheckpointStore, Config, ProcessingMode, RcsbRetriever};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let collection = pdb_classify::load_collection(Path::new("pdb_ids.json")).await?;
//!
//!     let runner = BatchRunner::new(
//!         Arc::new(RcsbRetriever::new(&config)?),
//!         Arc::new(CheckpointStore::new(&config)),
//!         &config,
//!     );
//!     let output = runner.run(&collection, ProcessingMode::Concurrent).await?;
//!
//!     pdb_classify::report(&output.mappings, output.total);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Checkpoint persistence
pub mod checkpoint;
/// Per-identifier outcome classification
pub mod classifier;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Identifier collection loading
pub mod input;
/// Summary reporting
pub mod report;
/// Structure retrieval
pub mod retrieval;
/// Batch orchestration (sequential and concurrent)
pub mod runner;
/// Core types
pub mod types;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use checkpoint::{CheckpointSink, CheckpointStore};
pub use classifier::classify;
pub use config::{CheckpointConfig, Config, RetrievalConfig};
pub use error::{Error, Result, RetrievalError};
pub use input::load_collection;
pub use report::{Summary, report};
pub use retrieval::{RcsbRetriever, Retriever, is_structure_complete};
pub use runner::{BatchRunner, RunOutput};
pub use types::{
    CategoryMapping, CategoryMappings, IdCollection, Outcome, PdbId, ProcessingMode, Retrieval,
};
