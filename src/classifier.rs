//! Outcome classification for a single identifier.

use crate::retrieval::Retriever;
use crate::types::{Outcome, PdbId};

/// Retrieve `id` once and map the result onto an [`Outcome`].
///
/// Every retrieval error becomes [`Outcome::NotRetrievable`]; the cause is
/// only visible at debug level.
pub async fn classify(retriever: &dyn Retriever, id: &PdbId) -> Outcome {
    match retriever.retrieve(id).await {
        Ok(retrieval) => retrieval.into(),
        Err(e) => {
            tracing::debug!(pdb_id = %id, error = %e, "Structure not retrievable");
            Outcome::NotRetrievable
        }
    }
}
