//! Structure retrieval -- the capability the classifier drives.
//!
//! [`Retriever`] is the seam: the batch logic never talks to the network
//! directly, which keeps the runner testable with a scripted retriever.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, RetrievalError};
use crate::types::{PdbId, Retrieval};

/// File extension appended to accession codes, locally and remotely
pub const PDB_EXTENSION: &str = "pdb";

/// Record names that mark a structure as partial
const MISSING_RECORD_PREFIXES: [&str; 2] = ["REMARK 465", "REMARK 470"];

/// Abstraction over structure fetching, enabling testability.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Fetch the structure for `id`.
    ///
    /// Transport failures, missing entries and local write failures are all
    /// reported as `Err`; the caller decides what they mean.
    async fn retrieve(&self, id: &PdbId) -> Result<Retrieval, RetrievalError>;
}

/// Production [`Retriever`] backed by the RCSB file download service.
///
/// Successful responses are stored as `{pdb_dir}/{id}.pdb` before their
/// completeness is assessed, so incomplete structures are kept on disk too.
pub struct RcsbRetriever {
    client: reqwest::Client,
    base_url: String,
    pdb_dir: PathBuf,
}

impl RcsbRetriever {
    /// Build a retriever with the timeout and directories from `config`
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.retrieval.request_timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {}", e),
                key: None,
            })?;

        Ok(Self {
            client,
            base_url: config.retrieval.base_url.trim_end_matches('/').to_string(),
            pdb_dir: config.pdb_dir.clone(),
        })
    }

    fn file_name(id: &PdbId) -> String {
        format!("{}.{}", id, PDB_EXTENSION)
    }

    fn url_for(&self, id: &PdbId) -> String {
        format!("{}/{}", self.base_url, Self::file_name(id))
    }
}

#[async_trait::async_trait]
impl Retriever for RcsbRetriever {
    async fn retrieve(&self, id: &PdbId) -> Result<Retrieval, RetrievalError> {
        let url = self.url_for(id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(RetrievalError::EmptyBody);
        }

        tokio::fs::create_dir_all(&self.pdb_dir).await?;
        tokio::fs::write(self.pdb_dir.join(Self::file_name(id)), body.as_bytes()).await?;

        if is_structure_complete(&body) {
            tracing::debug!(pdb_id = %id, "Structure downloaded");
            Ok(Retrieval::Complete)
        } else {
            tracing::debug!(pdb_id = %id, "Structure downloaded but contains missing values");
            Ok(Retrieval::Incomplete)
        }
    }
}

/// Check whether a PDB text declares no missing residues or atoms.
pub fn is_structure_complete(pdb_text: &str) -> bool {
    !pdb_text.lines().any(|line| {
        MISSING_RECORD_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
            || line.contains("MISSING")
    })
}
