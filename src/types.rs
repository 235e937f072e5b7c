//! Core types for pdb-classify

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Error;

/// Accession code naming one retrievable structure
///
/// Opaque to the batch logic; only the retriever gives it meaning.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdbId(pub String);

impl PdbId {
    /// Create a new PdbId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw accession code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PdbId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PdbId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PdbId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group key -> ordered identifiers, as loaded from the input file
pub type IdCollection = BTreeMap<String, Vec<PdbId>>;

/// Group key -> identifiers that ended up in one outcome category
pub type CategoryMapping = BTreeMap<String, Vec<PdbId>>;

/// What a successful retrieval produced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Retrieval {
    /// The structure was fetched and declares no missing residues or atoms
    Complete,
    /// The structure was fetched but is partial
    Incomplete,
}

/// Classification of one identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Fully retrieved
    Complete,
    /// Retrieved, but the content is partial
    Incomplete,
    /// Could not be retrieved for any reason
    #[serde(rename = "not_downloadable")]
    NotRetrievable,
}

impl Outcome {
    /// Every outcome, in reporting order
    pub const ALL: [Outcome; 3] = [Outcome::Complete, Outcome::Incomplete, Outcome::NotRetrievable];

    /// Stable snake_case name used in file names and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Complete => "complete",
            Outcome::Incomplete => "incomplete",
            Outcome::NotRetrievable => "not_downloadable",
        }
    }
}

impl From<Retrieval> for Outcome {
    fn from(retrieval: Retrieval) -> Self {
        match retrieval {
            Retrieval::Complete => Outcome::Complete,
            Retrieval::Incomplete => Outcome::Incomplete,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the batch runner schedules classifications
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// One identifier at a time, in input order, with periodic checkpoints
    Sequential,
    /// Bounded worker pool, single checkpoint at the end
    #[default]
    Concurrent,
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingMode::Sequential => f.write_str("sequential"),
            ProcessingMode::Concurrent => f.write_str("concurrent"),
        }
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ProcessingMode::Sequential),
            "concurrent" | "parallel" => Ok(ProcessingMode::Concurrent),
            other => Err(Error::config(
                "classification_type",
                format!("unknown processing mode '{other}', expected 'sequential' or 'concurrent'"),
            )),
        }
    }
}

/// The three category mappings accumulated during a run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMappings {
    /// Fully retrieved identifiers
    pub complete: CategoryMapping,
    /// Partially retrieved identifiers
    pub incomplete: CategoryMapping,
    /// Identifiers that could not be retrieved
    pub not_downloadable: CategoryMapping,
}

impl CategoryMappings {
    /// Seed all three mappings with an empty entry for every input group
    pub fn for_collection(collection: &IdCollection) -> Self {
        let seed: CategoryMapping = collection.keys().map(|k| (k.clone(), Vec::new())).collect();
        Self {
            complete: seed.clone(),
            incomplete: seed.clone(),
            not_downloadable: seed,
        }
    }

    /// Mapping for one outcome kind
    pub fn get(&self, outcome: Outcome) -> &CategoryMapping {
        match outcome {
            Outcome::Complete => &self.complete,
            Outcome::Incomplete => &self.incomplete,
            Outcome::NotRetrievable => &self.not_downloadable,
        }
    }

    fn get_mut(&mut self, outcome: Outcome) -> &mut CategoryMapping {
        match outcome {
            Outcome::Complete => &mut self.complete,
            Outcome::Incomplete => &mut self.incomplete,
            Outcome::NotRetrievable => &mut self.not_downloadable,
        }
    }

    /// Append an identifier to its group's sequence under `outcome`
    pub fn record(&mut self, group: &str, id: PdbId, outcome: Outcome) {
        let mapping = self.get_mut(outcome);
        match mapping.get_mut(group) {
            Some(ids) => ids.push(id),
            None => {
                mapping.insert(group.to_string(), vec![id]);
            }
        }
    }

    /// Number of identifiers recorded under `outcome` across all groups
    pub fn count(&self, outcome: Outcome) -> usize {
        self.get(outcome).values().map(Vec::len).sum()
    }

    /// Number of identifiers recorded in any category
    pub fn processed(&self) -> usize {
        Outcome::ALL.iter().map(|o| self.count(*o)).sum()
    }

    /// Drop empty groups from each mapping independently
    pub fn prune(&mut self) {
        for outcome in Outcome::ALL {
            self.get_mut(outcome).retain(|_, ids| !ids.is_empty());
        }
    }

    /// Pruned copy, leaving `self` untouched
    pub fn pruned(&self) -> Self {
        let mut copy = self.clone();
        copy.prune();
        copy
    }
}

/// Total number of identifiers in a collection
pub fn total_ids(collection: &IdCollection) -> usize {
    collection.values().map(Vec::len).sum()
}
