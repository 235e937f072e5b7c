//! Configuration types for pdb-classify

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::Outcome;

/// Checkpoint cadence and file names
///
/// File names are resolved relative to [`Config::output_dir`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Write a checkpoint every `interval` processed identifiers in sequential mode (default: 10)
    #[serde(default = "default_checkpoint_interval")]
    pub interval: usize,

    /// Checkpoint file for complete structures (default: "pdb_ids_complete.json")
    #[serde(default = "default_complete_file")]
    pub complete_file: PathBuf,

    /// Checkpoint file for incomplete structures (default: "pdb_ids_incomplete.json")
    #[serde(default = "default_incomplete_file")]
    pub incomplete_file: PathBuf,

    /// Checkpoint file for structures that could not be retrieved
    /// (default: "pdb_ids_not_downloadable.json")
    #[serde(default = "default_not_downloadable_file")]
    pub not_downloadable_file: PathBuf,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            interval: default_checkpoint_interval(),
            complete_file: default_complete_file(),
            incomplete_file: default_incomplete_file(),
            not_downloadable_file: default_not_downloadable_file(),
        }
    }
}

impl CheckpointConfig {
    /// File name configured for one outcome kind
    pub fn file_for(&self, outcome: Outcome) -> &Path {
        match outcome {
            Outcome::Complete => &self.complete_file,
            Outcome::Incomplete => &self.incomplete_file,
            Outcome::NotRetrievable => &self.not_downloadable_file,
        }
    }
}

/// Remote source settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Base URL structure files are fetched from (default: RCSB download service)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Width of the worker pool in concurrent mode (default: 16)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// Main configuration for a classification run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory raw structure files are written to (default: "./complete_pdbs")
    #[serde(default = "default_pdb_dir")]
    pub pdb_dir: PathBuf,

    /// Directory checkpoint files are written to (default: ".")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Checkpoint settings
    #[serde(default)]
    pub checkpoint: CheckpointConfig,

    /// Retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdb_dir: default_pdb_dir(),
            output_dir: default_output_dir(),
            checkpoint: CheckpointConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

impl Config {
    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint.interval == 0 {
            return Err(Error::config(
                "checkpoint.interval",
                "checkpoint interval must be greater than zero",
            ));
        }
        if self.retrieval.max_concurrent == 0 {
            return Err(Error::config(
                "retrieval.max_concurrent",
                "max_concurrent must be greater than zero",
            ));
        }
        url::Url::parse(&self.retrieval.base_url).map_err(|e| {
            Error::config(
                "retrieval.base_url",
                format!("invalid base URL '{}': {}", self.retrieval.base_url, e),
            )
        })?;
        Ok(())
    }

    /// Full path of the checkpoint file for one outcome kind
    pub fn checkpoint_path(&self, outcome: Outcome) -> PathBuf {
        self.output_dir.join(self.checkpoint.file_for(outcome))
    }
}

fn default_checkpoint_interval() -> usize {
    10
}

fn default_complete_file() -> PathBuf {
    PathBuf::from("pdb_ids_complete.json")
}

fn default_incomplete_file() -> PathBuf {
    PathBuf::from("pdb_ids_incomplete.json")
}

fn default_not_downloadable_file() -> PathBuf {
    PathBuf::from("pdb_ids_not_downloadable.json")
}

fn default_base_url() -> String {
    "https://files.rcsb.org/download".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_concurrent() -> usize {
    16
}

fn default_pdb_dir() -> PathBuf {
    PathBuf::from("./complete_pdbs")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
