//! Checkpoint persistence for the three category mappings.
//!
//! Each outcome kind has one fixed file. A save serializes the whole mapping
//! to a temporary sibling and renames it into place, so a reader sees either
//! the previous snapshot or the new one.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{CategoryMapping, CategoryMappings, Outcome};

/// Destination for full-mapping snapshots.
#[async_trait::async_trait]
pub trait CheckpointSink: Send + Sync {
    /// Replace the stored mapping for `outcome` with `mapping`.
    async fn save(&self, outcome: Outcome, mapping: &CategoryMapping) -> Result<()>;

    /// Persist all three mappings.
    async fn save_all(&self, mappings: &CategoryMappings) -> Result<()> {
        for outcome in Outcome::ALL {
            self.save(outcome, mappings.get(outcome)).await?;
        }
        Ok(())
    }
}

/// JSON file implementation of [`CheckpointSink`].
#[derive(Clone, Debug)]
pub struct CheckpointStore {
    complete: PathBuf,
    incomplete: PathBuf,
    not_downloadable: PathBuf,
}

impl CheckpointStore {
    /// Resolve the three checkpoint paths from `config`
    pub fn new(config: &Config) -> Self {
        Self {
            complete: config.checkpoint_path(Outcome::Complete),
            incomplete: config.checkpoint_path(Outcome::Incomplete),
            not_downloadable: config.checkpoint_path(Outcome::NotRetrievable),
        }
    }

    /// Where the mapping for `outcome` is stored
    pub fn path(&self, outcome: Outcome) -> &Path {
        match outcome {
            Outcome::Complete => &self.complete,
            Outcome::Incomplete => &self.incomplete,
            Outcome::NotRetrievable => &self.not_downloadable,
        }
    }

    /// Read back the last snapshot for `outcome`, if one was ever written
    pub async fn load(&self, outcome: Outcome) -> Result<Option<CategoryMapping>> {
        let path = self.path(outcome);
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&content)?))
    }

    /// Read back all three snapshots; missing files load as empty mappings
    pub async fn load_all(&self) -> Result<CategoryMappings> {
        Ok(CategoryMappings {
            complete: self.load(Outcome::Complete).await?.unwrap_or_default(),
            incomplete: self.load(Outcome::Incomplete).await?.unwrap_or_default(),
            not_downloadable: self
                .load(Outcome::NotRetrievable)
                .await?
                .unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl CheckpointSink for CheckpointStore {
    async fn save(&self, outcome: Outcome, mapping: &CategoryMapping) -> Result<()> {
        let path = self.path(outcome);
        let write_err = |reason: String| Error::CheckpointWrite {
            path: path.to_path_buf(),
            reason,
        };

        let data = serde_json::to_vec_pretty(mapping)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_err(e.to_string()))?;
        }

        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, &data)
            .await
            .map_err(|e| write_err(e.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| write_err(e.to_string()))?;

        tracing::debug!(
            outcome = %outcome,
            groups = mapping.len(),
            path = %path.display(),
            "Checkpoint written"
        );
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ids;

    fn store_in(dir: &Path) -> CheckpointStore {
        CheckpointStore::new(&Config {
            output_dir: dir.to_path_buf(),
            ..Config::default()
        })
    }

    fn mapping(entries: &[(&str, &[&str])]) -> CategoryMapping {
        entries
            .iter()
            .map(|(group, raw)| (group.to_string(), ids(raw)))
            .collect()
    }

    #[tokio::test]
    async fn save_then_load_returns_same_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let complete = mapping(&[("A", &["x1", "x3"]), ("B", &["y2"])]);

        store.save(Outcome::Complete, &complete).await.unwrap();

        assert_eq!(store.load(Outcome::Complete).await.unwrap(), Some(complete));
        assert!(dir.path().join("pdb_ids_complete.json").exists());
    }

    #[tokio::test]
    async fn save_replaces_previous_content_without_merging() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .save(Outcome::Incomplete, &mapping(&[("A", &["x1"]), ("B", &["y1"])]))
            .await
            .unwrap();
        store
            .save(Outcome::Incomplete, &mapping(&[("C", &["z1"])]))
            .await
            .unwrap();

        let loaded = store.load(Outcome::Incomplete).await.unwrap().unwrap();
        assert_eq!(loaded, mapping(&[("C", &["z1"])]));
    }

    #[tokio::test]
    async fn save_leaves_no_temporary_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .save(Outcome::NotRetrievable, &mapping(&[("A", &["x1"])]))
            .await
            .unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["pdb_ids_not_downloadable.json".to_string()]);
    }

    #[tokio::test]
    async fn save_all_writes_three_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let mappings = CategoryMappings {
            complete: mapping(&[("A", &["x1"])]),
            incomplete: mapping(&[("A", &["x2"])]),
            not_downloadable: mapping(&[("B", &["y1"])]),
        };

        store.save_all(&mappings).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), mappings);
    }

    #[tokio::test]
    async fn load_of_missing_checkpoint_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        assert_eq!(store.load(Outcome::Complete).await.unwrap(), None);
        assert_eq!(store.load_all().await.unwrap(), CategoryMappings::default());
    }

    #[tokio::test]
    async fn save_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("nested/run"));

        store
            .save(Outcome::Complete, &mapping(&[("A", &["x1"])]))
            .await
            .unwrap();

        assert!(dir.path().join("nested/run/pdb_ids_complete.json").exists());
    }

    #[tokio::test]
    async fn save_into_unwritable_location_is_checkpoint_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = store_in(&blocker);

        let err = store
            .save(Outcome::Complete, &CategoryMapping::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CheckpointWrite { .. }));
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("out/pdb_ids_complete.json")),
            PathBuf::from("out/pdb_ids_complete.json.tmp")
        );
    }
}
