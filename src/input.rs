//! Loading the identifier collection a run starts from.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{IdCollection, total_ids};

/// Read a JSON object of `group -> [id, ...]` from `path`.
///
/// Any failure here is fatal: there is nothing to checkpoint without input.
pub async fn load_collection(path: &Path) -> Result<IdCollection> {
    let load_err = |reason: String| Error::InputLoad {
        path: path.to_path_buf(),
        reason,
    };

    let content = tokio::fs::read(path)
        .await
        .map_err(|e| load_err(e.to_string()))?;
    let collection: IdCollection =
        serde_json::from_slice(&content).map_err(|e| load_err(e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        groups = collection.len(),
        total = total_ids(&collection),
        "Loaded identifier collection"
    );
    Ok(collection)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ids;

    #[tokio::test]
    async fn loads_groups_and_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdb_ids.json");
        std::fs::write(&path, r#"{"pdbbind": ["1abc", "2def"], "swissprot": ["3ghi"]}"#).unwrap();

        let collection = load_collection(&path).await.unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection["pdbbind"], ids(&["1abc", "2def"]));
        assert_eq!(collection["swissprot"], ids(&["3ghi"]));
    }

    #[tokio::test]
    async fn missing_file_is_input_load_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_collection(&dir.path().join("absent.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InputLoad { .. }));
    }

    #[tokio::test]
    async fn wrong_shape_is_input_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdb_ids.json");
        std::fs::write(&path, r#"["1abc", "2def"]"#).unwrap();

        let err = load_collection(&path).await.unwrap_err();

        assert!(matches!(err, Error::InputLoad { ref path, .. } if path.ends_with("pdb_ids.json")));
    }
}
