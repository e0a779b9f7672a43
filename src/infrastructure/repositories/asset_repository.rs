use crate::domain::poi::AssetKind;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum AssetStoreError {
    #[error("audio assets at {path} cannot be resolved: {message}")]
    Resolution { path: PathBuf, message: String },
    #[error("failed to write audio asset {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error("audio asset {0} not found")]
    NotFound(PathBuf),
    #[error("failed to read audio asset {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Filesystem layout of generated audio:
/// `<root>/id_<poi_id>/<asset>.wav`, one directory per POI, no manifest.
#[derive(Debug, Clone)]
pub struct AudioAssetStore {
    root: PathBuf,
}

impl AudioAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn poi_dir(&self, poi_id: i64) -> PathBuf {
        self.root.join(format!("id_{}", poi_id))
    }

    pub fn path_for(&self, poi_id: i64, asset: AssetKind) -> PathBuf {
        self.poi_dir(poi_id).join(asset.file_name())
    }

    /// Whether the asset file is present. A missing POI directory means no
    /// assets; it is never created here.
    pub async fn exists(&self, poi_id: i64, asset: AssetKind) -> Result<bool, AssetStoreError> {
        let dir = self.poi_dir(poi_id);
        let file_name = asset.file_name();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(resolution_error(&dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| resolution_error(&dir, e))?
        {
            if entry.file_name() != file_name.as_str() {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| resolution_error(&entry.path(), e))?;
            if file_type.is_file() {
                return Ok(true);
            }
            return Err(AssetStoreError::Resolution {
                path: entry.path(),
                message: "entry exists but is not a regular file".to_string(),
            });
        }

        Ok(false)
    }

    /// Every recognised asset file in the POI directory
    pub async fn existing_assets(&self, poi_id: i64) -> Result<BTreeSet<AssetKind>, AssetStoreError> {
        let dir = self.poi_dir(poi_id);
        let mut assets = BTreeSet::new();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(assets),
            Err(e) => return Err(resolution_error(&dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| resolution_error(&dir, e))?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.ends_with(".wav") {
                continue;
            }
            // fact_01.wav parses but is not a file this store would write
            match name.parse::<AssetKind>() {
                Ok(asset) if asset.file_name() == name => {
                    assets.insert(asset);
                }
                _ => {}
            }
        }

        Ok(assets)
    }

    /// Persist audio, creating the POI directory if needed.
    /// Bytes go to a temporary sibling first so readers never see a partial file.
    pub async fn write(
        &self,
        poi_id: i64,
        asset: AssetKind,
        audio: &[u8],
    ) -> Result<PathBuf, AssetStoreError> {
        let dir = self.poi_dir(poi_id);
        let path = self.path_for(poi_id, asset);

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| write_error(&dir, e))?;

        let tmp_path = dir.join(format!(".{}.{}.tmp", asset.file_stem(), Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, audio).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(write_error(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(write_error(&path, e));
        }

        tracing::debug!(
            poi_id = poi_id,
            asset = %asset,
            path = %path.display(),
            size_bytes = audio.len(),
            "Audio asset written"
        );

        Ok(path)
    }

    pub async fn read(&self, poi_id: i64, asset: AssetKind) -> Result<Vec<u8>, AssetStoreError> {
        let path = self.path_for(poi_id, asset);
        fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AssetStoreError::NotFound(path.clone())
            } else {
                AssetStoreError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    /// Create the root if needed and prove a file can be written there
    pub async fn check_writable(&self) -> Result<(), AssetStoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| write_error(&self.root, e))?;
        let probe = self.root.join(format!(".probe.{}", Uuid::new_v4()));
        fs::write(&probe, b"ok")
            .await
            .map_err(|e| write_error(&probe, e))?;
        fs::remove_file(&probe)
            .await
            .map_err(|e| write_error(&probe, e))
    }
}

fn resolution_error(path: &Path, err: std::io::Error) -> AssetStoreError {
    AssetStoreError::Resolution {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn write_error(path: &Path, err: std::io::Error) -> AssetStoreError {
    AssetStoreError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
