use std::path::{Path, PathBuf};
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Outcome of a mutation passed to [`JsonListStore::update`].
/// Only `Changed` triggers a write of the backing file.
pub enum Change<R> {
    Changed(R),
    Unchanged(R),
}

/// Generic JSON file-backed list store.
///
/// Keeps a `Vec<T>` in memory and rewrites the whole file as a JSON array
/// after each change. Mutations hold the write lock until the file is
/// replaced, so writers never interleave and readers never see a change
/// that failed to persist.
pub struct JsonListStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the store from a path. A missing file yields an empty list and is
    /// not created until the first change; unreadable or malformed content is
    /// an error.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage(parent, e))?;
        }
        let items = read_file(&file_path).await?;
        info!(path = %file_path.display(), count = items.len(), "json list store loaded");
        Ok(Self { inner: RwLock::new(items), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Clone of the current list.
    pub async fn snapshot(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// Run `f` against the list under the read lock.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let items = self.inner.read().await;
        f(&items)
    }

    /// Apply a mutation under the write lock and persist it before releasing.
    ///
    /// If `f` fails, or the write fails after a `Change::Changed`, the list is
    /// restored to its previous contents.
    pub async fn update<R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<Change<R>, ServiceError>,
    {
        let mut items = self.inner.write().await;
        let before = items.clone();
        match f(&mut items) {
            Ok(Change::Unchanged(r)) => Ok(r),
            Ok(Change::Changed(r)) => match write_file(&self.file_path, &items).await {
                Ok(()) => Ok(r),
                Err(e) => {
                    *items = before;
                    Err(e)
                }
            },
            Err(e) => {
                *items = before;
                Err(e)
            }
        }
    }
}

async fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage(path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "backing file absent; starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(ServiceError::storage(path, e)),
    }
}

/// Write to a sibling temp file, flush it to disk and rename it over `path`.
async fn write_file<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::storage(path, e))?;
    let tmp = tmp_path(path);
    if let Err(e) = replace_with(&tmp, path, &data).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            debug!(path = %tmp.display(), error = %cleanup, "temp file not removed");
        }
        return Err(e);
    }
    debug!(path = %path.display(), count = items.len(), bytes = data.len(), "json list store saved");
    Ok(())
}

async fn replace_with(tmp: &Path, path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    let mut file = fs::File::create(tmp).await.map_err(|e| ServiceError::storage(tmp, e))?;
    file.write_all(data).await.map_err(|e| ServiceError::storage(tmp, e))?;
    file.sync_all().await.map_err(|e| ServiceError::storage(tmp, e))?;
    drop(file);
    fs::rename(tmp, path).await.map_err(|e| ServiceError::storage(path, e))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
