//! Flat record store
//!
//! Each collection is a single JSON array file. Reads load the whole file;
//! writes serialize the whole collection and replace the file. A per-collection
//! async mutex serializes read-modify-write cycles within the process.
//!
//! A missing, empty or unparsable file reads as an empty collection. Parse
//! failures are logged, not surfaced, so a corrupted file is masked until the
//! next write replaces it.

use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

use shared::{Lot, MaterialRecord, Pickup, Report, Sale};

use crate::error::{AppError, AppResult};

/// One JSON-array collection file
#[derive(Debug)]
pub struct Collection<T> {
    name: &'static str,
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

/// Exclusive view of a collection; changes are persisted by `commit`
pub struct Locked<'a, T> {
    collection: &'a Collection<T>,
    _guard: MutexGuard<'a, ()>,
    pub records: Vec<T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Collection stored at `<data_dir>/<name>/<name>.json`
    pub fn new(data_dir: &Path, name: &'static str) -> Self {
        Self {
            name,
            path: data_dir.join(name).join(format!("{}.json", name)),
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty array file if missing
    pub async fn ensure(&self) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => self.write(&[]).await,
            Err(e) => Err(self.storage_error("inspect", e)),
        }
    }

    /// Snapshot of all records
    pub async fn load(&self) -> Vec<T> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Replace the whole collection
    pub async fn save(&self, records: &[T]) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.write(records).await
    }

    /// Hold the collection lock across a multi-step read-modify-write
    pub async fn lock(&self) -> Locked<'_, T> {
        let guard = self.lock.lock().await;
        let records = self.read().await;
        Locked {
            collection: self,
            _guard: guard,
            records,
        }
    }

    /// Load, mutate and save under the lock. Nothing is written when `apply`
    /// returns an error.
    pub async fn update<R, F>(&self, apply: F) -> AppResult<R>
    where
        F: FnOnce(&mut Vec<T>) -> AppResult<R>,
    {
        let mut locked = self.lock().await;
        let result = apply(&mut locked.records)?;
        locked.commit().await?;
        Ok(result)
    }

    async fn read(&self) -> Vec<T> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    collection = self.name,
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read collection, treating as empty"
                );
                return Vec::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    collection = self.name,
                    path = %self.path.display(),
                    error = %e,
                    "Failed to parse collection, treating as empty"
                );
                Vec::new()
            }
        }
    }

    async fn write(&self, records: &[T]) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::StorageError(format!("{}: {}", self.name, e)))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory for", e))?;
        }

        // Replace via rename so an interrupted write never truncates the file
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| self.storage_error("write", e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.storage_error("replace", e))?;

        tracing::debug!(collection = self.name, records = records.len(), "Collection saved");
        Ok(())
    }

    fn storage_error(&self, action: &str, err: std::io::Error) -> AppError {
        tracing::error!(
            collection = self.name,
            path = %self.path.display(),
            error = %err,
            "Failed to {} collection",
            action
        );
        AppError::StorageError(format!("failed to {} {}: {}", action, self.name, err))
    }
}

impl<T> Locked<'_, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Persist the records and release the lock
    pub async fn commit(self) -> AppResult<()> {
        self.collection.write(&self.records).await
    }
}

/// All collections, each owned by one service
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
    pub lots: Collection<Lot>,
    pub pickups: Collection<Pickup>,
    pub materials: Collection<MaterialRecord>,
    pub sales: Collection<Sale>,
    pub reports: Collection<Report>,
}

impl Store {
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            lots: Collection::new(&data_dir, "lots"),
            pickups: Collection::new(&data_dir, "pickups"),
            materials: Collection::new(&data_dir, "materials"),
            sales: Collection::new(&data_dir, "sales"),
            reports: Collection::new(&data_dir, "reports"),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the directory layout and empty collection files
    pub async fn init(&self) -> AppResult<()> {
        self.lots.ensure().await?;
        self.pickups.ensure().await?;
        self.materials.ensure().await?;
        self.sales.ensure().await?;
        self.reports.ensure().await?;
        tracing::info!(data_dir = %self.data_dir.display(), "Record store ready");
        Ok(())
    }
}
