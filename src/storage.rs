//! Snapshot persistence on top of a small key-value seam.
//!
//! Loading never fails: a missing key, an unreadable file or a blob that is
//! not a JSON object come back as the default snapshot. Inside an object each
//! field is recovered on its own, so a bad goal or one bad entry does not cost
//! the rest of the data. Saving reports failures to the caller, which logs
//! them and keeps its in-memory state.

use crate::entries::normalize;
use crate::errors::StoreError;
use crate::models::{DEFAULT_YEARLY_GOAL, Entry, Snapshot};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::fs;
use tracing::{debug, warn};

pub const SNAPSHOT_KEY: &str = "pushup-data";

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> io::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    // Written to a sibling temp file and renamed so a crash mid-write never
    // leaves a truncated snapshot behind.
    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await
    }
}

/// In-process store; `fail_writes` simulates a full or unavailable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let store = Self::default();
        lock(&store.values).insert(key.to_string(), value.into());
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"));
        }
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub async fn load_snapshot(store: &dyn KeyValueStore) -> Snapshot {
    let raw = match store.get(SNAPSHOT_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored snapshot, starting empty");
            return Snapshot::default();
        }
        Err(err) => {
            warn!("failed to read snapshot: {err}");
            return Snapshot::default();
        }
    };

    decode_snapshot(&raw).unwrap_or_else(|| {
        warn!("stored snapshot is not a JSON object, starting empty");
        Snapshot::default()
    })
}

/// `None` unless the blob is a JSON object. A missing, zero or non-integer
/// goal becomes the default; entries that fail to decode are skipped.
pub fn decode_snapshot(raw: &str) -> Option<Snapshot> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let yearly_goal = object
        .get("yearlyGoal")
        .and_then(Value::as_u64)
        .filter(|goal| *goal > 0)
        .unwrap_or(DEFAULT_YEARLY_GOAL);

    let mut skipped = 0usize;
    let entries: Vec<Entry> = object
        .get("entries")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let entry = Entry::deserialize(item).ok();
                    if entry.is_none() {
                        skipped += 1;
                    }
                    entry
                })
                .collect()
        })
        .unwrap_or_default();
    if skipped > 0 {
        warn!(skipped, "dropped malformed entries from stored snapshot");
    }

    Some(Snapshot {
        yearly_goal,
        entries: normalize(entries),
    })
}

pub async fn save_snapshot(
    store: &dyn KeyValueStore,
    snapshot: &Snapshot,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(snapshot)?;
    store
        .set(SNAPSHOT_KEY, &payload)
        .await
        .map_err(|source| StoreError::Write {
            key: SNAPSHOT_KEY.to_string(),
            source,
        })
}
