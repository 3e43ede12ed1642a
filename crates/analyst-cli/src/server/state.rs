//! Application state for the web server.

use std::collections::VecDeque;
use std::sync::Arc;

use analyst::{Analyst, Dataset};
use tokio::sync::RwLock;

use crate::config::Settings;

/// An uploaded dataset, shared read-only between requests.
#[derive(Debug, Clone)]
pub struct StoredDataset {
    /// Content hash of the upload.
    pub id: String,
    pub filename: String,
    pub dataset: Arc<Dataset>,
}

/// Uploaded datasets, oldest first, with a fixed capacity.
///
/// Re-uploading identical content refreshes its slot instead of adding a
/// second copy. The most recent upload is the "current" dataset that
/// chart requests without an id refer to.
#[derive(Debug)]
pub struct DatasetStore {
    entries: VecDeque<StoredDataset>,
    capacity: usize,
    current: Option<String>,
}

impl DatasetStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            current: None,
        }
    }

    /// Store `entry` as the current dataset, evicting the oldest when full.
    pub fn insert(&mut self, entry: StoredDataset) {
        self.entries.retain(|e| e.id != entry.id);
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.current = Some(entry.id.clone());
        self.entries.push_back(entry);
    }

    pub fn get(&self, id: &str) -> Option<&StoredDataset> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn current(&self) -> Option<&StoredDataset> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    /// Number of datasets held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Stateless engine; datasets live in `store`.
    pub analyst: Arc<Analyst>,
    pub store: Arc<RwLock<DatasetStore>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(analyst: Analyst, settings: Settings) -> Self {
        Self {
            analyst: Arc::new(analyst),
            store: Arc::new(RwLock::new(DatasetStore::new(settings.max_datasets))),
            settings: Arc::new(settings),
        }
    }

    pub fn is_production(&self) -> bool {
        self.settings.is_production()
    }
}
