use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{EventRequest, FeedbackRecord, HistoricalEvent, Venue};

/// Errors that can occur when loading or updating the dataset
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Required data file not found: {0}")]
    Missing(PathBuf),
}

/// In-memory dataset backing the recommendation engine
///
/// Venues and stored event requests are read-only after load. History and
/// feedback are append-only behind locks; scoring runs read cloned
/// snapshots so no lock is held while ranking.
pub struct DataStore {
    venues: Vec<Venue>,
    event_requests: Vec<EventRequest>,
    history: RwLock<Vec<HistoricalEvent>>,
    feedback: RwLock<Vec<FeedbackRecord>>,
}

impl DataStore {
    /// Load the dataset from a data directory
    ///
    /// `venues.json` is required. `event_requests.json`,
    /// `event_history.json` and `feedback.json` are optional and default to
    /// empty collections.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let venues: Vec<Venue> = read_json(&dir.join("venues.json"))?
            .ok_or_else(|| StoreError::Missing(dir.join("venues.json")))?;

        let event_requests: Vec<EventRequest> =
            read_json(&dir.join("event_requests.json"))?.unwrap_or_default();
        let history: Vec<HistoricalEvent> =
            read_json(&dir.join("event_history.json"))?.unwrap_or_default();
        let feedback: Vec<FeedbackRecord> =
            read_json(&dir.join("feedback.json"))?.unwrap_or_default();

        tracing::info!(
            "Loaded dataset: {} venues, {} event requests, {} historical events, {} feedback records",
            venues.len(),
            event_requests.len(),
            history.len(),
            feedback.len()
        );

        Ok(Self {
            venues,
            event_requests,
            history: RwLock::new(history),
            feedback: RwLock::new(feedback),
        })
    }

    /// Build a store directly from in-memory collections
    pub fn from_parts(
        venues: Vec<Venue>,
        event_requests: Vec<EventRequest>,
        history: Vec<HistoricalEvent>,
        feedback: Vec<FeedbackRecord>,
    ) -> Self {
        Self {
            venues,
            event_requests,
            history: RwLock::new(history),
            feedback: RwLock::new(feedback),
        }
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn find_event(&self, event_id: &str) -> Option<&EventRequest> {
        self.event_requests.iter().find(|e| e.event_id == event_id)
    }

    pub async fn history_snapshot(&self) -> Vec<HistoricalEvent> {
        self.history.read().await.clone()
    }

    pub async fn feedback_snapshot(&self) -> Vec<FeedbackRecord> {
        self.feedback.read().await.clone()
    }

    pub async fn add_feedback(&self, record: FeedbackRecord) {
        let mut feedback = self.feedback.write().await;
        feedback.push(record);
    }

    /// Append a historical event, returning the new corpus size
    pub async fn add_history(&self, event: HistoricalEvent) -> usize {
        let mut history = self.history.write().await;
        history.push(event);
        history.len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
}
