//! Lead hand-off: save/quote requests sent to the document store.
//!
//! Submission is one-way. [`Submitter::submit`] queues the lead on an
//! unbounded channel and returns at once; a background task delivers it to
//! the primary store and falls back to the local store when the primary is
//! missing or fails. The design session is never touched by the worker, so
//! a failed submission cannot roll back or duplicate placements.

use sandbox_core::DesignSnapshot;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("remote store: {0}")]
    Remote(String),
}

/// Why the customer is handing over their design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    Save,
    Quote,
}

impl LeadKind {
    /// Store collection the lead is written to.
    pub fn collection(self) -> &'static str {
        match self {
            LeadKind::Save => "projects",
            LeadKind::Quote => "leads",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub kind: LeadKind,
    pub contact: ContactInfo,
    pub design: DesignSnapshot,
}

/// A document store that leads can be written to.
pub trait LeadStore: Send + Sync + 'static {
    /// Append `record` to `collection`, returning the new document id.
    fn save(
        &self,
        collection: &str,
        record: serde_json::Value,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;
}

/// What happened to one submitted lead.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Stored { id: String, fallback: bool },
    Failed { reason: String },
}

// ─── Local fallback store ────────────────────────────────────────────────

/// File-backed fallback: one JSON array per collection, stored as
/// `<dir>/<collection>.json`. Each saved record gains `id` and `timestamp`
/// (milliseconds since the epoch).
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

static LOCAL_SEQ: AtomicU64 = AtomicU64::new(0);

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        let safe: String = collection
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// All records in a collection, oldest first. A missing file is an
    /// empty collection.
    pub async fn load(&self, collection: &str) -> Result<Vec<serde_json::Value>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(collection)).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LeadStore for LocalStore {
    async fn save(&self, collection: &str, record: serde_json::Value) -> Result<String, StorageError> {
        let mut records = self.load(collection).await?;
        let timestamp = now_millis();
        let id = format!("{:x}-{}", timestamp, LOCAL_SEQ.fetch_add(1, Ordering::Relaxed));

        let mut item = match record {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        item.insert("id".to_string(), id.clone().into());
        item.insert("timestamp".to_string(), timestamp.into());
        records.push(serde_json::Value::Object(item));

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(collection), serde_json::to_vec_pretty(&records)?).await?;
        Ok(id)
    }
}

// ─── Submission worker ───────────────────────────────────────────────────

/// Sending half of the submission queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Submitter {
    tx: UnboundedSender<Lead>,
}

impl Submitter {
    /// Queue a lead for delivery. Never blocks. Returns `false` if the
    /// worker has shut down and the lead was dropped.
    pub fn submit(&self, lead: Lead) -> bool {
        match self.tx.send(lead) {
            Ok(()) => true,
            Err(_) => {
                log::error!("lead submission worker is gone; lead dropped");
                false
            }
        }
    }
}

/// Spawn the delivery task on the current tokio runtime.
///
/// With `primary = None` every lead goes straight to `fallback`. Outcomes
/// are reported on `outcomes` when given; a closed outcome channel is
/// ignored. The task ends once every [`Submitter`] is dropped.
pub fn spawn_submitter<P: LeadStore, F: LeadStore>(
    primary: Option<P>,
    fallback: F,
    outcomes: Option<UnboundedSender<SubmissionOutcome>>,
) -> (Submitter, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Lead>();
    let handle = tokio::spawn(async move {
        while let Some(lead) = rx.recv().await {
            let outcome = deliver(primary.as_ref(), &fallback, &lead).await;
            if let Some(outcomes) = &outcomes {
                let _ = outcomes.send(outcome);
            }
        }
        log::debug!("lead submission worker stopped");
    });
    (Submitter { tx }, handle)
}

async fn deliver<P: LeadStore, F: LeadStore>(
    primary: Option<&P>,
    fallback: &F,
    lead: &Lead,
) -> SubmissionOutcome {
    let collection = lead.kind.collection();
    let record = match serde_json::to_value(lead) {
        Ok(record) => record,
        Err(e) => {
            log::error!("could not encode lead: {e}");
            return SubmissionOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if let Some(primary) = primary {
        match primary.save(collection, record.clone()).await {
            Ok(id) => {
                log::info!("lead stored in {collection} as {id}");
                return SubmissionOutcome::Stored { id, fallback: false };
            }
            Err(e) => log::warn!("primary store failed, using fallback: {e}"),
        }
    }

    match fallback.save(collection, record).await {
        Ok(id) => {
            log::info!("lead stored locally in {collection} as {id}");
            SubmissionOutcome::Stored { id, fallback: true }
        }
        Err(e) => {
            log::error!("lead could not be stored: {e}");
            SubmissionOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
