//! Integration tests: lead submission worker with primary and fallback
//! stores.
#![cfg(feature = "submit")]

use pretty_assertions::assert_eq;
use sandbox_core::SandboxConfig;
use sandbox_editor::{
    ContactInfo, DesignSession, Lead, LeadKind, LeadStore, LocalStore, StorageError, SubmissionOutcome,
    spawn_submitter,
};
use sandbox_render::DisplayList;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Remote store stand-in that always fails.
struct OfflineStore;

impl LeadStore for OfflineStore {
    async fn save(&self, _collection: &str, _record: serde_json::Value) -> Result<String, StorageError> {
        Err(StorageError::Remote("network unreachable".to_string()))
    }
}

/// Remote store stand-in that keeps records in memory.
#[derive(Clone, Default)]
struct MemoryStore {
    saved: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl LeadStore for MemoryStore {
    async fn save(&self, collection: &str, record: serde_json::Value) -> Result<String, StorageError> {
        let mut saved = self.saved.lock().unwrap();
        saved.push((collection.to_string(), record));
        Ok(format!("doc-{}", saved.len()))
    }
}

fn lead_from_session(kind: LeadKind) -> (Lead, DesignSession<DisplayList>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = DesignSession::new(DisplayList::new(), &SandboxConfig::default());
    session.place("wall", 0.0, 0.0);
    session.place("window", 200.0, 0.0);
    let lead = Lead {
        kind,
        contact: ContactInfo {
            name: "Pat Doe".to_string(),
            email: "pat@example.com".to_string(),
            phone: None,
            notes: Some("kitchen remodel".to_string()),
        },
        design: session.snapshot(),
    };
    (lead, session)
}

#[tokio::test]
async fn primary_store_receives_lead() {
    let primary = MemoryStore::default();
    let saved = primary.saved.clone();
    let dir = tempfile::tempdir().unwrap();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let (submitter, _worker) = spawn_submitter(Some(primary), LocalStore::new(dir.path()), Some(out_tx));

    let (lead, _session) = lead_from_session(LeadKind::Quote);
    assert!(submitter.submit(lead));

    let outcome = out_rx.recv().await.unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Stored {
            id: "doc-1".to_string(),
            fallback: false
        }
    );
    let saved = saved.lock().unwrap();
    assert_eq!(saved[0].0, "leads");
    assert_eq!(saved[0].1["design"]["totals"]["grand_total"], 2375);
    assert_eq!(saved[0].1["contact"]["email"], "pat@example.com");
}

#[tokio::test]
async fn failed_primary_falls_back_to_local() {
    let dir = tempfile::tempdir().unwrap();
    let local = LocalStore::new(dir.path());
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let (submitter, _worker) = spawn_submitter(Some(OfflineStore), local.clone(), Some(out_tx));

    let (lead, session) = lead_from_session(LeadKind::Save);
    let before = session.snapshot();
    submitter.submit(lead);

    let outcome = out_rx.recv().await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Stored { fallback: true, .. }));

    let records = local.load("projects").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["kind"], "save");
    assert_eq!(records[0]["design"]["components"][0]["type"], "wall");
    // The session is untouched by delivery.
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn no_primary_goes_straight_to_local() {
    let dir = tempfile::tempdir().unwrap();
    let local = LocalStore::new(dir.path());
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let (submitter, _worker) = spawn_submitter::<MemoryStore, _>(None, local.clone(), Some(out_tx));

    let (lead, _session) = lead_from_session(LeadKind::Quote);
    submitter.submit(lead.clone());
    submitter.submit(lead);
    for _ in 0..2 {
        assert!(matches!(
            out_rx.recv().await.unwrap(),
            SubmissionOutcome::Stored { fallback: true, .. }
        ));
    }
    assert_eq!(local.load("leads").await.unwrap().len(), 2);
}

#[tokio::test]
async fn worker_stops_when_submitters_drop() {
    let dir = tempfile::tempdir().unwrap();
    let (submitter, worker) = spawn_submitter::<MemoryStore, _>(None, LocalStore::new(dir.path()), None);
    let spare = submitter.clone();
    drop(submitter);
    drop(spare);
    worker.await.unwrap();
}
