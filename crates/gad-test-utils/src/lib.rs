//! Testing utilities for the GAD Databank workspace
//!
//! Shared identities, staged-file factories and a fully wired engine
//! harness backed by a temp directory.

#![allow(missing_docs)]

use gad_notify::NotificationBus;
use gad_registry::Registry;
use gad_store::{BlobStore, StoreConfig};
use gad_workflow::projection::SubmissionViews;
use gad_workflow::{Identity, Role, StagedFile, WorkflowEngine};
use std::sync::Arc;
use tempfile::TempDir;

pub const XLSX_MIME: &str = "application/vnd.ms-excel";

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary.
///
/// Safe to call from every test; repeat installs are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gad_workflow=info".into()),
        )
        .try_init();
}

/// Provider "A. Reyes" of office CPDSO, the canonical submitter fixture.
pub fn provider_reyes() -> Identity {
    Identity::new(Role::Provider, "CPDSO", "A.", "Reyes")
}

/// A second provider from a different office, for visibility scenarios.
pub fn provider_dizon() -> Identity {
    Identity::new(Role::Provider, "CHO", "L.", "Dizon")
}

/// Reviewer "R. Santos" (office CMO).
pub fn reviewer_santos() -> Identity {
    Identity::new(Role::Reviewer, "CMO", "R.", "Santos")
}

/// Administrator fixture.
pub fn admin_cruz() -> Identity {
    Identity::new(Role::Administrator, "CMO", "M.", "Cruz")
}

/// A staged spreadsheet with deterministic content of length `len`.
pub fn staged_xlsx(name: &str, len: usize) -> StagedFile {
    let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    StagedFile::new(name, XLSX_MIME, bytes)
}

/// A wired-up engine plus the views and raw stores it runs on.
///
/// Keeps its temp directory alive for the life of the harness.
pub struct TestHarness {
    pub engine: WorkflowEngine,
    pub views: SubmissionViews,
    pub blobs: Arc<BlobStore>,
    pub registry: Arc<Registry>,
    pub bus: Arc<NotificationBus>,
    _dir: TempDir,
}

/// Open a harness with unbounded store capacity.
///
/// # Panics
/// Panics on setup failure; this is test scaffolding.
pub async fn harness() -> TestHarness {
    harness_with_config(None).await
}

/// Open a harness whose blob store is capped at `max_total_bytes`.
///
/// # Panics
/// Panics on setup failure; this is test scaffolding.
pub async fn harness_with_capacity(max_total_bytes: u64) -> TestHarness {
    harness_with_config(Some(max_total_bytes)).await
}

async fn harness_with_config(max_total_bytes: Option<u64>) -> TestHarness {
    init_tracing();
    let dir = TempDir::new().expect("temp dir");
    let mut store_config = StoreConfig::new(dir.path());
    if let Some(cap) = max_total_bytes {
        store_config = store_config.with_capacity(cap);
    }

    let blobs = Arc::new(BlobStore::open(store_config).await.expect("blob store"));
    let registry = Arc::new(Registry::open(dir.path()).await.expect("registry"));
    let bus = Arc::new(NotificationBus::open(dir.path()).await.expect("bus"));

    let engine = WorkflowEngine::new(blobs.clone(), registry.clone(), bus.clone());
    let views = SubmissionViews::new(registry.clone(), blobs.clone());

    TestHarness {
        engine,
        views,
        blobs,
        registry,
        bus,
        _dir: dir,
    }
}
