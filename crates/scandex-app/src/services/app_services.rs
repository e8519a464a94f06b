// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — wires the store, the capture flow, and the
// exporter together for the front-end.
//
// Every collaborator is constructor-injected: the store handle and the
// extraction adapter are explicit values passed around, not process-wide
// singletons, so tests can substitute either without touching the flows.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scandex_bridge::platform_bridge;
use scandex_capture::{CannedExtractor, CaptureOrchestrator, CaptureProgress, ExtractionAdapter};
use scandex_core::AppConfig;
use scandex_core::error::{Result, ScandexError};
use scandex_core::types::{CapturedImage, IdRecord, RecordId};
use scandex_export::ExportOutcome;
use scandex_store::{MemoryStore, RecordStore, RemoteStore};
use tracing::info;

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services for whatever front-end sits on top.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn RecordStore>,
    adapter: Arc<dyn ExtractionAdapter>,
    config: AppConfig,
    data_dir: PathBuf,
}

impl AppServices {
    /// Initialise with the persisted config (plus environment overrides
    /// for the store endpoint) and the canned extraction stand-in.
    ///
    /// Falls back to the in-memory store when no remote endpoint is
    /// configured, so the tool remains usable offline.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let mut config = match load_config(&dir) {
            Some(config) => config,
            None => {
                // First run: write the defaults out so there is a file to
                // point a store endpoint into.
                let config = AppConfig::default();
                persist_config(&dir, &config)?;
                config
            }
        };
        if let Ok(url) = std::env::var("SCANDEX_STORE_URL") {
            config.store.base_url = url;
        }
        if let Ok(key) = std::env::var("SCANDEX_STORE_KEY") {
            config.store.api_key = key;
        }

        let store: Arc<dyn RecordStore> = if config.store.base_url.is_empty() {
            info!("no store endpoint configured, using in-memory store");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(RemoteStore::new(config.store.clone())?)
        };

        Ok(Self::with_parts(
            store,
            Arc::new(CannedExtractor::new()),
            config,
            dir,
        ))
    }

    /// Assemble services from explicit collaborators.
    pub fn with_parts(
        store: Arc<dyn RecordStore>,
        adapter: Arc<dyn ExtractionAdapter>,
        config: AppConfig,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            store,
            adapter,
            config,
            data_dir,
        }
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// Start a fresh two-sided capture session.
    pub fn new_capture_session(&self) -> CaptureOrchestrator {
        CaptureOrchestrator::with_timeout(self.adapter.clone(), self.config.extraction_timeout())
    }

    /// Drive a complete two-sided capture: front image, back image, merged
    /// draft out.  The draft is not persisted — review happens first.
    pub async fn scan_document(
        &self,
        front: CapturedImage,
        back: CapturedImage,
    ) -> Result<IdRecord> {
        let session = self.new_capture_session();

        match session.submit_image(front).await? {
            CaptureProgress::FrontComplete => {}
            CaptureProgress::Complete(_) => {
                // Front submission can only ever complete the front side.
                return Err(ScandexError::CaptureBusy);
            }
        }
        session.begin_back_side()?;

        match session.submit_image(back).await? {
            CaptureProgress::Complete(mut draft) => {
                if !self.config.keep_image_reference {
                    draft.image_uri = None;
                }
                Ok(draft)
            }
            CaptureProgress::FrontComplete => Err(ScandexError::CaptureBusy),
        }
    }

    /// Persist a reviewed draft.
    pub async fn save_record(&self, draft: &IdRecord) -> Result<RecordId> {
        self.store.create(draft).await
    }

    /// Export every record to a spreadsheet in `out_dir` and offer it via
    /// the share sheet.
    ///
    /// Refuses when there is nothing to export — a header-only file is
    /// useless to share, so this caller blocks it.
    pub async fn export_all(&self, out_dir: &Path) -> Result<ExportOutcome> {
        let records = self.store.list().await?;
        if records.is_empty() {
            return Err(ScandexError::Export("no records to export".into()));
        }

        let bridge = platform_bridge();
        scandex_export::export_records(&records, out_dir, bridge.as_share())
    }

    /// Default directory for exported spreadsheets.
    pub fn export_dir(&self) -> PathBuf {
        let dir = self.data_dir.join("exports");
        std::fs::create_dir_all(&dir).ok();
        dir
    }
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Write the config back out as pretty JSON for the next run.
pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
