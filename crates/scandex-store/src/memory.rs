// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory record store.
//
// Honors the exact `RecordStore` contract (validation, ordering, NotFound
// semantics) without a network, so the capture and export flows can be
// tested against it and the CLI can run offline.

use std::sync::Mutex;

use async_trait::async_trait;
use scandex_core::error::{Result, ScandexError};
use scandex_core::types::{IdRecord, RecordId};
use tracing::debug;

use crate::RecordStore;

struct MemoryInner {
    rows: Vec<IdRecord>,
    next_id: i64,
}

/// Record store kept entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl Default for MemoryInner {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().expect("memory store lock poisoned")
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, draft: &IdRecord) -> Result<RecordId> {
        draft.validate_for_create()?;

        let mut inner = self.lock();
        let id = RecordId(inner.next_id);
        inner.next_id += 1;

        let mut record = draft.clone();
        record.id = Some(id);
        inner.rows.push(record);

        debug!(%id, "record created in memory");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<IdRecord>> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| b.scan_date.cmp(&a.scan_date));
        Ok(rows)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<IdRecord> {
        self.lock()
            .rows
            .iter()
            .find(|r| r.id == Some(id))
            .cloned()
            .ok_or(ScandexError::NotFound(id.0))
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<()> {
        let mut inner = self.lock();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != Some(id));
        if inner.rows.len() == before {
            return Err(ScandexError::NotFound(id.0));
        }
        debug!(%id, "record deleted from memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn draft(name: &str, id_number: &str) -> IdRecord {
        IdRecord {
            name: name.into(),
            id_number: id_number.into(),
            date_of_birth: "1990-01-01".into(),
            address: "123 Main St".into(),
            ..IdRecord::draft(Utc::now())
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_every_field_except_id() {
        let store = MemoryStore::new();
        let mut d = draft("John Doe", "ID12345678");
        d.issue_date = Some("2020-01-01".into());
        d.additional_info = Some("spot check".into());

        let id = store.create(&d).await.expect("create");
        let fetched = store.get_by_id(id).await.expect("get");

        assert_eq!(fetched.id, Some(id));
        let mut expected = d.clone();
        expected.id = Some(id);
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_without_storing_it() {
        let store = MemoryStore::new();
        let mut d = draft("", "ID1");
        d.name.clear();

        let err = store.create(&d).await.unwrap_err();
        assert!(matches!(err, ScandexError::Validation(_)));
        assert!(store.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn list_orders_by_scan_date_descending_regardless_of_creation_order() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let mut oldest = draft("A", "ID-A");
        oldest.scan_date = now - Duration::days(2);
        let mut middle = draft("B", "ID-B");
        middle.scan_date = now - Duration::days(1);
        let mut newest = draft("C", "ID-C");
        newest.scan_date = now;

        // Created out of order on purpose.
        store.create(&middle).await.expect("create");
        store.create(&newest).await.expect("create");
        store.create(&oldest).await.expect("create");

        let names: Vec<_> = store
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing_without_error() {
        let store = MemoryStore::new();
        assert!(store.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() {
        let store = MemoryStore::new();
        let id = store
            .create(&draft("John Doe", "ID12345678"))
            .await
            .expect("create");

        store.delete_by_id(id).await.expect("first delete");
        assert!(matches!(
            store.get_by_id(id).await,
            Err(ScandexError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_by_id(id).await,
            Err(ScandexError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn identifiers_are_unique_across_creates() {
        let store = MemoryStore::new();
        let a = store.create(&draft("A", "ID-A")).await.expect("create");
        let b = store.create(&draft("B", "ID-B")).await.expect("create");
        assert_ne!(a, b);
    }
}
