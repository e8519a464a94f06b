// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scandex — Record persistence.
//
// Records live in a remote collection; this crate defines the CRUD
// contract and two implementations: the real HTTP-backed store and an
// in-memory double for tests and offline development.  There is no
// client-side cache and no offline queue.

pub mod memory;
pub mod remote;

use async_trait::async_trait;
use scandex_core::error::Result;
use scandex_core::types::{IdRecord, RecordId};

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Durable CRUD over scanned ID records.
///
/// Records are immutable once created — there is deliberately no update
/// operation.  Correcting a record means deleting it and creating a new
/// one.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a draft record.  The draft's `id` must be `None`; the store
    /// assigns and returns the identifier.
    ///
    /// # Errors
    ///
    /// `Validation` when name or ID number is empty (checked before any
    /// transport), `StoreUnavailable` on transport or backend failure.
    async fn create(&self, draft: &IdRecord) -> Result<RecordId>;

    /// All records, ordered by scan timestamp, most recent first.  An
    /// empty collection yields an empty vec, not an error.
    async fn list(&self) -> Result<Vec<IdRecord>>;

    /// Fetch one record.  `NotFound` when the identifier does not exist.
    async fn get_by_id(&self, id: RecordId) -> Result<IdRecord>;

    /// Delete one record.  A second delete of the same identifier yields
    /// `NotFound` — deletion is not idempotent.
    async fn delete_by_id(&self, id: RecordId) -> Result<()>;
}
