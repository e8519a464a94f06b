// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP-backed record store speaking the PostgREST row-filter dialect.
//
// The remote collection is one table of record rows keyed by a
// server-assigned integer id:
//
//   POST   /rest/v1/<table>                 insert, returns representation
//   GET    /rest/v1/<table>?select=*&order=scanDate.desc
//   GET    /rest/v1/<table>?select=*&id=eq.<id>
//   DELETE /rest/v1/<table>?id=eq.<id>      returns deleted rows
//
// Column names on the wire are camelCase, matching the collection schema.
// Every request carries the API key and a per-call deadline from
// `StoreConfig`; there is no retry here — retry is a user-initiated
// re-invocation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use scandex_core::config::StoreConfig;
use scandex_core::error::{Result, ScandexError};
use scandex_core::types::{IdRecord, RecordId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::RecordStore;

/// One record row as the remote collection stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
    date_of_birth: String,
    id_number: String,
    address: String,
    issue_date: Option<String>,
    expiry_date: Option<String>,
    /// RFC 3339 timestamp.
    scan_date: String,
    image_uri: Option<String>,
    additional_info: Option<String>,
}

impl RecordRow {
    fn from_record(record: &IdRecord) -> Self {
        Self {
            id: record.id.map(|RecordId(n)| n),
            name: record.name.clone(),
            date_of_birth: record.date_of_birth.clone(),
            id_number: record.id_number.clone(),
            address: record.address.clone(),
            issue_date: record.issue_date.clone(),
            expiry_date: record.expiry_date.clone(),
            scan_date: record.scan_date.to_rfc3339(),
            image_uri: record.image_uri.clone(),
            additional_info: record.additional_info.clone(),
        }
    }

    fn into_record(self) -> Result<IdRecord> {
        let scan_date = DateTime::parse_from_rfc3339(&self.scan_date)
            .map_err(|e| {
                ScandexError::StoreUnavailable(format!(
                    "malformed scanDate {:?} in row {:?}: {e}",
                    self.scan_date, self.id
                ))
            })?
            .with_timezone(&Utc);

        Ok(IdRecord {
            id: self.id.map(RecordId),
            name: self.name,
            date_of_birth: self.date_of_birth,
            id_number: self.id_number,
            address: self.address,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            scan_date,
            image_uri: self.image_uri,
            additional_info: self.additional_info,
        })
    }
}

/// Record store backed by a remote PostgREST-style collection.
///
/// Stateless with respect to concurrency: each call is an independent
/// round-trip and may be issued concurrently with calls against other
/// identifiers.  Construct one handle and pass it to whatever needs it —
/// there is no hidden process-wide client.
pub struct RemoteStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl RemoteStore {
    /// Build a store handle from connection settings.
    ///
    /// The per-request deadline and authentication headers are fixed here;
    /// individual calls add only their row filters.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ScandexError::StoreUnavailable(format!("invalid API key: {e}")))?;
        headers.insert("apikey", key);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ScandexError::StoreUnavailable(format!("invalid API key: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ScandexError::StoreUnavailable(format!("client setup: {e}")))?;

        Ok(Self { client, config })
    }

    /// URL of the record collection.
    fn collection_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn transport_err(e: reqwest::Error) -> ScandexError {
        ScandexError::StoreUnavailable(e.to_string())
    }

    async fn fetch_rows(&self, query: &[(&str, String)]) -> Result<Vec<RecordRow>> {
        let response = self
            .client
            .get(self.collection_url())
            .query(query)
            .send()
            .await
            .map_err(Self::transport_err)?
            .error_for_status()
            .map_err(Self::transport_err)?;

        response.json().await.map_err(Self::transport_err)
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    #[instrument(skip_all, fields(table = %self.config.table))]
    async fn create(&self, draft: &IdRecord) -> Result<RecordId> {
        draft.validate_for_create()?;

        let row = RecordRow::from_record(draft);
        let response = self
            .client
            .post(self.collection_url())
            // Ask the backend to echo the inserted row so we get the
            // assigned id back in one round-trip.
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(Self::transport_err)?
            .error_for_status()
            .map_err(Self::transport_err)?;

        let mut rows: Vec<RecordRow> = response.json().await.map_err(Self::transport_err)?;
        let inserted = rows
            .pop()
            .ok_or_else(|| ScandexError::StoreUnavailable("insert returned no row".into()))?;
        let id = inserted
            .id
            .ok_or_else(|| ScandexError::StoreUnavailable("insert returned no id".into()))?;

        debug!(id, "record created");
        Ok(RecordId(id))
    }

    #[instrument(skip_all, fields(table = %self.config.table))]
    async fn list(&self) -> Result<Vec<IdRecord>> {
        let rows = self
            .fetch_rows(&[
                ("select", "*".into()),
                ("order", "scanDate.desc".into()),
            ])
            .await?;

        debug!(count = rows.len(), "records listed");
        rows.into_iter().map(RecordRow::into_record).collect()
    }

    #[instrument(skip_all, fields(table = %self.config.table, id = id.0))]
    async fn get_by_id(&self, id: RecordId) -> Result<IdRecord> {
        let mut rows = self
            .fetch_rows(&[("select", "*".into()), ("id", format!("eq.{}", id.0))])
            .await?;

        match rows.pop() {
            Some(row) => row.into_record(),
            None => Err(ScandexError::NotFound(id.0)),
        }
    }

    #[instrument(skip_all, fields(table = %self.config.table, id = id.0))]
    async fn delete_by_id(&self, id: RecordId) -> Result<()> {
        let response = self
            .client
            .delete(self.collection_url())
            .query(&[("id", format!("eq.{}", id.0))])
            // The echoed representation distinguishes a hit from a miss:
            // deleting an absent id succeeds with zero rows.
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(Self::transport_err)?
            .error_for_status()
            .map_err(Self::transport_err)?;

        let deleted: Vec<RecordRow> = response.json().await.map_err(Self::transport_err)?;
        if deleted.is_empty() {
            return Err(ScandexError::NotFound(id.0));
        }

        debug!(id = id.0, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> IdRecord {
        IdRecord {
            id: None,
            name: "John Doe".into(),
            date_of_birth: "1990-01-01".into(),
            id_number: "ID12345678".into(),
            address: "123 Main St".into(),
            issue_date: Some("2020-01-01".into()),
            expiry_date: None,
            scan_date: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            image_uri: None,
            additional_info: Some("checked at gate".into()),
        }
    }

    #[test]
    fn wire_rows_use_camel_case_columns() {
        let row = RecordRow::from_record(&sample_record());
        let json = serde_json::to_value(&row).expect("serialize");

        assert_eq!(json["name"], "John Doe");
        assert_eq!(json["dateOfBirth"], "1990-01-01");
        assert_eq!(json["idNumber"], "ID12345678");
        assert_eq!(json["issueDate"], "2020-01-01");
        assert_eq!(json["additionalInfo"], "checked at gate");
        assert!(json["scanDate"].as_str().unwrap().starts_with("2024-01-01T10:00:00"));
        // Drafts must not send an id for the server to fight with.
        assert!(json.get("id").is_none());
    }

    #[test]
    fn wire_row_round_trips_to_record() {
        let original = sample_record();
        let row = RecordRow::from_record(&original);
        let json = serde_json::to_string(&row).expect("serialize");
        let parsed: RecordRow = serde_json::from_str(&json).expect("deserialize");
        let back = parsed.into_record().expect("convert");

        assert_eq!(back, original);
    }

    #[test]
    fn malformed_scan_date_is_rejected() {
        let mut row = RecordRow::from_record(&sample_record());
        row.scan_date = "yesterday-ish".into();
        assert!(matches!(
            row.into_record(),
            Err(ScandexError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn collection_url_tolerates_trailing_slash() {
        let store = RemoteStore::new(StoreConfig {
            base_url: "https://example.supabase.co/".into(),
            api_key: "anon-key".into(),
            ..StoreConfig::default()
        })
        .expect("store");
        assert_eq!(
            store.collection_url(),
            "https://example.supabase.co/rest/v1/id_scans"
        );
    }
}
