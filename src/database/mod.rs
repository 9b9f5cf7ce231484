mod firestore;
mod lazy;

pub use firestore::FirestoreClient;
pub use lazy::LazyDocumentStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::google::CredentialsError;

/// Field name to value, in the order the store will receive them
pub type Document = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Boolean(bool),
    /// Filled in by the store with the time it applied the write
    ServerTimestamp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteResult {
    pub update_time: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{message}")]
    Rejected {
        status: Option<String>,
        message: String,
    },

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from document store: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `document` under `collection/key`, replacing anything already
    /// stored there
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<WriteResult, StoreError>;
}
