use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::{
    configuration::FirebaseSettings,
    database::{Document, DocumentStore, FieldValue, StoreError, WriteResult},
    google::{ApiError, TokenProvider},
};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Writes documents through the Firestore REST API
///
/// Every `set` is a single-write `commit`, which is the only way to have the
/// server fill in timestamp fields.
pub struct FirestoreClient {
    client: Client,
    commit_url: String,
    documents_path: String,
    tokens: TokenProvider,
}

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    writes: Vec<Write<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Write<'a> {
    update: EncodedDocument<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    update_transforms: Vec<FieldTransform<'a>>,
}

#[derive(Debug, Serialize)]
struct EncodedDocument<'a> {
    name: String,
    fields: BTreeMap<&'a str, EncodedValue<'a>>,
}

#[derive(Debug, Serialize)]
enum EncodedValue<'a> {
    #[serde(rename = "stringValue")]
    String(&'a str),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldTransform<'a> {
    field_path: &'a str,
    set_to_server_value: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    commit_time: DateTime<Utc>,
}

impl FirestoreClient {
    pub fn new(settings: &FirebaseSettings) -> Result<Self, StoreError> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
        let database_path = settings.database_path();
        Ok(Self {
            client,
            commit_url: format!(
                "{}/v1/{}/documents:commit",
                settings.firestore_base_url.trim_end_matches('/'),
                database_path
            ),
            documents_path: format!("{}/documents", database_path),
            tokens: TokenProvider::from_settings(settings)?,
        })
    }
}

impl<'a> CommitRequest<'a> {
    /// A full overwrite of `name`, with server timestamps applied as transforms
    fn set(name: String, document: &'a Document) -> Self {
        let mut fields = BTreeMap::new();
        let mut update_transforms = Vec::new();

        for (field, value) in document {
            match value {
                FieldValue::String(s) => {
                    fields.insert(field.as_str(), EncodedValue::String(s));
                }
                FieldValue::Boolean(b) => {
                    fields.insert(field.as_str(), EncodedValue::Boolean(*b));
                }
                FieldValue::ServerTimestamp => update_transforms.push(FieldTransform {
                    field_path: field,
                    set_to_server_value: "REQUEST_TIME",
                }),
            }
        }

        Self {
            writes: vec![Write {
                update: EncodedDocument { name, fields },
                update_transforms,
            }],
        }
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    #[tracing::instrument(skip(self, document), fields(store = "firestore"))]
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        let name = format!("{}/{}/{}", self.documents_path, collection, key);
        let request = CommitRequest::set(name, &document);

        let token = self.tokens.bearer_token(&self.client).await?;
        let response = self
            .client
            .post(&self.commit_url)
            .bearer_auth(token.expose_secret())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error = ApiError::from_response(response).await;
            warn!(
                http_status = error.code,
                status = ?error.status,
                "commit was rejected"
            );
            return Err(StoreError::Rejected {
                status: error.status,
                message: error.message,
            });
        }

        let committed: CommitResponse = response
            .json()
            .await
            .map_err(|e| StoreError::UnexpectedResponse(e.to_string()))?;
        Ok(WriteResult {
            update_time: committed.commit_time,
        })
    }
}
