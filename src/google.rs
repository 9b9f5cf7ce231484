//! Pieces shared by the Google REST APIs behind Firebase: resolving the
//! bearer token sent with every call and reading their error bodies.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::configuration::{CredentialKind, FirebaseSettings};

/// The emulator suite treats this token as an admin credential
const EMULATOR_TOKEN: &str = "owner";
const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
/// Cached tokens are refreshed this many seconds before they expire
const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Credentials are set to `access_token` but no access token was configured")]
    MissingAccessToken,

    #[error("Failed to fetch an access token from the metadata server: {0}")]
    MetadataServer(#[from] reqwest::Error),

    #[error("Metadata server responded with status {status}: {body}")]
    MetadataRejected { status: u16, body: String },
}

enum TokenSource {
    Emulator,
    Static(Secret<String>),
    MetadataServer { url: String },
}

struct CachedToken {
    token: Secret<String>,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: Secret<String>,
    expires_in: i64,
}

/// Resolves the bearer token for outbound calls
///
/// Tokens from the metadata server are cached until shortly before they
/// expire, the other sources are fixed for the life of the process.
pub struct TokenProvider {
    source: TokenSource,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn from_settings(settings: &FirebaseSettings) -> Result<Self, CredentialsError> {
        let source = match settings.credentials {
            CredentialKind::Emulator => TokenSource::Emulator,
            CredentialKind::AccessToken => TokenSource::Static(
                settings
                    .access_token
                    .clone()
                    .ok_or(CredentialsError::MissingAccessToken)?,
            ),
            CredentialKind::MetadataServer => TokenSource::MetadataServer {
                url: format!(
                    "{}{}",
                    settings.metadata_url.trim_end_matches('/'),
                    METADATA_TOKEN_PATH
                ),
            },
        };
        Ok(Self {
            source,
            cache: Mutex::new(None),
        })
    }

    pub async fn bearer_token(&self, client: &Client) -> Result<Secret<String>, CredentialsError> {
        match &self.source {
            TokenSource::Emulator => Ok(Secret::new(EMULATOR_TOKEN.to_owned())),
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::MetadataServer { url } => self.metadata_token(client, url).await,
        }
    }

    async fn metadata_token(
        &self,
        client: &Client,
        url: &str,
    ) -> Result<Secret<String>, CredentialsError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at - Duration::seconds(EXPIRY_MARGIN_SECONDS) > Utc::now() {
                return Ok(cached.token.clone());
            }
        }

        debug!("fetching access token from the metadata server");
        let response = client
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialsError::MetadataRejected {
                status: status.as_u16(),
                body,
            });
        }

        let fetched: MetadataToken = response.json().await?;
        let token = fetched.access_token.clone();
        *cache = Some(CachedToken {
            token: fetched.access_token,
            expires_at: Utc::now() + Duration::seconds(fetched.expires_in),
        });
        Ok(token)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// The `error` object Google APIs answer with on failure
#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiError {
    /// Reads the error out of a failed response, falling back to the raw body
    /// when it isn't in the usual envelope
    pub async fn from_response(response: reqwest::Response) -> Self {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => envelope.error,
            Err(_) => Self {
                code,
                message: if body.trim().is_empty() {
                    format!("HTTP status {}", code)
                } else {
                    body
                },
                status: None,
            },
        }
    }
}
