use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    configuration::FirebaseSettings,
    google::{ApiError, TokenProvider},
    identity::{IdentityError, IdentityProvider, UserRecord},
    models::Uid,
};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const MIN_PASSWORD_LENGTH: usize = 6;

/// Descriptions for the error codes the accounts endpoint is known to return
const AUTH_ERRORS: &[(&str, &str)] = &[
    ("EMAIL_EXISTS", "The user with the provided email already exists"),
    ("INVALID_EMAIL", "The email address is improperly formatted"),
    ("WEAK_PASSWORD", "The password must be a string with at least 6 characters"),
    ("INVALID_PASSWORD", "The provided password is invalid"),
    ("PROJECT_NOT_FOUND", "No Firebase project found for the provided credential"),
    (
        "INSUFFICIENT_PERMISSION",
        "The credential used to initialize the client has insufficient permission to perform the requested operation",
    ),
    (
        "CONFIGURATION_NOT_FOUND",
        "No auth provider found for the given identifier",
    ),
];

/// Creates accounts through the Firebase Auth (Identity Toolkit) admin API
pub struct FirebaseAuthClient {
    client: Client,
    accounts_url: String,
    tokens: TokenProvider,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountBody<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedAccount {
    local_id: String,
}

impl FirebaseAuthClient {
    pub fn new(settings: &FirebaseSettings) -> Result<Self, IdentityError> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;
        Ok(Self {
            client,
            accounts_url: format!(
                "{}/v1/projects/{}/accounts",
                settings.auth_base_url.trim_end_matches('/'),
                settings.project_id
            ),
            tokens: TokenProvider::from_settings(settings)?,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    #[tracing::instrument(
        skip(self, email, password, display_name),
        fields(provider = "firebase_auth")
    )]
    async fn create_user(
        &self,
        email: &str,
        password: &Secret<String>,
        display_name: &str,
    ) -> Result<UserRecord, IdentityError> {
        validate_email(email)?;
        validate_password(password)?;
        validate_display_name(display_name)?;

        let token = self.tokens.bearer_token(&self.client).await?;
        let response = self
            .client
            .post(&self.accounts_url)
            .bearer_auth(token.expose_secret())
            .json(&CreateAccountBody {
                email,
                password: password.expose_secret(),
                display_name,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let error = ApiError::from_response(response).await;
            return Err(rejection(&error));
        }

        let created: CreatedAccount = response
            .json()
            .await
            .map_err(|e| IdentityError::UnexpectedResponse(e.to_string()))?;
        Ok(UserRecord {
            uid: Uid::from(created.local_id),
        })
    }
}

fn validate_email(email: &str) -> Result<(), IdentityError> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(IdentityError::InvalidArgument(format!(
            "Malformed email address string: \"{}\".",
            email
        ))),
    }
}

fn validate_password(password: &Secret<String>) -> Result<(), IdentityError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(IdentityError::InvalidArgument(
            "Invalid password string. Password must be a string at least 6 characters long."
                .into(),
        ));
    }
    Ok(())
}

fn validate_display_name(display_name: &str) -> Result<(), IdentityError> {
    if display_name.is_empty() {
        return Err(IdentityError::InvalidArgument(
            "Display name must be a non-empty string.".into(),
        ));
    }
    Ok(())
}

/// Turns the `CODE` or `CODE : detail` message of a failed call into a
/// readable error
fn rejection(error: &ApiError) -> IdentityError {
    let raw = error.message.as_str();
    let (code, detail) = match raw.split_once(':') {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };
    warn!(
        http_status = error.code,
        code,
        "accounts endpoint rejected the request"
    );

    let mut message = match AUTH_ERRORS.iter().find(|(known, _)| *known == code) {
        Some((_, description)) => format!("{} ({}).", description, code),
        None => format!("Error while calling Auth service ({}).", code),
    };
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        message.push(' ');
        message.push_str(detail);
    }

    IdentityError::Rejected {
        code: code.to_owned(),
        message,
    }
}
