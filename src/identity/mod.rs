mod firebase;

pub use firebase::FirebaseAuthClient;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::{google::CredentialsError, models::Uid};

/// The account created by an identity provider
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uid: Uid,
}

/// Every variant displays the provider's own diagnostic text, which is what
/// ends up in the `error` field returned to the caller
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Arguments rejected before any call is made
    #[error("{0}")]
    InvalidArgument(String),

    /// The provider refused to create the account, eg. the email is taken
    #[error("{message}")]
    Rejected { code: String, message: String },

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from Auth service: {0}")]
    UnexpectedResponse(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_user(
        &self,
        email: &str,
        password: &Secret<String>,
        display_name: &str,
    ) -> Result<UserRecord, IdentityError>;
}
