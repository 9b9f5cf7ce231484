use actix_web::{
    error::{JsonPayloadError, ResponseError},
    http::StatusCode,
    HttpResponse,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::{database::StoreError, identity::IdentityError};

pub type Result<T, E = CashierError> = std::result::Result<T, E>;

/// Failures of a provisioning request
///
/// The first two are caused by the caller and carry fixed messages. Anything
/// raised by the identity provider or the document store is passed through
/// with its own message.
#[derive(Debug, Error)]
pub enum CashierError {
    #[error("Invalid request")]
    InvalidRequest,

    #[error("Missing fields")]
    MissingFields,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for CashierError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::Identity(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(err = ?self, "failed to provision cashier");
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<JsonPayloadError> for CashierError {
    fn from(e: JsonPayloadError) -> CashierError {
        warn!(err = %e, "request body could not be read as json");
        CashierError::InvalidRequest
    }
}
