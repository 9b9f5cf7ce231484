use actix_web::{mime, web, HttpMessage, HttpRequest, HttpResponse};
use std::convert::TryFrom;

use crate::{
    database::DocumentStore,
    identity::IdentityProvider,
    models::{Cashier, CreateCashierRequest, CreateCashierResponse, NewCashier},
    CashierError,
};

/// Largest request body read before it is rejected as invalid
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Body extraction for the provisioning endpoint
///
/// Every way the body can fail to extract (wrong content type, too large,
/// not the expected JSON) is answered as an invalid request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| CashierError::from(err).into())
}

/// Provisions a cashier account from a `{"data": {...}}` body.
///
/// The body is checked in order, the first problem found is returned:
/// it has to be JSON with a `data` object, then `email`, `password` and
/// `displayName` all have to be non-empty. A valid request creates the
/// identity record, writes the profile document and returns the new
/// cashier's `uid`, `email` and `displayName`.
#[tracing::instrument(name = "create_cashier", skip(req, body, identity, store))]
pub async fn create_cashier<I, D>(
    req: HttpRequest,
    body: web::Json<CreateCashierRequest>,
    identity: web::Data<I>,
    store: web::Data<D>,
) -> Result<HttpResponse, CashierError>
where
    I: IdentityProvider + 'static,
    D: DocumentStore + 'static,
{
    if !is_json(&req) {
        return Err(CashierError::InvalidRequest);
    }

    let new_cashier = NewCashier::try_from(body.into_inner())?;
    let cashier = Cashier::provision(new_cashier, identity.get_ref(), store.get_ref()).await?;

    Ok(HttpResponse::Ok().json(CreateCashierResponse::from(cashier)))
}

/// `application/json`, or any `application/*+json` type
///
/// The extractor also lets through other top-level types with a JSON
/// subtype, such as `text/json`, which are refused here.
fn is_json(req: &HttpRequest) -> bool {
    match req.mime_type() {
        Ok(Some(mime)) => {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        }
        _ => false,
    }
}
