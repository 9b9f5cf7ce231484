use secrecy::Secret;
use serde::Deserialize;
use std::convert::TryFrom;

use crate::CashierError;

/// Body accepted by the provisioning endpoint
///
/// Everything is optional at this level so that an absent `data` object and
/// absent fields can be told apart and reported with their own messages.
#[derive(Debug, Deserialize)]
pub struct CreateCashierRequest {
    pub data: Option<CashierFields>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CashierFields {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
}

/// A validated request to provision a cashier
#[derive(Debug)]
pub struct NewCashier {
    pub email: String,
    pub password: Secret<String>,
    pub display_name: String,
}

impl TryFrom<CreateCashierRequest> for NewCashier {
    type Error = CashierError;

    fn try_from(request: CreateCashierRequest) -> Result<Self, Self::Error> {
        let data = request.data.ok_or(CashierError::InvalidRequest)?;

        match (
            non_empty(data.email),
            non_empty(data.password),
            non_empty(data.display_name),
        ) {
            (Some(email), Some(password), Some(display_name)) => Ok(Self {
                email,
                password: Secret::new(password),
                display_name,
            }),
            _ => Err(CashierError::MissingFields),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
