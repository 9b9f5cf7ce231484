use serde::Serialize;
use tracing::{field, warn, Span};

use crate::{
    database::{Document, DocumentStore, FieldValue},
    identity::IdentityProvider,
    models::{NewCashier, Uid},
    Result,
};

/// Collection holding one profile document per provisioned account
pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Cashier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cashier => "cashier",
        }
    }
}

/// The identity handed back to the caller once provisioning succeeds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Cashier {
    pub uid: Uid,
    pub email: String,
    pub display_name: String,
}

/// Profile stored in the document store, keyed by the account's `uid`
///
/// `createdAt` isn't held here, it's requested as a server timestamp when
/// the profile is converted into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CashierProfile {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateCashierResponse {
    pub success: bool,
    pub cashier: Cashier,
}

impl Cashier {
    /// Creates the identity record and then writes the matching profile.
    ///
    /// The two writes are independent: if the profile write fails the
    /// identity record is left in place and the error is returned as is.
    #[tracing::instrument(
        name = "provision_cashier",
        skip(new_cashier, identity, store),
        fields(model = "Cashier", uid = field::Empty)
    )]
    pub async fn provision<I, D>(new_cashier: NewCashier, identity: &I, store: &D) -> Result<Self>
    where
        I: IdentityProvider,
        D: DocumentStore,
    {
        let user = identity
            .create_user(
                &new_cashier.email,
                &new_cashier.password,
                &new_cashier.display_name,
            )
            .await?;
        Span::current().record("uid", &field::display(&user.uid));

        let profile = CashierProfile::new(&new_cashier);
        if let Err(e) = store
            .set(USERS_COLLECTION, user.uid.as_str(), profile.into_document())
            .await
        {
            warn!(
                uid = %user.uid,
                "identity record was created but the profile document was not written"
            );
            return Err(e.into());
        }

        Ok(Self {
            uid: user.uid,
            email: new_cashier.email,
            display_name: new_cashier.display_name,
        })
    }
}

impl CashierProfile {
    pub fn new(new_cashier: &NewCashier) -> Self {
        Self {
            email: new_cashier.email.clone(),
            display_name: new_cashier.display_name.clone(),
            role: Role::Cashier,
            active: true,
        }
    }

    pub fn into_document(self) -> Document {
        let mut document = Document::new();
        document.insert("email".into(), FieldValue::String(self.email));
        document.insert("displayName".into(), FieldValue::String(self.display_name));
        document.insert(
            "role".into(),
            FieldValue::String(self.role.as_str().to_owned()),
        );
        document.insert("active".into(), FieldValue::Boolean(self.active));
        document.insert("createdAt".into(), FieldValue::ServerTimestamp);
        document
    }
}

impl From<Cashier> for CreateCashierResponse {
    fn from(cashier: Cashier) -> Self {
        Self {
            success: true,
            cashier,
        }
    }
}
