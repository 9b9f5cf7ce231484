use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use std::sync::{Arc, Mutex};

use cashier::{
    database::{Document, DocumentStore, StoreError, WriteResult},
    identity::{IdentityError, IdentityProvider, UserRecord},
    models::Uid,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub uid: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Hands out `U1`, `U2`, ... and refuses duplicate emails the way a real
/// provider does
#[derive(Clone, Default)]
pub struct FakeIdentityProvider {
    accounts: Arc<Mutex<Vec<Account>>>,
    failure: Option<String>,
}

impl FakeIdentityProvider {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::default()
        }
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn create_user(
        &self,
        email: &str,
        password: &Secret<String>,
        display_name: &str,
    ) -> Result<UserRecord, IdentityError> {
        if let Some(message) = &self.failure {
            return Err(IdentityError::Rejected {
                code: "INTERNAL_ERROR".into(),
                message: message.clone(),
            });
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|account| account.email == email) {
            return Err(IdentityError::Rejected {
                code: "EMAIL_EXISTS".into(),
                message: "The user with the provided email already exists (EMAIL_EXISTS).".into(),
            });
        }

        let uid = format!("U{}", accounts.len() + 1);
        accounts.push(Account {
            uid: uid.clone(),
            email: email.to_owned(),
            password: password.expose_secret().clone(),
            display_name: display_name.to_owned(),
        });
        Ok(UserRecord {
            uid: Uid::from(uid),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: String,
    pub key: String,
    pub fields: Document,
}

#[derive(Clone, Default)]
pub struct FakeDocumentStore {
    documents: Arc<Mutex<Vec<StoredDocument>>>,
    failure: Option<String>,
}

impl FakeDocumentStore {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.documents.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        if let Some(message) = &self.failure {
            return Err(StoreError::Rejected {
                status: Some("UNAVAILABLE".into()),
                message: message.clone(),
            });
        }

        let mut documents = self.documents.lock().unwrap();
        documents.retain(|d| !(d.collection == collection && d.key == key));
        documents.push(StoredDocument {
            collection: collection.to_owned(),
            key: key.to_owned(),
            fields: document,
        });
        Ok(WriteResult {
            update_time: Utc::now(),
        })
    }
}
