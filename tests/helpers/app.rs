use std::net::TcpListener;

use cashier::{
    configuration::{CredentialKind, FirebaseSettings},
    database::DocumentStore,
    identity::IdentityProvider,
};

use crate::helpers::{FakeDocumentStore, FakeIdentityProvider, TRACING};

pub struct TestApp {
    pub address: String,
    pub identity: FakeIdentityProvider,
    pub store: FakeDocumentStore,
}

impl TestApp {
    pub fn create_cashier_url(&self) -> String {
        format!("{}/create_cashier", self.address)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(FakeIdentityProvider::default(), FakeDocumentStore::default()).await
}

/// Runs the app against fakes the test keeps a handle on, so whatever the
/// request wrote can be inspected afterwards
pub async fn spawn_app_with(identity: FakeIdentityProvider, store: FakeDocumentStore) -> TestApp {
    let address = spawn_server(identity.clone(), store.clone()).await;
    TestApp {
        address,
        identity,
        store,
    }
}

pub async fn spawn_server<I, D>(identity: I, store: D) -> String
where
    I: IdentityProvider + 'static,
    D: DocumentStore + 'static,
{
    lazy_static::initialize(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = cashier::build_app(listener, identity, store).expect("failed to bind address");

    let _ = tokio::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

/// Settings pointing every Firebase API at a mock server
pub fn firebase_settings(base_url: &str) -> FirebaseSettings {
    FirebaseSettings {
        project_id: "demo-cashier".into(),
        database_id: "(default)".into(),
        credentials: CredentialKind::Emulator,
        access_token: None,
        auth_base_url: base_url.into(),
        firestore_base_url: base_url.into(),
        metadata_url: base_url.into(),
    }
}
