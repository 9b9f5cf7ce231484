use cashier::{
    build_app,
    database::{FirestoreClient, LazyDocumentStore},
    get_configuration,
    identity::FirebaseAuthClient,
    telemetry::{generate_subscriber, init_subscriber},
};
use std::net::TcpListener;
use tracing::info;

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let subscriber = generate_subscriber(
        String::from("cashier"),
        String::from("info"),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("failed to read configuration");

    let identity =
        FirebaseAuthClient::new(&configuration.firebase).expect("failed to build auth client");

    // The Firestore client isn't built until the first request needs it
    let firebase = configuration.firebase.clone();
    let store = LazyDocumentStore::new(move || FirestoreClient::new(&firebase));

    let addr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&addr)?;
    info!(
        %addr,
        region = %configuration.application.region,
        project_id = %configuration.firebase.project_id,
        "cashier provisioning service listening"
    );

    build_app(listener, identity, store)?.await
}
