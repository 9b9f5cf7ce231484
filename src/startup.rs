use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::{database::DocumentStore, identity::IdentityProvider, routes::*};

/// Builds the server around the two backends a provisioning request writes to
///
/// Both are shared by every worker for the life of the process.
pub fn build_app<I, D>(
    listener: TcpListener,
    identity: I,
    store: D,
) -> Result<Server, std::io::Error>
where
    I: IdentityProvider + 'static,
    D: DocumentStore + 'static,
{
    let identity = web::Data::new(identity);
    let store = web::Data::new(store);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(identity.clone())
            .app_data(store.clone())
            .configure(configure_routes::<I, D>)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Registers the endpoints, the backends are looked up as `web::Data<I>` and
/// `web::Data<D>`
///
/// `/create_cashier` is its own resource so that methods other than POST are
/// answered with 405.
pub fn configure_routes<I, D>(cfg: &mut web::ServiceConfig)
where
    I: IdentityProvider + 'static,
    D: DocumentStore + 'static,
{
    cfg.route("/health_check", web::get().to(health_check))
        .service(
            web::resource("/create_cashier")
                .app_data(json_config())
                .route(web::post().to(create_cashier::<I, D>)),
        );
}
