use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer};

use server::handlers;
use server::identity::{ProfileIdentityProvider, SharedIdentityProvider};
use server::profile::ProfileStore;
use server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let bind = std::env::var("BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let profiles = Arc::new(ProfileStore::new());
    let identity_provider: SharedIdentityProvider =
        Arc::new(ProfileIdentityProvider::new(profiles.clone()));
    let srv_tx = spawn_server();

    log::info!("Relay listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .data(srv_tx.clone())
            .data(profiles.clone())
            .data(identity_provider.clone())
            .configure(handlers::root)
    })
    .bind(bind)?
    .run()
    .await
}
