use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::docs::ApiDoc;
use crate::routes;
use crate::store::HrmsStore;

/// Starts serving on an already bound listener. The returned server must be
/// awaited (or spawned) to run.
pub fn run<S>(store: S, config: Config, listener: TcpListener) -> std::io::Result<Server>
where
    S: HrmsStore + Clone,
{
    info!(addr = ?listener.local_addr().ok(), backend = %config.store_backend, "Server starting...");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(store.clone()))
            .configure(|cfg| routes::configure::<S>(cfg, &config))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
