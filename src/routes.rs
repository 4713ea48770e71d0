use std::net::IpAddr;

use crate::{
    api::{attendance, employee},
    config::Config,
    error::HrmsError,
    store::HrmsStore,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, KeyExtractor, PeerIpKeyExtractor,
    governor::{
        NotUntil,
        clock::{Clock, DefaultClock, QuantaInstant},
        middleware::NoOpMiddleware,
    },
};
use actix_web::{
    HttpResponse, HttpResponseBuilder, Responder, Scope, dev::ServiceRequest, get, web,
};
use serde_json::json;
use tracing::warn;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("HRMS Lite Backend is running")
}

/// Peer IP key whose rejections use the `{"message": ...}` error body.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp;

impl KeyExtractor for ClientIp {
    type Key = IpAddr;
    type KeyExtractionError = HrmsError;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        PeerIpKeyExtractor
            .extract(req)
            .map_err(|e| HrmsError::Unexpected(e.body.to_string()))
    }

    fn exceed_rate_limit_response(
        &self,
        negative: &NotUntil<QuantaInstant>,
        mut response: HttpResponseBuilder,
    ) -> HttpResponse {
        let wait = negative
            .wait_time_from(DefaultClock::default().now())
            .as_secs();
        response.json(json!({
            "message": format!("Too many requests, retry in {wait}s")
        }))
    }
}

/// Per-IP limiter for the API scope; `None` when limiting is switched off.
pub fn build_limiter(requests_per_min: u32) -> Option<Governor<ClientIp, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let Some(cfg) = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(ClientIp)
        .finish()
    else {
        warn!(requests_per_min, "Invalid rate limit, API left unlimited");
        return None;
    };
    Some(Governor::new(&cfg))
}

fn api_scope<S: HrmsStore>(prefix: &str) -> Scope {
    // malformed bodies answer like any other validation failure
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| HrmsError::validation(err.to_string()).into());

    web::scope(prefix)
        .app_data(json_config)
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::get().to(employee::list_employees::<S>))
                        .route(web::post().to(employee::create_employee::<S>)),
                )
                // /employees/{id}
                .service(
                    web::resource("/{id}").route(web::delete().to(employee::delete_employee::<S>)),
                ),
        )
        .service(
            web::scope("/attendance")
                // /attendance
                .service(
                    web::resource("")
                        .route(web::get().to(attendance::list_attendance::<S>))
                        .route(web::post().to(attendance::create_attendance::<S>)),
                )
                // /attendance/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::delete().to(attendance::delete_attendance::<S>)),
                ),
        )
}

/// Mounts the employee and attendance resources under `config.api_prefix`.
pub fn configure<S: HrmsStore>(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(index);

    match build_limiter(config.rate_api_per_min) {
        Some(limiter) => cfg.service(api_scope::<S>(&config.api_prefix).wrap(limiter)),
        None => cfg.service(api_scope::<S>(&config.api_prefix)),
    };
}
