use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::{Extension, Router};
use tower_http::timeout::TimeoutLayer;

use crate::api::rest::dto::AddressEvent;
use crate::api::rest::handlers;
use crate::api::rest::sse_adapter::SseBroadcaster;
use crate::config::AddressesConfig;
use crate::module::ConcreteService;

fn sse_route(sse: SseBroadcaster<AddressEvent>) -> Router {
    Router::new()
        .route("/events", get(handlers::address_events))
        .layer(Extension(sse))
        .layer(TimeoutLayer::with_status_code(
            http::StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(60 * 60),
        ))
}

/// Mount the address admin routes under `/{admin_prefix}` on `router`.
#[allow(clippy::needless_pass_by_value)] // Arc is intentionally passed by value for Extension layer
pub(crate) fn register_routes(
    router: Router,
    cfg: Arc<AddressesConfig>,
    service: Arc<ConcreteService>,
    sse: SseBroadcaster<AddressEvent>,
) -> Router {
    // /{prefix}/api/address/...
    let api = Router::new()
        .route(
            "/",
            get(handlers::list_addresses_page)
                .post(handlers::create_address)
                .delete(handlers::delete_soft),
        )
        .route("/list", get(handlers::list_addresses))
        .route("/options", get(handlers::address_options))
        .route("/form", get(handlers::address_form))
        .route("/openapi.json", get(handlers::openapi_json))
        .route("/force", delete(handlers::delete_force))
        .route("/restore", post(handlers::restore))
        .route(
            "/{id}",
            get(handlers::get_address).put(handlers::update_address),
        )
        .merge(sse_route(sse));

    let admin = Router::new()
        .route("/address", get(handlers::index_page))
        .nest("/api/address", api)
        .layer(Extension(service))
        .layer(Extension(Arc::clone(&cfg)));

    let prefix = cfg.admin_prefix.trim_matches('/');
    if prefix.is_empty() {
        router.merge(admin)
    } else {
        router.nest(&format!("/{prefix}"), admin)
    }
}
