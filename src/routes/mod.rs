use std::time::Duration;

use axum::{
    Json, Router,
    extract::{
        Path,
        rejection::{JsonRejection, PathRejection},
    },
    handler::Handler,
    http::{HeaderName, Request, Response, StatusCode, Uri},
    routing::{MethodFilter, get, on},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    contract::{self, HttpMethod, Operation},
    dto::errors::NotFoundBody,
    error::{AppError, AppResult},
    state::AppState,
};

pub mod auth;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod reviews;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mounts handlers at the method and path a contract operation declares.
trait MountOperation {
    fn operation<H, T>(self, op: &Operation, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static;
}

impl MountOperation for Router<AppState> {
    fn operation<H, T>(self, op: &Operation, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let filter = match op.method {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
        };
        self.route(&op.axum_path(), on(filter, handler))
    }
}

// Paths are absolute, so this router is merged rather than nested.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .operation(&contract::auth::SIGNUP, auth::signup)
        .operation(&contract::auth::LOGIN, auth::login)
        .operation(&contract::auth::ME, auth::me)
        .operation(&contract::auth::LOGOUT, auth::logout)
        .operation(&contract::auth::GOOGLE, auth::google)
        .operation(&contract::products::LIST, products::list_products)
        .operation(&contract::products::GET, products::get_product)
        .operation(&contract::favorites::LIST, favorites::list_favorites)
        .operation(&contract::favorites::TOGGLE, favorites::toggle_favorite)
        .operation(&contract::reviews::LIST_FOR_PRODUCT, reviews::list_for_product)
        .operation(&contract::reviews::CREATE, reviews::create_review)
        .operation(&contract::orders::LIST, orders::list_orders)
        .operation(&contract::orders::CREATE, orders::create_order)
}

/// The full application: API, health, docs and the middleware stack.
pub fn create_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    Router::new()
        .route("/health", get(health::health_check))
        .merge(create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(CorsLayer::very_permissive())
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<NotFoundBody>) {
    tracing::debug!(path = %uri.path(), "no route");
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            message: "Not Found".into(),
        }),
    )
}

/// Checks a request body against the operation's input schema, then decodes it.
pub(crate) fn decode_body<T: DeserializeOwned>(
    op: &Operation,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<T> {
    let Json(value) = body.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: None,
    })?;
    op.check_input(&value)?;
    serde_json::from_value(value).map_err(|err| AppError::Validation {
        message: err.to_string(),
        field: None,
    })
}

/// A malformed id cannot name an existing record.
pub(crate) fn path_id(
    path: Result<Path<i32>, PathRejection>,
    resource: &'static str,
) -> AppResult<i32> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound(resource))
}
