use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::handlers;
use crate::middleware::security_headers_middleware;
use crate::AppState;

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/wallets",
            get(handlers::list_wallets).post(handlers::create_wallet),
        )
        .route(
            "/wallets/:wallet_id",
            get(handlers::get_wallet)
                .put(handlers::update_wallet)
                .delete(handlers::delete_wallet),
        )
        .route(
            "/wallets/:wallet_id/transactions",
            get(handlers::list_wallet_transactions).post(handlers::create_transaction),
        )
        .route(
            "/wallets/:wallet_id/transactions/:transaction_id",
            get(handlers::get_wallet_transaction),
        )
        .route("/transactions", get(handlers::list_transactions))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(security_headers_middleware)),
        )
        .with_state(state)
}
