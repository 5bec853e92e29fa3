pub mod email_template;
pub mod error;
pub mod history;
pub mod products;
pub mod settings;
pub mod webhook;

pub use error::{ApiError, ApiResult};

use crate::services::Mailer;
use crate::store::Store;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub mailer: Arc<dyn Mailer>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/products",
            get(products::list_products)
                .post(products::create_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::save_settings),
        )
        .route(
            "/api/email-template",
            get(email_template::get_template).post(email_template::save_template),
        )
        .route("/api/history", get(history::list_history))
        .route("/api/webhook/yampi", post(webhook::receive_order_event))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
