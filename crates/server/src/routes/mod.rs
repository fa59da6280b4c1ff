pub mod conditions;
pub mod health;
pub mod languages;
pub mod medical_history;
pub mod metrics;
pub mod personal_info;
pub mod search;

use axum::{
    Json, Router,
    extract::FromRequest,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::db::SharedStore;
use crate::error::AppError;

/// JSON body extractor whose rejections use the `{error}` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Build the JSON API routes
pub fn api_routes() -> Router<SharedStore> {
    Router::new()
        .route(
            "/search",
            post(search::search)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/personal-info",
            post(personal_info::create)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/personal-info/{user_id}",
            get(personal_info::fetch)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/medical-history/{user_id}",
            get(medical_history::fetch)
                .put(medical_history::save)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/conditions", get(conditions::list))
        .route("/languages", get(languages::list))
}

#[derive(Serialize)]
pub struct IndexResponse {
    message: &'static str,
}

/// GET / - Service banner
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Medical History Search API",
    })
}

/// Plain OPTIONS requests; real CORS preflights are answered by the CORS layer
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
