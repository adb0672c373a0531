pub mod images;
pub mod recognition;
pub mod root;
pub mod scalar_config;
pub mod tasks;

use crate::state::ApiState;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use common_annotations::settings;
use tower_http::cors::{Any, CorsLayer};
use tower_http::{LatencyUnit, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    paths(
        root::route::root,
        // Task handlers
        tasks::handlers::get_tasks,
        tasks::handlers::save_tasks,
        // Recognition handlers
        recognition::handlers::recognize_single,
        recognition::handlers::recognize_batch,
        // Image handlers
        images::handlers::get_local_file,
    ),
    components(
        schemas(
            // Task schemas
            common_annotations::Task,
            common_annotations::TaskData,
            common_annotations::RegionAnnotation,
            common_annotations::RegionValue,
            tasks::interfaces::SaveResponse,
            // Recognition schemas
            recognition::interfaces::RecognizeRequest,
            recognition::interfaces::RecognizeResponse,
            recognition::interfaces::BatchImage,
            recognition::interfaces::BatchRecognizeRequest,
            recognition::interfaces::BatchResult,
            recognition::interfaces::BatchRecognizeResponse,
            // Image schemas
            images::interfaces::LocalFileQuery,
        ),
    ),
    tags(
        (name = "Tasks", description = "Dataset conversion between the stored detection format and interactive tasks"),
        (name = "Recognition", description = "Text recognition over user-drawn regions"),
    )
)]
struct ApiDoc;

// --- Router Construction ---
pub fn create_router(state: ApiState) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(Scalar::with_url("/docs", openapi.clone()).custom_html(
            scalar_config::get_custom_html(&openapi),
        ))
        .merge(api_routes())
        .with_state(state)
        .layer(cors_layer())
        // Batch payloads carry inline images, so the default 2 MB JSON body
        // cap is far too small.
        .layer(DefaultBodyLimit::max(settings().api.max_body_bytes))
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Micros),
            ),
        )
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(root::route::root))
        .route("/api/tasks", get(tasks::handlers::get_tasks))
        .route("/api/save", post(tasks::handlers::save_tasks))
        .route("/api/ocr", post(recognition::handlers::recognize_single))
        .route("/api/ocr-batch", post(recognition::handlers::recognize_batch))
        // Task image paths carry a trailing slash before the query string, so
        // both spellings must resolve.
        .route("/data/local-files", get(images::handlers::get_local_file))
        .route("/data/local-files/", get(images::handlers::get_local_file))
}

fn cors_layer() -> CorsLayer {
    let allowed = &settings().api.allowed_origins;
    if allowed.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
