pub mod rest;

use axum::{
    Router,
    routing::{MethodRouter, get},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::service::NoteService;

/// Builds the route table once at start-up. Each resource path is also
/// served with a trailing slash.
pub fn router(service: Arc<NoteService>) -> Router {
    let collection: MethodRouter<Arc<NoteService>> =
        get(rest::get_all_notes).post(rest::create_note);
    let member: MethodRouter<Arc<NoteService>> = get(rest::get_one_note)
        .put(rest::update_note)
        .delete(rest::delete_note);

    Router::new()
        .route("/", get(rest::api_root))
        .route("/notes", collection.clone())
        .route("/notes/", collection)
        .route("/notes/{id}", member.clone())
        .route("/notes/{id}/", member)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
