//! Resource CRUD routes. Each path binds one method to one handler; the handler's
//! extractor decides whether the payload comes from the body or the query string.

use crate::handlers::{create, delete as delete_handler, get_resource, list, update};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/resources/create", post(create))
        .route("/resources/list", get(list))
        .route("/resources/get-resource", get(get_resource))
        .route("/resources/update", put(update))
        .route("/resources/delete", delete(delete_handler))
        .with_state(state)
}
