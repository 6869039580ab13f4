//! Resource CRUD routes, one set per descriptor in the resource model.
//! Collection paths are registered with and without the trailing slash.

use crate::config::RESOURCES;
use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Extension, Router};

pub fn entity_routes(state: AppState) -> Router {
    let mut router = Router::new();
    for resource in RESOURCES {
        let collection = format!("/{}", resource.path_segment);
        let item = format!("/{}/:id", resource.path_segment);
        router = router.merge(
            Router::new()
                .route(&collection, get(list).post(create))
                .route(&format!("{}/", collection), get(list).post(create))
                .route(&item, get(read).put(update).delete(delete_handler))
                .layer(Extension(resource)),
        );
    }
    router.with_state(state)
}
