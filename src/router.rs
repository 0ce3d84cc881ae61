use crate::catalog::SectionCatalog;
use crate::db::{AnnotationsStorage, SqlitePool, UsersStorage};
use crate::handlers::{annotations, auth, browse};
use axum::{
    Router,
    extract::FromRef,
    routing::{get, patch, post},
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

#[derive(Clone)]
pub struct DeskState {
    pub users: UsersStorage,
    pub annotations: AnnotationsStorage,
    pub catalog: Arc<SectionCatalog>,
    key: Key,
}

impl DeskState {
    pub fn new(pool: SqlitePool, catalog: SectionCatalog, key: Key) -> Self {
        Self {
            users: UsersStorage::new(pool.clone()),
            annotations: AnnotationsStorage::new(pool),
            catalog: Arc::new(catalog),
            key,
        }
    }
}

impl FromRef<DeskState> for Key {
    fn from_ref(state: &DeskState) -> Self {
        state.key.clone()
    }
}

pub fn desk_router(state: DeskState) -> Router {
    Router::new()
        .route("/login", post(auth::login))
        .route("/session", get(auth::session))
        .route("/users", get(auth::list_users).post(auth::create_user))
        .route("/refresh", post(browse::refresh))
        .route("/sections", get(browse::list_sections))
        .route("/sections/{section}/files", get(browse::list_files))
        .route(
            "/sections/{section}/files/{file}/sheets",
            get(browse::list_sheets),
        )
        .route(
            "/sections/{section}/files/{file}/sheets/{sheet}",
            get(browse::view_sheet),
        )
        .route(
            "/sections/{section}/files/{file}/sheets/{sheet}/annotations",
            get(annotations::list_for_sheet).post(annotations::add),
        )
        .route(
            "/sections/{section}/annotations",
            get(annotations::list_for_section),
        )
        .route(
            "/annotations/{id}",
            patch(annotations::update_status).delete(annotations::delete),
        )
        .with_state(state)
}
