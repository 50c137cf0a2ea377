use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handler::{
        create_note_handler, delete_note_handler, delete_user_handler, homepage, login_handler,
        logout_handler, register_handler, show_note_handler, show_user_handler,
        update_note_handler,
    },
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/users/:username", get(show_user_handler))
        .route("/users/:username/delete", post(delete_user_handler))
        .route("/users/:username/notes", post(create_note_handler))
        .route("/notes/:id", get(show_note_handler))
        .route("/notes/:id/update", post(update_note_handler))
        .route("/notes/:id/delete", post(delete_note_handler))
        .with_state(app_state)
}
