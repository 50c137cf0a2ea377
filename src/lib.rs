use std::sync::Arc;

use crate::store::{NoteStore, UserStore};

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod password;
pub mod request;
pub mod response;
pub mod route;
pub mod session;
pub mod store;

/// Shared application context, built once in `main` and passed down to every
/// handler through the router state.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub notes: Arc<dyn NoteStore>,
    /// HS256 secret for session tokens.
    pub secret: String,
}
