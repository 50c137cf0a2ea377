use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;
use tracing::info;

use crate::{
    error::ApiError,
    model::{Note, User},
    password,
    request::{LoginForm, NoteInput, RegisterForm},
    response::{FilteredUser, UserPage},
    session::{self, Session},
    AppState,
};

fn user_page(username: &str) -> String {
    format!("/users/{username}")
}

pub async fn homepage() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "notekeeper: keep your notes to yourself",
    }))
}

/// Registers a new user and logs them in.
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    form.validate()?;

    let user = User {
        username: form.username,
        password: password::hash(&form.password)?,
        email: form.email,
        first_name: form.first_name,
        last_name: form.last_name,
    };
    state.users.insert(&user).await?;

    info!(username = %user.username, "registered new user");
    let cookie = session::issue(&user.username, &state.secret)?;
    Ok((jar.add(cookie), Redirect::to(&user_page(&user.username))))
}

/// Authenticates a user. The failure message never reveals whether the
/// username or the password was wrong.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    form.validate()?;

    let user = match state.users.find(&form.username).await? {
        Some(user) => user,
        None => {
            // Burn a verification so the miss costs as much as a mismatch.
            password::verify(&form.password, password::dummy_hash());
            return Err(ApiError::AuthFailure);
        }
    };

    if !password::verify(&form.password, &user.password) {
        return Err(ApiError::AuthFailure);
    }

    let cookie = session::issue(&user.username, &state.secret)?;
    Ok((jar.add(cookie), Redirect::to(&user_page(&user.username))))
}

/// Clears the session. Succeeds whether or not anyone was logged in.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(session::clear()), Redirect::to("/"))
}

/// A user's own page: their profile plus all of their notes.
pub async fn show_user_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
) -> Result<Json<UserPage>, ApiError> {
    session.authorize(&username)?;

    let user = state
        .users
        .find(&username)
        .await?
        .ok_or(ApiError::NotFound)?;
    let notes = state.notes.list_for(&username).await?;

    Ok(Json(UserPage {
        user: FilteredUser::from(&user),
        notes,
    }))
}

/// Deletes a user and all of their notes, then ends the session.
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    jar: CookieJar,
    Path(username): Path<String>,
) -> Result<(CookieJar, Redirect), ApiError> {
    session.authorize(&username)?;

    if !state.users.delete(&username).await? {
        return Err(ApiError::NotFound);
    }

    info!(username = %username, "deleted user and their notes");
    Ok((jar.add(session::clear()), Redirect::to("/")))
}

pub async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(username): Path<String>,
    Form(form): Form<NoteInput>,
) -> Result<Redirect, ApiError> {
    session.authorize(&username)?;
    form.validate()?;

    state
        .notes
        .insert(&username, &form.title, &form.content)
        .await?;

    Ok(Redirect::to(&user_page(&username)))
}

pub async fn show_note_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.find(id).await?.ok_or(ApiError::NotFound)?;
    session.authorize(&note.owner_username)?;
    Ok(Json(note))
}

pub async fn update_note_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<NoteInput>,
) -> Result<Redirect, ApiError> {
    let note = state.notes.find(id).await?.ok_or(ApiError::NotFound)?;
    session.authorize(&note.owner_username)?;
    form.validate()?;

    state.notes.update(id, &form.title, &form.content).await?;

    Ok(Redirect::to(&user_page(&note.owner_username)))
}

pub async fn delete_note_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let note = state.notes.find(id).await?.ok_or(ApiError::NotFound)?;
    session.authorize(&note.owner_username)?;

    state.notes.delete(id).await?;

    Ok(Redirect::to(&user_page(&note.owner_username)))
}
