//! Session and authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use quickmart_core::User;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The signed-in user, or `null`.
#[instrument(skip(state))]
pub async fn session(State(state): State<AppState>) -> Json<Option<User>> {
    Json(state.session().current().await)
}

#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(form): Json<SignInForm>,
) -> Result<Json<User>> {
    let password = SecretString::from(form.password);
    let user = state.auth().sign_in(&form.email, &password).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(Json(user))
}

#[instrument(skip_all)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> Result<(StatusCode, Json<User>)> {
    let password = SecretString::from(form.password);
    let user = state
        .auth()
        .sign_up(&form.name, &form.email, &password)
        .await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn sign_out(State(state): State<AppState>) -> Result<StatusCode> {
    state.auth().sign_out().await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
