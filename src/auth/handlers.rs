use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{extractors::AuthUser, jwt::clear_cookie, services::AuthService},
    error::AppResult,
    state::AppState,
    users::{
        dto::{DataResponse, UserDto},
        repo_types::User,
    },
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[instrument(skip(auth, payload))]
pub async fn signup(
    State(auth): State<AuthService>,
    Json(payload): Json<UserDto>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let user = auth.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user, "signup"))))
}

#[instrument(skip(auth, payload))]
pub async fn login(
    State(auth): State<AuthService>,
    Json(payload): Json<UserDto>,
) -> AppResult<([(header::HeaderName, String); 1], Json<DataResponse<User>>)> {
    let out = auth.login(payload).await?;
    Ok((
        [(header::SET_COOKIE, out.cookie)],
        Json(DataResponse::new(out.user, "login")),
    ))
}

#[instrument(skip_all)]
pub async fn logout(
    State(auth): State<AuthService>,
    AuthUser(user): AuthUser,
) -> AppResult<([(header::HeaderName, String); 1], Json<DataResponse<User>>)> {
    let user = auth.logout(&user).await?;
    Ok((
        [(header::SET_COOKIE, clear_cookie())],
        Json(DataResponse::new(user, "logout")),
    ))
}
