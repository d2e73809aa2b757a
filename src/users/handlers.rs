use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppResult,
    state::AppState,
    users::{
        dto::{DataResponse, UserDto},
        repo_types::User,
        services::UserService,
    },
};

pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(svc))]
pub async fn get_users(State(svc): State<UserService>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = svc.find_all_user().await?;
    Ok(Json(DataResponse::new(users, "findAll")))
}

#[instrument(skip(svc))]
pub async fn get_user_by_id(
    State(svc): State<UserService>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = svc.find_user_by_id(id).await?;
    Ok(Json(DataResponse::new(user, "findOne")))
}

#[instrument(skip(svc, payload))]
pub async fn create_user(
    State(svc): State<UserService>,
    Json(payload): Json<UserDto>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let user = svc.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(user, "created"))))
}

#[instrument(skip(svc, payload))]
pub async fn update_user(
    State(svc): State<UserService>,
    Path(id): Path<i64>,
    Json(payload): Json<UserDto>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = svc.update_user(id, payload).await?;
    Ok(Json(DataResponse::new(user, "updated")))
}

#[instrument(skip(svc))]
pub async fn delete_user(
    State(svc): State<UserService>,
    Path(id): Path<i64>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = svc.delete_user(id).await?;
    Ok(Json(DataResponse::new(user, "deleted")))
}
