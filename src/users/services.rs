use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, warn};

use crate::{
    crypto::{generate_random_salt, password_hash},
    error::{AppError, AppResult},
    state::AppState,
    users::{
        dto::UserDto,
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

const EMPTY_FIELDS: &str = "Empty fields";
const USER_NOT_FOUND: &str = "User does not exist";

/// Salts and hashes the password of a validated DTO into a storable record.
pub(crate) fn hashed_record(dto: UserDto) -> AppResult<NewUser> {
    let salt = generate_random_salt();
    let password = password_hash(&dto.password, &salt).map_err(AppError::internal)?;
    Ok(NewUser {
        email: dto.email,
        name: dto.name,
        password,
        password_hash: salt,
    })
}

/// Registers a new credential: uniqueness check, salt, hash, insert.
///
/// The caller validates `dto` first. The email check and the insert are two
/// calls, so a concurrent duplicate is reported by the store's unique
/// constraint and surfaces as the same conflict.
pub(crate) async fn register_credential(store: &dyn UserStore, dto: UserDto) -> AppResult<User> {
    if store.find_by_email(&dto.email).await?.is_some() {
        warn!(email = %dto.email, "email already registered");
        return Err(AppError::Conflict("the email already exists".into()));
    }
    let record = hashed_record(dto)?;
    let user = store.create(record).await?;
    info!(user_id = user.id, email = %user.email, "user created");
    Ok(user)
}

fn check_id(id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::BadRequest(EMPTY_FIELDS.into()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.store.clone())
    }
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn find_all_user(&self) -> AppResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_user_by_id(&self, id: i64) -> AppResult<User> {
        check_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))
    }

    pub async fn create_user(&self, dto: UserDto) -> AppResult<User> {
        let dto = dto.validated(EMPTY_FIELDS)?;
        register_credential(self.store.as_ref(), dto).await
    }

    /// Replaces the user's fields; a missing `name` keeps the stored one.
    /// The password is always re-salted and re-hashed.
    pub async fn update_user(&self, id: i64, dto: UserDto) -> AppResult<User> {
        check_id(id)?;
        let dto = dto.validated(EMPTY_FIELDS)?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.into()));
        }
        let record = hashed_record(dto)?;
        let user = self
            .store
            .update(id, record)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
        info!(user_id = user.id, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<User> {
        check_id(id)?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(USER_NOT_FOUND.into()));
        }
        let user = self
            .store
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
        info!(user_id = user.id, "user deleted");
        Ok(user)
    }
}
