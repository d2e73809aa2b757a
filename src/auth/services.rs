use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{info, warn};

use crate::{
    auth::jwt::{create_cookie, JwtKeys},
    crypto::password_verify,
    error::{AppError, AppResult},
    state::AppState,
    users::{dto::UserDto, repo::UserStore, repo_types::User, services::register_credential},
};

/// Successful login: the `Set-Cookie` value and the authenticated user.
#[derive(Debug)]
pub struct LoginOutcome {
    pub cookie: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.store.clone(), JwtKeys::from_ref(state))
    }
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { store, keys }
    }

    pub async fn signup(&self, dto: UserDto) -> AppResult<User> {
        let dto = dto.validated("The email or password are empty")?;
        register_credential(self.store.as_ref(), dto).await
    }

    pub async fn login(&self, dto: UserDto) -> AppResult<LoginOutcome> {
        let dto = dto.validated("Empty fields")?;

        let Some(user) = self.store.find_by_email(&dto.email).await? else {
            warn!(email = %dto.email, "login unknown email");
            return Err(AppError::Unauthorized(
                "Couldn't find an account with this email address".into(),
            ));
        };

        let matches = password_verify(
            &dto.password,
            Some(&user.password_hash),
            Some(&user.password),
        )
        .map_err(AppError::internal)?;
        if !matches {
            warn!(user_id = user.id, "login invalid password");
            return Err(AppError::Unauthorized("Password doesn't match".into()));
        }

        let token = self.keys.create_token(user.id).map_err(AppError::internal)?;
        let cookie = create_cookie(&token);

        info!(user_id = user.id, "user logged in");
        Ok(LoginOutcome { cookie, user })
    }

    /// Confirms the user still exists with the same stored credential.
    ///
    /// The lookup compares the stored hash by equality, so `user` has to be the
    /// stored row (as loaded by the auth extractor), not caller-typed input.
    pub async fn logout(&self, user: &User) -> AppResult<User> {
        if user.email.is_empty() || user.password.is_empty() {
            return Err(AppError::BadRequest("Empty fields".into()));
        }

        let found = self
            .store
            .find_first_by_email_and_password(&user.email, &user.password)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User does not exist".into()))?;

        info!(user_id = found.id, "user logged out");
        Ok(found)
    }
}
