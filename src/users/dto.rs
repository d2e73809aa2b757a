use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for signup, login, create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserDto {
    /// Rejects empty credentials and emails without a `local@domain.tld` shape.
    ///
    /// The email is kept exactly as sent.
    pub fn validated(self, empty_msg: &str) -> AppResult<Self> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::BadRequest(empty_msg.to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::BadRequest("Invalid email".into()));
        }
        Ok(self)
    }
}

/// `{ "data": ..., "message": ... }` envelope used by every success response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub message: &'static str,
}

impl<T> DataResponse<T> {
    pub fn new(data: T, message: &'static str) -> Self {
        Self { data, message }
    }
}
