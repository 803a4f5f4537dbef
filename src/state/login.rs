//! Admin login form.
//!
//! Every backend failure collapses to one generic acknowledgment: the user is
//! never told whether the password was wrong or the server unreachable.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::api::ContentApi;
use crate::net::types::LoginRequest;
use crate::state::session::SessionStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    fn to_request(&self) -> Result<LoginRequest, LoginError> {
        if self.username.is_empty() {
            return Err(LoginError::MissingField("username"));
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingField("password"));
        }
        Ok(LoginRequest { username: self.username.clone(), password: self.password.clone() })
    }
}

/// Submit credentials and, on success, sign the session in.
///
/// # Errors
///
/// Returns [`LoginError::MissingField`] without a request for an incomplete
/// form, and [`LoginError::InvalidCredentials`] for any backend failure.
pub async fn login(api: &dyn ContentApi, session: &SessionStore, form: &LoginForm) -> Result<(), LoginError> {
    let request = form.to_request()?;
    match api.login(&request).await {
        Ok(token) => {
            session.login(token.access_token);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, username = %request.username, "login rejected");
            Err(LoginError::InvalidCredentials)
        }
    }
}
