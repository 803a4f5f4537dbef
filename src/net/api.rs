//! REST client for the catering backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views and editors talk to the backend only through [`ContentApi`], so the
//! state machines can be exercised against an in-memory double. [`ApiClient`]
//! is the real implementation over `reqwest`.
//!
//! ERROR HANDLING
//! ==============
//! Every `/admin/*` call checks for a token before touching the network and
//! returns [`ApiError::NotAuthenticated`] without a request when there is
//! none. A 401 from an authorized call signs the session out: the token is
//! only ever judged invalid by the server's answer.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    ApiBanner, CategorySummary, LoginRequest, MenuItem, MenuItemInput, SiteSettings, TokenResponse,
};
use crate::state::session::SessionStore;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An authorized call was attempted with no session token.
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend rejected the credentials or token (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether this failure means the session is missing or no longer valid.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized)
    }
}

// =============================================================================
// CONTENT API
// =============================================================================

/// Backend operations used by the content views and editors.
#[async_trait::async_trait]
pub trait ContentApi: Send + Sync {
    /// `GET /menu`: public menu list.
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, ApiError>;

    /// `GET /menu/categories`: per-category counts.
    async fn fetch_categories(&self) -> Result<Vec<CategorySummary>, ApiError>;

    /// `GET /site-settings`: public site copy.
    async fn fetch_site_settings(&self) -> Result<SiteSettings, ApiError>;

    /// `POST /auth/login`: exchange credentials for a bearer token.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// `GET /admin/menu`: every item, including unavailable ones.
    async fn list_admin_menu(&self) -> Result<Vec<MenuItem>, ApiError>;

    /// `POST /admin/menu`.
    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem, ApiError>;

    /// `PUT /admin/menu/{id}`: full replace.
    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem, ApiError>;

    /// `DELETE /admin/menu/{id}`.
    async fn delete_menu_item(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /admin/site-settings`.
    async fn fetch_admin_settings(&self) -> Result<SiteSettings, ApiError>;

    /// `PUT /admin/site-settings`: full replace.
    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    Bearer,
}

pub(crate) fn api_url(base_url: &str, path: &str) -> String {
    format!("{}/api{}", base_url.trim_end_matches('/'), path)
}

/// The id is percent-encoded so it always stays one path segment.
pub(crate) fn menu_item_path(id: &str) -> String {
    format!("/admin/menu/{}", urlencoding::encode(id))
}

pub(crate) fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// `reqwest`-backed implementation of [`ContentApi`].
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client for `base_url` (the site origin; `/api` is appended).
    ///
    /// `timeout` of `None` keeps the HTTP client's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url, session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// `GET /`: backend banner, used as a reachability check.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers non-success.
    pub async fn ping(&self) -> Result<String, ApiError> {
        let banner: ApiBanner = self.send(Method::GET, "/", Access::Public, None::<&()>).await?;
        Ok(banner.message)
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        access: Access,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.send_raw(method, path, access, body).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_raw<B>(
        &self,
        method: Method,
        path: &str,
        access: Access,
        body: Option<&B>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = api_url(&self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if access == Access::Bearer {
            let token = self.session.current_token().ok_or(ApiError::NotAuthenticated)?;
            request = request.header(reqwest::header::AUTHORIZATION, bearer_value(&token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "backend request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            if access == Access::Bearer {
                tracing::warn!(%method, %url, "token rejected; signing out");
                self.session.logout();
            }
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ContentApi for ApiClient {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.send(Method::GET, "/menu", Access::Public, None::<&()>).await
    }

    async fn fetch_categories(&self) -> Result<Vec<CategorySummary>, ApiError> {
        self.send(Method::GET, "/menu/categories", Access::Public, None::<&()>).await
    }

    async fn fetch_site_settings(&self) -> Result<SiteSettings, ApiError> {
        self.send(Method::GET, "/site-settings", Access::Public, None::<&()>).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.send(Method::POST, "/auth/login", Access::Public, Some(request)).await
    }

    async fn list_admin_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.send(Method::GET, "/admin/menu", Access::Bearer, None::<&()>).await
    }

    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem, ApiError> {
        self.send(Method::POST, "/admin/menu", Access::Bearer, Some(input)).await
    }

    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem, ApiError> {
        self.send(Method::PUT, &menu_item_path(id), Access::Bearer, Some(input)).await
    }

    async fn delete_menu_item(&self, id: &str) -> Result<(), ApiError> {
        self.send_raw(Method::DELETE, &menu_item_path(id), Access::Bearer, None::<&()>)
            .await
            .map(|_| ())
    }

    async fn fetch_admin_settings(&self) -> Result<SiteSettings, ApiError> {
        self.send(Method::GET, "/admin/site-settings", Access::Bearer, None::<&()>).await
    }

    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError> {
        self.send(Method::PUT, "/admin/site-settings", Access::Bearer, Some(settings)).await
    }
}
