//! Route gating for the admin area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every entry point asks the guard before rendering. The admin area needs a
//! session; the login page is skipped once one exists.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::session::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    AdminLogin,
    Admin,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::AdminLogin => "/admin/login",
            Self::Admin => "/admin",
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Home),
            "/admin/login" => Some(Self::AdminLogin),
            "/admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect(Route),
}

/// Decide what to show for `route` given whether a session exists.
#[must_use]
pub fn decide(route: Route, authenticated: bool) -> RouteDecision {
    match (route, authenticated) {
        (Route::Admin, false) => RouteDecision::Redirect(Route::AdminLogin),
        (Route::AdminLogin, true) => RouteDecision::Redirect(Route::Admin),
        (route, _) => RouteDecision::Render(route),
    }
}

/// [`decide`] against the live session.
#[must_use]
pub fn guard(route: Route, session: &SessionStore) -> RouteDecision {
    decide(route, session.is_authenticated())
}
