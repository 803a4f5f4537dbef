//! Client for the catering site's content backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks HTTP to the backend, `state` holds the session and the
//! public/admin workflows built on top of it, and `util::guard` decides which
//! entry points a session may reach. The `catering` binary is a thin `clap`
//! front end over these pieces.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use config::ClientConfig;
pub use net::api::{ApiClient, ApiError, ContentApi};
pub use net::types::{CategorySummary, MenuItem, MenuItemInput, SiteSettings};
pub use state::session::SessionStore;
