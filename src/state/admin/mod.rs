//! Authenticated content management: menu CRUD and site settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each surface is a small state machine:
//! `Idle -> Editing -> Submitting -> Idle` on success (followed by a refetch),
//! or back to `Editing` with the buffer intact on failure. Deleting goes
//! `Idle -> Confirming -> Idle`. Displayed data only changes via refetch.

pub mod menu;
pub mod settings;

use crate::net::api::ApiError;
use crate::state::draft::ValidationError;

/// Which mutation failed, for the user-facing acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminAction {
    LoadMenu,
    SaveMenuItem,
    DeleteMenuItem,
    LoadSettings,
    SaveSettings,
}

impl AdminAction {
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::LoadMenu => "Error fetching menu items",
            Self::SaveMenuItem => "Error saving menu item",
            Self::DeleteMenuItem => "Error deleting menu item",
            Self::LoadSettings => "Error fetching site content",
            Self::SaveSettings => "Error updating content",
        }
    }
}

/// Errors surfaced by the admin editors.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}: {source}", .action.failure_message())]
    Api {
        action: AdminAction,
        #[source]
        source: ApiError,
    },

    #[error("no menu item with id {0}")]
    UnknownItem(String),

    #[error("nothing is being edited")]
    NotEditing,

    #[error("no delete is awaiting confirmation")]
    NotConfirming,

    #[error("finish or cancel the open form first")]
    FormOpen,

    #[error("site content has not been loaded")]
    NotLoaded,
}

impl AdminError {
    pub(crate) fn api(action: AdminAction, source: ApiError) -> Self {
        Self::Api { action, source }
    }

    /// Text for the blocking acknowledgment shown to the user.
    #[must_use]
    pub fn acknowledgment(&self) -> String {
        match self {
            Self::Api { action, .. } => action.failure_message().to_owned(),
            other => other.to_string(),
        }
    }

    /// Whether the failure came from a missing or rejected session.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Api { source, .. } if source.is_auth_failure())
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
