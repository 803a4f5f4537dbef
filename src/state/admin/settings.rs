//! Site settings editor: fetch, edit a full copy, submit as a full replace.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use super::{AdminAction, AdminError};
use crate::net::api::ContentApi;
use crate::net::types::SiteSettings;
use crate::state::draft::Draft;

pub const UPDATED_MESSAGE: &str = "Content updated successfully!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettingsPhase {
    #[default]
    Idle,
    Editing,
    Submitting,
}

/// Settings as last fetched, plus the edit buffer seeded from them.
#[derive(Clone, Debug, Default)]
pub struct SettingsEditor {
    draft: Option<Draft<SiteSettings>>,
    phase: SettingsPhase,
}

impl SettingsEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SettingsPhase {
        self.phase
    }

    /// Settings as of the last successful fetch.
    #[must_use]
    pub fn current(&self) -> Option<&SiteSettings> {
        self.draft.as_ref().map(Draft::confirmed)
    }

    /// The edit buffer, while editing or submitting.
    #[must_use]
    pub fn draft(&self) -> Option<&SiteSettings> {
        match self.phase {
            SettingsPhase::Idle => None,
            SettingsPhase::Editing | SettingsPhase::Submitting => self.draft.as_ref().map(Draft::working),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut SiteSettings> {
        match self.phase {
            SettingsPhase::Editing => self.draft.as_mut().map(Draft::working_mut),
            SettingsPhase::Idle | SettingsPhase::Submitting => None,
        }
    }

    /// Whether the open buffer differs from the last fetched settings.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.phase == SettingsPhase::Editing && self.draft.as_ref().is_some_and(Draft::is_dirty)
    }

    /// Fetch the settings record. An open edit buffer is left alone.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the previous value is kept.
    pub async fn refresh(&mut self, api: &dyn ContentApi) -> Result<(), AdminError> {
        let settings = api.fetch_admin_settings().await.map_err(|e| {
            tracing::error!(error = %e, "error fetching site settings");
            AdminError::api(AdminAction::LoadSettings, e)
        })?;
        match (&mut self.draft, self.phase) {
            (Some(draft), SettingsPhase::Editing) => {
                let working = draft.working().clone();
                draft.confirm(settings);
                *draft.working_mut() = working;
            }
            (slot, _) => *slot = Some(Draft::new(settings)),
        }
        Ok(())
    }

    /// Seed the buffer from the last fetched settings.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotLoaded`] before the first successful fetch.
    pub fn start_edit(&mut self) -> Result<(), AdminError> {
        let draft = self.draft.as_mut().ok_or(AdminError::NotLoaded)?;
        draft.discard();
        self.phase = SettingsPhase::Editing;
        Ok(())
    }

    /// Restore the buffer to the last fetched settings and stop editing.
    pub fn cancel(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            draft.discard();
        }
        self.phase = SettingsPhase::Idle;
    }

    /// Send the whole buffer as a full replace, then refetch.
    ///
    /// Returns the success acknowledgment. On failure the buffer is kept and
    /// editing continues.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotEditing`] when no edit is open, or the API
    /// failure.
    pub async fn submit(&mut self, api: &dyn ContentApi) -> Result<&'static str, AdminError> {
        if self.phase != SettingsPhase::Editing {
            return Err(AdminError::NotEditing);
        }
        let Some(body) = self.draft.as_ref().map(|d| d.working().clone()) else {
            return Err(AdminError::NotEditing);
        };

        self.phase = SettingsPhase::Submitting;
        match api.update_site_settings(&body).await {
            Ok(saved) => {
                self.phase = SettingsPhase::Idle;
                if let Some(draft) = self.draft.as_mut() {
                    draft.confirm(saved);
                }
                if self.refresh(api).await.is_err() {
                    tracing::warn!("settings saved but refetch failed; showing saved copy");
                }
                Ok(UPDATED_MESSAGE)
            }
            Err(e) => {
                tracing::error!(error = %e, "error updating site settings");
                self.phase = SettingsPhase::Editing;
                Err(AdminError::api(AdminAction::SaveSettings, e))
            }
        }
    }
}
