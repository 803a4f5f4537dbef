//! Menu CRUD editor.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use super::{AdminAction, AdminError, Confirm};
use crate::net::api::ContentApi;
use crate::net::types::MenuItem;
use crate::state::draft::MenuItemDraft;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

/// Where the menu editor is in its workflow.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MenuPhase {
    #[default]
    Idle,
    /// Form is open. `target` is the id being edited, `None` when adding.
    Editing { target: Option<String>, draft: MenuItemDraft },
    /// A create/update is in flight.
    Submitting { target: Option<String>, draft: MenuItemDraft },
    /// Waiting for the user to confirm deleting `id`.
    Confirming { id: String },
}

/// Result of a successful submit.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Created(MenuItem),
    Updated(MenuItem),
}

/// Admin menu list plus the add/edit/delete workflow.
#[derive(Clone, Debug, Default)]
pub struct MenuEditor {
    items: Vec<MenuItem>,
    phase: MenuPhase,
}

impl MenuEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Items as of the last successful fetch.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn phase(&self) -> &MenuPhase {
        &self.phase
    }

    #[must_use]
    pub fn draft(&self) -> Option<&MenuItemDraft> {
        match &self.phase {
            MenuPhase::Editing { draft, .. } | MenuPhase::Submitting { draft, .. } => Some(draft),
            MenuPhase::Idle | MenuPhase::Confirming { .. } => None,
        }
    }

    /// Mutable form buffer; only available while editing.
    pub fn draft_mut(&mut self) -> Option<&mut MenuItemDraft> {
        match &mut self.phase {
            MenuPhase::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Id of the item being edited, `None` when adding or idle.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        match &self.phase {
            MenuPhase::Editing { target, .. } | MenuPhase::Submitting { target, .. } => target.as_deref(),
            _ => None,
        }
    }

    /// Replace the list with a fresh authorized fetch.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the previous list is kept.
    pub async fn refresh(&mut self, api: &dyn ContentApi) -> Result<(), AdminError> {
        match api.list_admin_menu().await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching admin menu");
                Err(AdminError::api(AdminAction::LoadMenu, e))
            }
        }
    }

    /// Open a blank form for a new item.
    pub fn start_create(&mut self) {
        self.phase = MenuPhase::Editing { target: None, draft: MenuItemDraft::default() };
    }

    /// Open the form seeded from a listed item.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::UnknownItem`] if `id` is not in the current list.
    pub fn start_edit(&mut self, id: &str) -> Result<(), AdminError> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AdminError::UnknownItem(id.to_owned()))?;
        self.phase = MenuPhase::Editing { target: Some(item.id.clone()), draft: MenuItemDraft::from(item) };
        Ok(())
    }

    /// Close the form and drop the buffer.
    pub fn cancel(&mut self) {
        if matches!(self.phase, MenuPhase::Editing { .. }) {
            self.phase = MenuPhase::Idle;
        }
    }

    /// Validate and send the form: create when adding, full update when editing.
    ///
    /// On success the form closes and the list is refetched. On failure the
    /// form stays open with the buffer untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error (no request made), an API error, or
    /// [`AdminError::NotEditing`] when no form is open.
    pub async fn submit(&mut self, api: &dyn ContentApi) -> Result<SubmitOutcome, AdminError> {
        let MenuPhase::Editing { draft, .. } = &self.phase else {
            return Err(AdminError::NotEditing);
        };
        let input = draft.validate()?;

        let MenuPhase::Editing { target, draft } = std::mem::take(&mut self.phase) else {
            return Err(AdminError::NotEditing);
        };
        self.phase = MenuPhase::Submitting { target: target.clone(), draft };

        let result = match target.as_deref() {
            None => api.create_menu_item(&input).await.map(SubmitOutcome::Created),
            Some(id) => api.update_menu_item(id, &input).await.map(SubmitOutcome::Updated),
        };

        match result {
            Ok(outcome) => {
                self.phase = MenuPhase::Idle;
                self.refresh_after_write(api).await;
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "error saving menu item");
                if let MenuPhase::Submitting { target, draft } = std::mem::take(&mut self.phase) {
                    self.phase = MenuPhase::Editing { target, draft };
                }
                Err(AdminError::api(AdminAction::SaveMenuItem, e))
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::FormOpen`] while a form is open (its buffer is
    /// left alone), or [`AdminError::UnknownItem`] if `id` is not in the
    /// current list.
    pub fn request_delete(&mut self, id: &str) -> Result<(), AdminError> {
        if matches!(self.phase, MenuPhase::Editing { .. } | MenuPhase::Submitting { .. }) {
            return Err(AdminError::FormOpen);
        }
        if !self.items.iter().any(|item| item.id == id) {
            return Err(AdminError::UnknownItem(id.to_owned()));
        }
        self.phase = MenuPhase::Confirming { id: id.to_owned() };
        Ok(())
    }

    /// User declined: no request is made.
    pub fn cancel_delete(&mut self) {
        if matches!(self.phase, MenuPhase::Confirming { .. }) {
            self.phase = MenuPhase::Idle;
        }
    }

    /// User confirmed: delete, then refetch on success.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotConfirming`] without a pending request, or
    /// the API failure.
    pub async fn confirm_delete(&mut self, api: &dyn ContentApi) -> Result<(), AdminError> {
        let MenuPhase::Confirming { id } = &self.phase else {
            return Err(AdminError::NotConfirming);
        };
        let id = id.clone();
        self.phase = MenuPhase::Idle;
        match api.delete_menu_item(&id).await {
            Ok(()) => {
                self.refresh_after_write(api).await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, %id, "error deleting menu item");
                Err(AdminError::api(AdminAction::DeleteMenuItem, e))
            }
        }
    }

    /// Prompt through `confirm`, then delete if accepted.
    ///
    /// Returns whether the item was deleted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::request_delete`] and [`Self::confirm_delete`].
    pub async fn delete_with(
        &mut self,
        api: &dyn ContentApi,
        id: &str,
        confirm: &dyn Confirm,
    ) -> Result<bool, AdminError> {
        self.request_delete(id)?;
        if !confirm.confirm(DELETE_PROMPT) {
            self.cancel_delete();
            return Ok(false);
        }
        self.confirm_delete(api).await?;
        Ok(true)
    }

    async fn refresh_after_write(&mut self, api: &dyn ContentApi) {
        // Failure is logged by `refresh`; the list stays stale until the next one.
        let _ = self.refresh(api).await;
    }
}
