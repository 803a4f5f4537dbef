//! Edit buffers kept apart from the confirmed (last fetched) values.
//!
//! DESIGN
//! ======
//! A draft is never the fetched record itself. Menu edits go through
//! [`MenuItemDraft`], whose fields are raw form text and only become a
//! [`MenuItemInput`] after validation. Settings edits go through
//! [`Draft`], which pairs the confirmed value with a working copy so that
//! discarding restores what was fetched rather than blanking the form.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use crate::net::types::{MenuItem, MenuItemInput};

/// Client-side form validation failures. No request is made when these occur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("price must be a non-negative number, got {0:?}")]
    InvalidPrice(String),
}

// =============================================================================
// MENU ITEM DRAFT
// =============================================================================

/// Form buffer for creating or editing a menu item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    /// Price as typed; parsed on submit.
    pub price: String,
    pub category: String,
    pub available: bool,
    /// Empty means no image.
    pub image_url: String,
}

impl Default for MenuItemDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            available: true,
            image_url: String::new(),
        }
    }
}

impl From<&MenuItem> for MenuItemDraft {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category: item.category.clone(),
            available: item.available,
            image_url: item.image_url.clone().unwrap_or_default(),
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Parse form price text into a finite, non-negative amount.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for blank text and
/// [`ValidationError::InvalidPrice`] for anything else unusable.
pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let text = required(raw, "price")?;
    match text.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice(text)),
    }
}

impl MenuItemDraft {
    /// Check required fields and convert to a request body.
    ///
    /// # Errors
    ///
    /// Returns the first failing field in form order: name, description,
    /// price, category.
    pub fn validate(&self) -> Result<MenuItemInput, ValidationError> {
        let name = required(&self.name, "name")?;
        let description = required(&self.description, "description")?;
        let price = parse_price(&self.price)?;
        let category = required(&self.category, "category")?;
        let image_url = Some(self.image_url.trim()).filter(|url| !url.is_empty()).map(str::to_owned);
        Ok(MenuItemInput { name, description, price, category, available: self.available, image_url })
    }
}

// =============================================================================
// GENERIC DRAFT
// =============================================================================

/// A confirmed value plus a working copy of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft<T> {
    confirmed: T,
    working: T,
}

impl<T: Clone + PartialEq> Draft<T> {
    #[must_use]
    pub fn new(confirmed: T) -> Self {
        Self { working: confirmed.clone(), confirmed }
    }

    /// The last value accepted from the server.
    #[must_use]
    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    #[must_use]
    pub fn working(&self) -> &T {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut T {
        &mut self.working
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working != self.confirmed
    }

    /// Throw away edits; the working copy becomes the confirmed value again.
    pub fn discard(&mut self) {
        self.working = self.confirmed.clone();
    }

    /// Replace the confirmed value and reset the working copy to it.
    pub fn confirm(&mut self, value: T) {
        self.working = value.clone();
        self.confirmed = value;
    }
}
