//! Wire types shared by the REST client, the views, and the editors.
//!
//! DESIGN
//! ======
//! These mirror the backend's JSON exactly. Server-only bookkeeping fields
//! (`created_at`, `updated_at`, the settings record `id`) are ignored on read
//! and never sent back.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

// =============================================================================
// MENU
// =============================================================================

/// A menu item as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Server-assigned identifier.
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Body of a create or full-replace update: a menu item without its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItemInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItemInput {
    /// Attach a server id, producing the record the backend would store.
    #[cfg(test)]
    pub(crate) fn into_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            available: self.available,
            image_url: self.image_url,
        }
    }
}

impl From<&MenuItem> for MenuItemInput {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: item.category.clone(),
            available: item.available,
            image_url: item.image_url.clone(),
        }
    }
}

/// Per-category item count, aggregated server-side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: u32,
}

// =============================================================================
// SITE SETTINGS
// =============================================================================

/// The single editable site-content record.
///
/// Updates always send every field; the backend overwrites the whole record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub business_name: String,
    pub hero_title: String,
    pub hero_description: String,
    pub menu_title: String,
    pub menu_description: String,
    pub about_title: String,
    pub about_description: String,
    pub contact_phone1: String,
    pub contact_phone2: String,
    pub contact_email1: String,
    pub contact_email2: String,
    pub contact_address1: String,
    pub contact_address2: String,
    pub footer_text: String,
}

impl Default for SiteSettings {
    /// Stock copy the backend seeds when no settings record exists.
    fn default() -> Self {
        Self {
            business_name: "Gourmet Catering".to_owned(),
            hero_title: "Exquisite Catering Services".to_owned(),
            hero_description: "Creating unforgettable culinary experiences for your special events. \
                               From intimate gatherings to grand celebrations, we bring gourmet flavors \
                               to your table."
                .to_owned(),
            menu_title: "Our Menu".to_owned(),
            menu_description: "Crafted with the finest ingredients and culinary expertise".to_owned(),
            about_title: "About Gourmet Catering".to_owned(),
            about_description: "With over 15 years of culinary excellence, we specialize in creating \
                                memorable dining experiences that perfectly complement your special \
                                occasions."
                .to_owned(),
            contact_phone1: "(555) 123-4567".to_owned(),
            contact_phone2: "(555) 987-6543".to_owned(),
            contact_email1: "info@gourmetcatering.com".to_owned(),
            contact_email2: "orders@gourmetcatering.com".to_owned(),
            contact_address1: "123 Culinary Street".to_owned(),
            contact_address2: "Foodie City, FC 12345".to_owned(),
            footer_text: "© 2024 Gourmet Catering. All rights reserved.".to_owned(),
        }
    }
}

/// Field names accepted by [`SiteSettings::set_field`], in display order.
pub const SITE_SETTINGS_FIELDS: [&str; 14] = [
    "business_name",
    "hero_title",
    "hero_description",
    "menu_title",
    "menu_description",
    "about_title",
    "about_description",
    "contact_phone1",
    "contact_phone2",
    "contact_email1",
    "contact_email2",
    "contact_address1",
    "contact_address2",
    "footer_text",
];

impl SiteSettings {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let field = match name {
            "business_name" => &mut self.business_name,
            "hero_title" => &mut self.hero_title,
            "hero_description" => &mut self.hero_description,
            "menu_title" => &mut self.menu_title,
            "menu_description" => &mut self.menu_description,
            "about_title" => &mut self.about_title,
            "about_description" => &mut self.about_description,
            "contact_phone1" => &mut self.contact_phone1,
            "contact_phone2" => &mut self.contact_phone2,
            "contact_email1" => &mut self.contact_email1,
            "contact_email2" => &mut self.contact_email2,
            "contact_address1" => &mut self.contact_address1,
            "contact_address2" => &mut self.contact_address2,
            "footer_text" => &mut self.footer_text,
            _ => return None,
        };
        Some(field)
    }

    /// Overwrite one text field by its wire name.
    ///
    /// Returns `false` if `name` is not a settings field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                *field = value.into();
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

/// Body of `GET /api/`.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiBanner {
    pub message: String,
}
