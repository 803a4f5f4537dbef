//! Public, read-only content view: menu, categories, and site copy.
//!
//! DESIGN
//! ======
//! The view holds whatever the last fetch returned and filters it locally.
//! Changing the selected category never refetches. Fetch failures are
//! logged and otherwise swallowed; nothing here is retried.

#[cfg(test)]
#[path = "public_test.rs"]
mod public_test;

use std::fmt;

use crate::net::api::{ApiError, ContentApi};
use crate::net::types::{CategorySummary, MenuItem, SiteSettings};

pub const EMPTY_TITLE: &str = "No items in this category";
pub const EMPTY_HINT: &str = "Please check other categories or contact us for custom options.";
pub const LOADING_TITLE: &str = "Loading Menu...";

/// Selected category tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a tab value; the literal `"all"` selects every item.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "all" { Self::All } else { Self::Named(raw.to_owned()) }
    }

    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Named(category) => item.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(category) => f.write_str(category),
        }
    }
}

/// Items from `items` selected by `filter`, in fetch order.
#[must_use]
pub fn filter_items<'a>(items: &'a [MenuItem], filter: &CategoryFilter) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// A category tab: its filter value and display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub filter: CategoryFilter,
    pub label: String,
}

/// State behind the public menu and site sections.
#[derive(Clone, Debug)]
pub struct PublicView {
    items: Vec<MenuItem>,
    categories: Vec<CategorySummary>,
    settings: SiteSettings,
    selected: CategoryFilter,
    loading: bool,
}

impl Default for PublicView {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            categories: Vec::new(),
            settings: SiteSettings::default(),
            selected: CategoryFilter::All,
            loading: true,
        }
    }
}

impl PublicView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch menu, categories, and site copy concurrently.
    ///
    /// Each result is applied as soon as its own request resolves, so a slow
    /// categories or settings call never holds back the menu. `loading`
    /// clears once the menu fetch resolves, whether or not it succeeded.
    /// Failures keep the previous (or default) data.
    pub async fn load(&mut self, api: &dyn ContentApi) {
        let menu = api.fetch_menu();
        let categories = api.fetch_categories();
        let settings = api.fetch_site_settings();
        tokio::pin!(menu, categories, settings);

        let (mut menu_done, mut categories_done, mut settings_done) = (false, false, false);
        while !(menu_done && categories_done && settings_done) {
            tokio::select! {
                result = &mut menu, if !menu_done => {
                    menu_done = true;
                    self.apply_menu(result);
                }
                result = &mut categories, if !categories_done => {
                    categories_done = true;
                    match result {
                        Ok(summaries) => self.categories = summaries,
                        Err(e) => tracing::error!(error = %e, "error fetching categories"),
                    }
                }
                result = &mut settings, if !settings_done => {
                    settings_done = true;
                    match result {
                        Ok(copy) => self.settings = copy,
                        Err(e) => tracing::error!(error = %e, "error fetching site settings"),
                    }
                }
            }
        }
    }

    fn apply_menu(&mut self, result: Result<Vec<MenuItem>, ApiError>) {
        match result {
            Ok(items) => self.items = items,
            Err(e) => tracing::error!(error = %e, "error fetching menu"),
        }
        self.loading = false;
    }

    pub fn select(&mut self, filter: CategoryFilter) {
        self.selected = filter;
    }

    #[must_use]
    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub fn categories(&self) -> &[CategorySummary] {
        &self.categories
    }

    #[must_use]
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        filter_items(&self.items, &self.selected)
    }

    /// True whenever the current filter selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.items.iter().any(|item| self.selected.matches(item))
    }

    /// Empty-state title and hint, shown whenever [`Self::is_empty`] holds.
    #[must_use]
    pub fn empty_message(&self) -> Option<(&'static str, &'static str)> {
        (!self.loading && self.is_empty()).then_some((EMPTY_TITLE, EMPTY_HINT))
    }

    /// "All" followed by one tab per category summary.
    #[must_use]
    pub fn tabs(&self) -> Vec<Tab> {
        std::iter::once(Tab { filter: CategoryFilter::All, label: "All".to_owned() })
            .chain(self.categories.iter().map(|c| Tab {
                filter: CategoryFilter::Named(c.name.clone()),
                label: format!("{} ({})", c.name, c.count),
            }))
            .collect()
    }
}
