//! In-memory `ContentApi` double shared by the state tests.

use std::sync::Mutex;

use crate::net::api::{ApiError, ContentApi};
use crate::net::types::{
    CategorySummary, LoginRequest, MenuItem, MenuItemInput, SiteSettings, TokenResponse,
};

/// Recorded backend call, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FetchMenu,
    FetchCategories,
    FetchSiteSettings,
    Login(String),
    ListAdminMenu,
    Create(String),
    Update(String),
    Delete(String),
    FetchAdminSettings,
    UpdateSettings,
}

#[derive(Default)]
struct Inner {
    items: Vec<MenuItem>,
    settings: SiteSettings,
    calls: Vec<Call>,
    next_id: u32,
    fail_writes: bool,
    fail_reads: bool,
    stall_categories: bool,
}

#[derive(Default)]
pub struct MockApi {
    inner: Mutex<Inner>,
}

pub fn item(id: &str, name: &str, category: &str, price: f64) -> MenuItem {
    MenuItem {
        id: id.to_owned(),
        name: name.to_owned(),
        description: format!("{name} description"),
        price,
        category: category.to_owned(),
        available: true,
        image_url: None,
    }
}

fn transport_like() -> ApiError {
    ApiError::Status { status: 503, body: "unavailable".to_owned() }
}

impl MockApi {
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        let api = Self::default();
        api.inner.lock().unwrap().items = items;
        api
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    /// Make `fetch_categories` never answer.
    pub fn set_stall_categories(&self, stall: bool) {
        self.inner.lock().unwrap().stall_categories = stall;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn items(&self) -> Vec<MenuItem> {
        self.inner.lock().unwrap().items.clone()
    }

    pub fn settings(&self) -> SiteSettings {
        self.inner.lock().unwrap().settings.clone()
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, Inner> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner
    }
}

#[async_trait::async_trait]
impl ContentApi for MockApi {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        let inner = self.record(Call::FetchMenu);
        if inner.fail_reads {
            return Err(transport_like());
        }
        Ok(inner.items.iter().filter(|i| i.available).cloned().collect())
    }

    async fn fetch_categories(&self) -> Result<Vec<CategorySummary>, ApiError> {
        let stall = self.record(Call::FetchCategories).stall_categories;
        if stall {
            std::future::pending::<()>().await;
        }
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(transport_like());
        }
        let mut summaries: Vec<CategorySummary> = Vec::new();
        for item in inner.items.iter().filter(|i| i.available) {
            match summaries.iter_mut().find(|s| s.name == item.category) {
                Some(summary) => summary.count += 1,
                None => summaries.push(CategorySummary { name: item.category.clone(), count: 1 }),
            }
        }
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    async fn fetch_site_settings(&self) -> Result<SiteSettings, ApiError> {
        let inner = self.record(Call::FetchSiteSettings);
        if inner.fail_reads {
            return Err(transport_like());
        }
        Ok(inner.settings.clone())
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let _inner = self.record(Call::Login(request.username.clone()));
        if request.username == "admin" && request.password == "admin123" {
            Ok(TokenResponse { access_token: "mock-token".to_owned(), token_type: "bearer".to_owned() })
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    async fn list_admin_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        let inner = self.record(Call::ListAdminMenu);
        if inner.fail_reads {
            return Err(transport_like());
        }
        Ok(inner.items.clone())
    }

    async fn create_menu_item(&self, input: &MenuItemInput) -> Result<MenuItem, ApiError> {
        let mut inner = self.record(Call::Create(input.name.clone()));
        if inner.fail_writes {
            return Err(transport_like());
        }
        inner.next_id += 1;
        let created = input.clone().into_item(format!("item-{}", inner.next_id));
        inner.items.push(created.clone());
        Ok(created)
    }

    async fn update_menu_item(&self, id: &str, input: &MenuItemInput) -> Result<MenuItem, ApiError> {
        let mut inner = self.record(Call::Update(id.to_owned()));
        if inner.fail_writes {
            return Err(transport_like());
        }
        let Some(existing) = inner.items.iter_mut().find(|i| i.id == id) else {
            return Err(ApiError::Status { status: 404, body: "Menu item not found".to_owned() });
        };
        *existing = input.clone().into_item(id.to_owned());
        Ok(existing.clone())
    }

    async fn delete_menu_item(&self, id: &str) -> Result<(), ApiError> {
        let mut inner = self.record(Call::Delete(id.to_owned()));
        if inner.fail_writes {
            return Err(transport_like());
        }
        let before = inner.items.len();
        inner.items.retain(|i| i.id != id);
        if inner.items.len() == before {
            return Err(ApiError::Status { status: 404, body: "Menu item not found".to_owned() });
        }
        Ok(())
    }

    async fn fetch_admin_settings(&self) -> Result<SiteSettings, ApiError> {
        let inner = self.record(Call::FetchAdminSettings);
        if inner.fail_reads {
            return Err(transport_like());
        }
        Ok(inner.settings.clone())
    }

    async fn update_site_settings(&self, settings: &SiteSettings) -> Result<SiteSettings, ApiError> {
        let mut inner = self.record(Call::UpdateSettings);
        if inner.fail_writes {
            return Err(transport_like());
        }
        inner.settings = settings.clone();
        Ok(inner.settings.clone())
    }
}
