//! Service catalogue screens: list, create, edit, toggle, delete.
//!
//! Toggling the bookable flag and deleting both go through the
//! confirmation round-trip; the edit form doubles as the create form.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{ConfirmForm, ConfirmPage, Nav, PageNav, fail_page, redirect, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::permissions::{Action, Capabilities, Resource};
use crate::domain::service::{Service, ServiceCategory, ServiceDraft, ServiceFilters};
use crate::view::format::{format_currency, truncate};
use crate::view::render;

/// Filter form on the list screen.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceListQuery {
    page: Option<u32>,
    category: Option<ServiceCategory>,
    is_active: Option<bool>,
    search: Option<String>,
}

impl ServiceListQuery {
    fn filters(&self) -> ServiceFilters {
        ServiceFilters {
            page: self.page,
            category: self.category,
            is_active: self.is_active,
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            ..ServiceFilters::default()
        }
    }

    fn href_template(&self) -> String {
        let mut href = String::from("/services?page={page}");
        if let Some(category) = self.category {
            href.push_str("&category=");
            href.push_str(category.as_str());
        }
        if let Some(active) = self.is_active {
            href.push_str(&format!("&is_active={active}"));
        }
        if let Some(search) = &self.search {
            href.push_str("&search=");
            href.push_str(search);
        }
        href
    }
}

struct ServiceRow {
    id: String,
    name: String,
    description: String,
    category: String,
    price: String,
    duration: String,
    is_active: bool,
    is_popular: bool,
}

fn service_row(service: &Service) -> ServiceRow {
    ServiceRow {
        id: service.id.clone(),
        name: service.name.clone(),
        description: truncate(&service.description, 80),
        category: service.category.as_str().to_owned(),
        price: format_currency(service.price),
        duration: format!("{} menit", service.duration),
        is_active: service.is_active,
        is_popular: service.is_popular,
    }
}

/// The catalogue list screen.
#[derive(Template)]
#[template(path = "services/list.html")]
struct ServiceListPage {
    nav: Nav,
    rows: Vec<ServiceRow>,
    page_nav: PageNav,
    can_create: bool,
    can_update: bool,
    can_delete: bool,
}

/// `GET /services`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<ServiceListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .services
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let caps = Capabilities::for_user(&auth.user);
            render(ServiceListPage {
                nav: Nav::for_auth(&auth),
                rows: page.items.iter().map(service_row).collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
                can_create: caps.can(Resource::Services, Action::Create),
                can_update: caps.can(Resource::Services, Action::Update),
                can_delete: caps.can(Resource::Services, Action::Delete),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/services"),
    }
}

/// Create/edit form values, also used to refill after a failure.
struct ServiceFormValues {
    name: String,
    description: String,
    category: String,
    price: i64,
    duration: u32,
    is_active: bool,
    is_popular: bool,
    image: String,
}

impl ServiceFormValues {
    fn empty() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0,
            duration: 30,
            is_active: true,
            is_popular: false,
            image: String::new(),
        }
    }

    fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            category: service.category.as_str().to_owned(),
            price: service.price,
            duration: service.duration,
            is_active: service.is_active,
            is_popular: service.is_popular,
            image: service.image.clone().unwrap_or_default(),
        }
    }
}

/// One `<option>` of the category selector.
struct CategoryOption {
    value: &'static str,
    selected: bool,
}

/// The create/edit form screen.
#[derive(Template)]
#[template(path = "services/form.html")]
struct ServiceFormPage {
    nav: Nav,
    /// Empty for create, the service id for edit.
    action_href: String,
    heading: &'static str,
    values: ServiceFormValues,
    categories: Vec<CategoryOption>,
    error: Option<String>,
}

fn category_options(current: &str) -> Vec<CategoryOption> {
    ServiceCategory::ALL
        .iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            selected: c.as_str() == current,
        })
        .collect()
}

/// `GET /services/new`.
pub async fn new_form(session: SessionContext) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    render(ServiceFormPage {
        nav: Nav::for_auth(&auth),
        action_href: "/services".to_owned(),
        heading: "Tambah Layanan",
        values: ServiceFormValues::empty(),
        categories: category_options(""),
        error: None,
    })
}

/// `GET /services/{id}/edit`.
pub async fn edit_form(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    match state.services.get(&auth.tokens.token, &id).await {
        Ok(service) => render(ServiceFormPage {
            nav: Nav::for_auth(&auth),
            action_href: format!("/services/{id}"),
            heading: "Ubah Layanan",
            categories: category_options(service.category.as_str()),
            values: ServiceFormValues::from_service(&service),
            error: None,
        }),
        Err(error) => fail_page(&session, &auth, &error, "/services"),
    }
}

/// Raw create/edit form fields. Checkboxes arrive only when ticked.
#[derive(Debug, Deserialize)]
pub struct ServiceForm {
    name: String,
    description: String,
    category: ServiceCategory,
    price: i64,
    duration: u32,
    is_active: Option<String>,
    is_popular: Option<String>,
    image: Option<String>,
}

impl ServiceForm {
    fn draft(self) -> ServiceDraft {
        ServiceDraft {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            category: self.category,
            price: self.price,
            duration: self.duration,
            is_active: self.is_active.is_some(),
            is_popular: self.is_popular.is_some(),
            image: self.image.filter(|url| !url.trim().is_empty()),
            tags: Vec::new(),
            requirements: Vec::new(),
        }
    }
}

/// `POST /services`.
pub async fn create(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<ServiceForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .services
        .create(&auth.tokens.token, &form.into_inner().draft())
        .await
    {
        Ok(_) => redirect("/services"),
        Err(error) => fail_page(&session, &auth, &error, "/services/new"),
    }
}

/// `POST /services/{id}`.
pub async fn update(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ServiceForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    match state
        .services
        .update(&auth.tokens.token, &id, &form.into_inner().draft())
        .await
    {
        Ok(_) => redirect("/services"),
        Err(error) => fail_page(&session, &auth, &error, &format!("/services/{id}/edit")),
    }
}

/// `POST /services/{id}/toggle-active`.
pub async fn toggle_active(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Ubah status layanan ini?".to_owned(),
            message: "Layanan nonaktif tidak dapat dibooking pelanggan.".to_owned(),
            action_href: format!("/services/{id}/toggle-active"),
            cancel_href: "/services".to_owned(),
            ask_reason: false,
        });
    }
    match state.services.toggle_active(&auth.tokens.token, &id).await {
        Ok(_) => redirect("/services"),
        Err(error) => fail_page(&session, &auth, &error, "/services"),
    }
}

/// `POST /services/{id}/delete`.
pub async fn delete(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Services, Action::Delete) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Hapus layanan ini?".to_owned(),
            message: "Layanan yang dihapus tidak dapat dikembalikan.".to_owned(),
            action_href: format!("/services/{id}/delete"),
            cancel_href: "/services".to_owned(),
            ask_reason: false,
        });
    }
    match state.services.delete(&auth.tokens.token, &id).await {
        Ok(()) => redirect("/services"),
        Err(error) => fail_page(&session, &auth, &error, "/services"),
    }
}
