//! Customer directory: list and detail with booking history.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{Nav, PageNav, fail_page, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::customer::{Customer, CustomerFilters};
use crate::domain::permissions::{Action, Resource};
use crate::view::format::{format_currency, format_date, initials, relative_time, status_label};
use crate::view::render;

/// Filter form on the directory screen.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListQuery {
    page: Option<u32>,
    search: Option<String>,
}

impl CustomerListQuery {
    fn filters(&self) -> CustomerFilters {
        CustomerFilters {
            page: self.page,
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            ..CustomerFilters::default()
        }
    }

    fn href_template(&self) -> String {
        let mut href = String::from("/customers?page={page}");
        if let Some(search) = &self.search {
            href.push_str("&search=");
            href.push_str(search);
        }
        href
    }
}

struct CustomerRow {
    id: String,
    initials: String,
    name: String,
    email: String,
    phone: String,
    bookings: String,
    spent: String,
    last_booking: String,
}

fn customer_row(customer: &Customer, now: chrono::DateTime<chrono::Utc>) -> CustomerRow {
    CustomerRow {
        id: customer.id.clone(),
        initials: initials(&customer.full_name),
        name: customer.full_name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone().unwrap_or_default(),
        bookings: customer.total_bookings.to_string(),
        spent: format_currency(customer.total_spent),
        last_booking: customer
            .last_booking
            .map(|at| relative_time(now, at))
            .unwrap_or_else(|| "Belum pernah".to_owned()),
    }
}

/// The directory screen.
#[derive(Template)]
#[template(path = "customers/list.html")]
struct CustomerListPage {
    nav: Nav,
    rows: Vec<CustomerRow>,
    page_nav: PageNav,
    search: String,
}

/// `GET /customers`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<CustomerListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Users, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .customers
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let now = chrono::Utc::now();
            render(CustomerListPage {
                nav: Nav::for_auth(&auth),
                rows: page
                    .items
                    .iter()
                    .map(|customer| customer_row(customer, now))
                    .collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
                search: query.search.clone().unwrap_or_default(),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/customers"),
    }
}

/// Booking history row on the detail screen.
struct HistoryRow {
    booking_id: String,
    when: String,
    service: String,
    status: String,
    amount: String,
}

/// The customer detail screen.
#[derive(Template)]
#[template(path = "customers/detail.html")]
struct CustomerDetailPage {
    nav: Nav,
    id: String,
    name: String,
    email: String,
    phone: String,
    is_active: bool,
    bookings: String,
    spent: String,
    history: Vec<HistoryRow>,
    history_nav: PageNav,
}

/// Pagination for the embedded booking history.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerDetailQuery {
    page: Option<u32>,
}

/// `GET /customers/{id}`.
pub async fn detail(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<CustomerDetailQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Users, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    let customer = match state.customers.get(&auth.tokens.token, &id).await {
        Ok(customer) => customer,
        Err(error) => return fail_page(&session, &auth, &error, "/customers"),
    };
    let history = match state
        .customers
        .booking_history(&auth.tokens.token, &id, query.page, None)
        .await
    {
        Ok(history) => history,
        Err(error) => return fail_page(&session, &auth, &error, "/customers"),
    };
    let history_nav = PageNav::new(
        &history.info,
        &format!("/customers/{id}?page={{page}}"),
    );
    render(CustomerDetailPage {
        nav: Nav::for_auth(&auth),
        id: customer.id.clone(),
        name: customer.full_name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone().unwrap_or_default(),
        is_active: customer.is_active,
        bookings: customer.total_bookings.to_string(),
        spent: format_currency(customer.total_spent),
        history: history
            .items
            .iter()
            .map(|booking| HistoryRow {
                booking_id: booking.id.clone(),
                when: format!(
                    "{} {}",
                    format_date(booking.appointment_date),
                    booking.appointment_time
                ),
                service: booking
                    .service
                    .as_ref()
                    .map_or_else(|| booking.service_id.clone(), |s| s.name.clone()),
                status: status_label(booking.status.as_str()).to_owned(),
                amount: format_currency(booking.total_amount),
            })
            .collect(),
        history_nav,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{fixture_auth, mock_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn stylists_are_denied_the_customer_directory() {
        // Stylists hold no users permissions at all; the expectation-free
        // mock proves the gateway is never consulted.
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(mock_state()))
                .route(
                    "/session",
                    web::get().to(|session: SessionContext| async move {
                        session
                            .persist(&fixture_auth(Role::Stylist))
                            .expect("persist");
                        HttpResponse::Ok().finish()
                    }),
                )
                .route("/customers", web::get().to(list)),
        )
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/session").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/customers")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("akses"));
    }
}
