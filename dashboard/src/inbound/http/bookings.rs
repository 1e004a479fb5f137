//! Booking screens: list, detail, creation, and lifecycle actions.
//!
//! Lifecycle transitions (confirm, cancel, complete) are destructive and
//! round-trip through the confirmation page before any gateway call.
//! Which buttons appear is driven by the booking's status; the backend
//! still validates the transition and its message is surfaced verbatim.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{ConfirmForm, ConfirmPage, Nav, PageNav, fail_page, redirect, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::booking::{Booking, BookingDraft, BookingFilters, BookingStatus};
use crate::domain::permissions::{Action, Resource};
use crate::view::format::{
    format_currency, format_date, format_date_long, status_badge_class, status_label,
};
use crate::view::render;

/// Filter form on the list screen.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    page: Option<u32>,
    status: Option<BookingStatus>,
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
    stylist_id: Option<String>,
}

impl BookingListQuery {
    fn filters(&self) -> BookingFilters {
        BookingFilters {
            page: self.page,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            stylist_id: self.stylist_id.clone(),
            ..BookingFilters::default()
        }
    }

    /// Link template for pagination, `{page}` left as a placeholder.
    fn href_template(&self) -> String {
        let mut href = String::from("/bookings?page={page}");
        if let Some(status) = self.status {
            href.push_str("&status=");
            href.push_str(status.as_str());
        }
        if let Some(date) = self.start_date {
            href.push_str(&format!("&start_date={}", date.format("%Y-%m-%d")));
        }
        if let Some(date) = self.end_date {
            href.push_str(&format!("&end_date={}", date.format("%Y-%m-%d")));
        }
        if let Some(id) = &self.stylist_id {
            href.push_str("&stylist_id=");
            href.push_str(id);
        }
        href
    }
}

struct BookingRow {
    id: String,
    customer: String,
    service: String,
    stylist: String,
    when: String,
    status_label: String,
    badge_class: String,
    amount: String,
}

fn customer_name(booking: &Booking) -> String {
    booking
        .customer
        .as_ref()
        .map_or_else(|| booking.customer_id.clone(), |c| c.full_name.clone())
}

fn service_name(booking: &Booking) -> String {
    booking
        .service
        .as_ref()
        .map_or_else(|| booking.service_id.clone(), |s| s.name.clone())
}

fn stylist_name(booking: &Booking) -> String {
    booking
        .stylist
        .as_ref()
        .map_or_else(|| booking.stylist_id.clone(), |s| s.name.clone())
}

fn booking_row(booking: &Booking) -> BookingRow {
    BookingRow {
        id: booking.id.clone(),
        customer: customer_name(booking),
        service: service_name(booking),
        stylist: stylist_name(booking),
        when: format!(
            "{} {}",
            format_date(booking.appointment_date),
            booking.appointment_time
        ),
        status_label: status_label(booking.status.as_str()).to_owned(),
        badge_class: status_badge_class(booking.status.as_str()),
        amount: format_currency(booking.total_amount),
    }
}

/// The bookings list screen.
#[derive(Template)]
#[template(path = "bookings/list.html")]
struct BookingListPage {
    nav: Nav,
    rows: Vec<BookingRow>,
    page_nav: PageNav,
    status_filter: String,
    can_create: bool,
}

/// `GET /bookings`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<BookingListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Bookings, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .bookings
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let caps = crate::domain::permissions::Capabilities::for_user(&auth.user);
            render(BookingListPage {
                nav: Nav::for_auth(&auth),
                rows: page.items.iter().map(booking_row).collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
                status_filter: query
                    .status
                    .map(|status| status.as_str().to_owned())
                    .unwrap_or_default(),
                can_create: caps.can(Resource::Bookings, Action::Create),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/bookings"),
    }
}

/// The booking detail screen.
#[derive(Template)]
#[template(path = "bookings/detail.html")]
struct BookingDetailPage {
    nav: Nav,
    id: String,
    customer: String,
    customer_contact: String,
    service: String,
    stylist: String,
    date_long: String,
    time: String,
    status_label: String,
    badge_class: String,
    amount: String,
    notes: String,
    cancel_reason: String,
    can_confirm: bool,
    can_cancel: bool,
    can_complete: bool,
}

fn detail_page(nav: Nav, booking: &Booking, may_update: bool) -> BookingDetailPage {
    let contact = booking.customer.as_ref().map_or_else(String::new, |c| {
        match &c.phone {
            Some(phone) => format!("{} / {}", c.email, phone),
            None => c.email.clone(),
        }
    });
    BookingDetailPage {
        nav,
        id: booking.id.clone(),
        customer: customer_name(booking),
        customer_contact: contact,
        service: service_name(booking),
        stylist: stylist_name(booking),
        date_long: format_date_long(booking.appointment_date),
        time: booking.appointment_time.clone(),
        status_label: status_label(booking.status.as_str()).to_owned(),
        badge_class: status_badge_class(booking.status.as_str()),
        amount: format_currency(booking.total_amount),
        notes: booking.notes.clone().unwrap_or_default(),
        cancel_reason: booking.cancel_reason.clone().unwrap_or_default(),
        can_confirm: may_update && booking.status.can_confirm(),
        can_cancel: may_update && booking.status.can_cancel(),
        can_complete: may_update && booking.status.can_complete(),
    }
}

/// `GET /bookings/{id}`.
pub async fn detail(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Bookings, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    match state.bookings.get(&auth.tokens.token, &id).await {
        Ok(booking) => {
            let caps = crate::domain::permissions::Capabilities::for_user(&auth.user);
            render(detail_page(
                Nav::for_auth(&auth),
                &booking,
                caps.can(Resource::Bookings, Action::Update),
            ))
        }
        Err(error) => fail_page(&session, &auth, &error, "/bookings"),
    }
}

/// The new-booking form.
#[derive(Template)]
#[template(path = "bookings/new.html")]
struct BookingNewPage {
    nav: Nav,
    error: Option<String>,
}

/// `GET /bookings/new`.
pub async fn new_form(session: SessionContext) -> HttpResponse {
    let auth = match require(&session, Resource::Bookings, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    render(BookingNewPage {
        nav: Nav::for_auth(&auth),
        error: None,
    })
}

/// Raw new-booking form fields.
#[derive(Debug, Deserialize)]
pub struct BookingNewForm {
    customer_id: String,
    stylist_id: String,
    service_id: String,
    appointment_date: chrono::NaiveDate,
    appointment_time: String,
    notes: Option<String>,
}

/// `POST /bookings`.
pub async fn create(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<BookingNewForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Bookings, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let form = form.into_inner();
    let draft = BookingDraft {
        customer_id: form.customer_id,
        stylist_id: form.stylist_id,
        service_id: form.service_id,
        appointment_date: form.appointment_date,
        appointment_time: form.appointment_time,
        notes: form.notes.filter(|notes| !notes.trim().is_empty()),
    };
    match state.bookings.create(&auth.tokens.token, &draft).await {
        Ok(booking) => redirect(&format!("/bookings/{}", booking.id)),
        Err(crate::domain::ports::GatewayError::Unauthorized) => {
            session.purge();
            redirect("/login")
        }
        Err(error) => render(BookingNewPage {
            nav: Nav::for_auth(&auth),
            error: Some(error.user_message()),
        }),
    }
}

/// Lifecycle transitions sharing the same confirmation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Confirm,
    Cancel,
    Complete,
}

impl Transition {
    const fn segment(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Confirm => "Konfirmasi booking ini?",
            Self::Cancel => "Batalkan booking ini?",
            Self::Complete => "Tandai booking ini selesai?",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Confirm => "Pelanggan akan menerima jadwal yang dikonfirmasi.",
            Self::Cancel => "Booking yang dibatalkan tidak dapat dikembalikan.",
            Self::Complete => "Booking akan ditandai selesai dan masuk ke laporan.",
        }
    }
}

async fn transition(
    session: SessionContext,
    state: web::Data<HttpState>,
    id: String,
    form: ConfirmForm,
    which: Transition,
) -> HttpResponse {
    let auth = match require(&session, Resource::Bookings, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: which.title().to_owned(),
            message: which.message().to_owned(),
            action_href: format!("/bookings/{id}/{}", which.segment()),
            cancel_href: format!("/bookings/{id}"),
            ask_reason: which == Transition::Cancel,
        });
    }
    let token = &auth.tokens.token;
    let outcome = match which {
        Transition::Confirm => state.bookings.confirm(token, &id).await,
        Transition::Cancel => {
            state
                .bookings
                .cancel(token, &id, form.reason().unwrap_or("Dibatalkan oleh admin"))
                .await
        }
        Transition::Complete => state.bookings.complete(token, &id).await,
    };
    match outcome {
        Ok(_) => redirect(&format!("/bookings/{id}")),
        Err(error) => fail_page(&session, &auth, &error, &format!("/bookings/{id}")),
    }
}

/// `POST /bookings/{id}/confirm`.
pub async fn confirm(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    transition(session, state, path.into_inner(), form.into_inner(), Transition::Confirm).await
}

/// `POST /bookings/{id}/cancel`.
pub async fn cancel(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    transition(session, state, path.into_inner(), form.into_inner(), Transition::Cancel).await
}

/// `POST /bookings/{id}/complete`.
pub async fn complete(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    transition(session, state, path.into_inner(), form.into_inner(), Transition::Complete).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{GatewayError, MockBookingsGateway};
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{fixture_auth, mock_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use pagination::Page;

    fn fixture_booking(status: BookingStatus) -> Booking {
        Booking {
            id: "b-1".to_owned(),
            customer_id: "c-1".to_owned(),
            stylist_id: "s-1".to_owned(),
            service_id: "svc-1".to_owned(),
            appointment_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 20).expect("valid"),
            appointment_time: "10:00".to_owned(),
            end_time: None,
            status,
            total_amount: 50_000,
            notes: None,
            cancel_reason: None,
            customer: None,
            stylist: None,
            service: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn bookings_app(
        state: HttpState,
        role: Role,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .route(
                "/session",
                web::get().to(move |session: SessionContext| async move {
                    session.persist(&fixture_auth(role)).expect("persist");
                    HttpResponse::Ok().finish()
                }),
            )
            .route("/bookings", web::get().to(list))
            .route("/bookings/{id}/cancel", web::post().to(cancel))
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> actix_web::cookie::Cookie<'static> {
        let res =
            test::call_service(app, test::TestRequest::get().uri("/session").to_request()).await;
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn list_forwards_filters_and_renders_rows() {
        let mut bookings = MockBookingsGateway::new();
        bookings
            .expect_list()
            .withf(|_, filters| {
                filters.status == Some(BookingStatus::Pending) && filters.page == Some(2)
            })
            .times(1)
            .returning(|_, _| {
                Ok(Page {
                    items: vec![fixture_booking(BookingStatus::Pending)],
                    info: pagination::PageInfo::compute(2, 10, 11),
                })
            });
        let mut state = mock_state();
        state.bookings = std::sync::Arc::new(bookings);

        let app = test::init_service(bookings_app(state, Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/bookings?page=2&status=pending")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("Menunggu"));
        assert!(html.contains("Rp50.000"));
    }

    #[actix_web::test]
    async fn unconfirmed_cancel_renders_the_question_without_a_gateway_call() {
        // The expectation-free mock panics on any call, so reaching OK here
        // proves the gate held.
        let app = test::init_service(bookings_app(mock_state(), Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/bookings/b-1/cancel")
                .cookie(cookie)
                .set_form(ConfirmForm::default())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("Batalkan booking ini?"));
        assert!(html.contains("confirm"));
    }

    #[actix_web::test]
    async fn confirmed_cancel_forwards_the_reason() {
        let mut bookings = MockBookingsGateway::new();
        bookings
            .expect_cancel()
            .withf(|_, id, reason| id == "b-1" && reason == "double booking")
            .times(1)
            .returning(|_, _, _| Ok(fixture_booking(BookingStatus::Cancelled)));
        let mut state = mock_state();
        state.bookings = std::sync::Arc::new(bookings);

        let app = test::init_service(bookings_app(state, Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/bookings/b-1/cancel")
                .cookie(cookie)
                .set_form(ConfirmForm {
                    confirm: Some("yes".to_owned()),
                    reason: Some("double booking".to_owned()),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn expired_token_purges_the_session_and_redirects() {
        let mut bookings = MockBookingsGateway::new();
        bookings
            .expect_list()
            .times(1)
            .returning(|_, _| Err(GatewayError::Unauthorized));
        let mut state = mock_state();
        state.bookings = std::sync::Arc::new(bookings);

        let app = test::init_service(bookings_app(state, Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/bookings")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").expect("location").as_bytes(),
            b"/login"
        );
    }
}
