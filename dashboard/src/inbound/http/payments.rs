//! Payment screens: transaction list and refunds.
//!
//! Refunds only make sense for settled payments; the button is hidden for
//! anything else, and the backend double-checks regardless.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{ConfirmForm, ConfirmPage, Nav, PageNav, fail_page, redirect, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::payment::{Payment, PaymentFilters, PaymentMethod, PaymentStatus};
use crate::domain::permissions::{Action, Capabilities, Resource};
use crate::view::format::{format_currency, format_date_time, status_badge_class, status_label};
use crate::view::render;

/// Filter form on the list screen.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentListQuery {
    page: Option<u32>,
    status: Option<PaymentStatus>,
    method: Option<PaymentMethod>,
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
}

impl PaymentListQuery {
    fn filters(&self) -> PaymentFilters {
        PaymentFilters {
            page: self.page,
            status: self.status,
            method: self.method,
            start_date: self.start_date,
            end_date: self.end_date,
            ..PaymentFilters::default()
        }
    }

    fn href_template(&self) -> String {
        let mut href = String::from("/payments?page={page}");
        if let Some(status) = self.status {
            href.push_str("&status=");
            href.push_str(status.as_str());
        }
        if let Some(method) = self.method {
            href.push_str("&method=");
            href.push_str(method.as_str());
        }
        if let Some(date) = self.start_date {
            href.push_str(&format!("&start_date={}", date.format("%Y-%m-%d")));
        }
        if let Some(date) = self.end_date {
            href.push_str(&format!("&end_date={}", date.format("%Y-%m-%d")));
        }
        href
    }
}

struct PaymentRow {
    id: String,
    booking_id: String,
    amount: String,
    method: String,
    status_label: String,
    badge_class: String,
    paid_at: String,
    can_refund: bool,
}

fn method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "Tunai",
        PaymentMethod::CreditCard => "Kartu Kredit",
        PaymentMethod::DebitCard => "Kartu Debit",
        PaymentMethod::DigitalWallet => "Dompet Digital",
        PaymentMethod::BankTransfer => "Transfer Bank",
    }
}

fn payment_row(payment: &Payment, may_refund: bool) -> PaymentRow {
    PaymentRow {
        id: payment.id.clone(),
        booking_id: payment.booking_id.clone(),
        amount: format_currency(payment.amount),
        method: method_label(payment.method).to_owned(),
        status_label: status_label(payment.status.as_str()).to_owned(),
        badge_class: status_badge_class(payment.status.as_str()),
        paid_at: payment.paid_at.map(format_date_time).unwrap_or_default(),
        can_refund: may_refund && payment.status.can_refund(),
    }
}

/// The transaction list screen.
#[derive(Template)]
#[template(path = "payments/list.html")]
struct PaymentListPage {
    nav: Nav,
    rows: Vec<PaymentRow>,
    page_nav: PageNav,
}

/// `GET /payments`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<PaymentListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Payments, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .payments
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let caps = Capabilities::for_user(&auth.user);
            let may_refund = caps.can(Resource::Payments, Action::Update);
            render(PaymentListPage {
                nav: Nav::for_auth(&auth),
                rows: page
                    .items
                    .iter()
                    .map(|payment| payment_row(payment, may_refund))
                    .collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/payments"),
    }
}

/// `POST /payments/{id}/refund`.
pub async fn refund(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Payments, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Kembalikan pembayaran ini?".to_owned(),
            message: "Dana akan dikembalikan ke pelanggan. Tindakan ini tidak dapat dibatalkan."
                .to_owned(),
            action_href: format!("/payments/{id}/refund"),
            cancel_href: "/payments".to_owned(),
            ask_reason: true,
        });
    }
    match state
        .payments
        .refund(
            &auth.tokens.token,
            &id,
            form.reason().unwrap_or("Dikembalikan oleh admin"),
        )
        .await
    {
        Ok(_) => redirect("/payments"),
        Err(error) => fail_page(&session, &auth, &error, "/payments"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPaymentsGateway;
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{fixture_auth, mock_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    fn payments_app(
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
            .route("/payments/{id}/refund", web::post().to(refund))
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
    async fn refund_requires_the_confirmation_round_trip() {
        let app = test::init_service(payments_app(mock_state(), Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payments/p-1/refund")
                .cookie(cookie)
                .set_form(ConfirmForm::default())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("Kembalikan pembayaran ini?"));
    }

    #[actix_web::test]
    async fn confirmed_refund_forwards_the_default_reason() {
        let mut payments = MockPaymentsGateway::new();
        payments
            .expect_refund()
            .withf(|_, id, reason| id == "p-1" && reason == "Dikembalikan oleh admin")
            .times(1)
            .returning(|_, _, _| {
                Ok(Payment {
                    id: "p-1".to_owned(),
                    booking_id: "b-1".to_owned(),
                    customer_id: "c-1".to_owned(),
                    amount: 50_000,
                    method: PaymentMethod::Cash,
                    status: PaymentStatus::Refunded,
                    transaction_id: None,
                    currency: "IDR".to_owned(),
                    paid_at: None,
                    created_at: chrono::Utc::now(),
                    updated_at: chrono::Utc::now(),
                })
            });
        let mut state = mock_state();
        state.payments = std::sync::Arc::new(payments);

        let app = test::init_service(payments_app(state, Role::Admin)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payments/p-1/refund")
                .cookie(cookie)
                .set_form(ConfirmForm {
                    confirm: Some("yes".to_owned()),
                    reason: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn stylists_cannot_refund() {
        // Stylists hold payments read only; the mock must stay untouched.
        let app = test::init_service(payments_app(mock_state(), Role::Stylist)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/payments/p-1/refund")
                .cookie(cookie)
                .set_form(ConfirmForm {
                    confirm: Some("yes".to_owned()),
                    reason: None,
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("akses"));
    }
}
