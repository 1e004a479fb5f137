//! Analytics dashboard: the HTML overview and the JSON stats endpoint.
//!
//! Both read the same stats tree. The JSON surface exists for the chart
//! widgets and external reporting tools; it is documented in the OpenAPI
//! spec and carries the same session gate as the page.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::error::ApiResult;
use super::pages::{Nav, fail_page, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::error::Error;
use crate::domain::permissions::{Action, Resource};
use crate::domain::stats::{DashboardStats, DateRange, StatsFilters};
use crate::view::format::{
    format_currency, format_date, format_number, percentage, status_badge_class, status_label,
};
use crate::view::render;

/// Query parameters for both dashboard surfaces.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Range selector value; anything unknown falls back to `month`.
    range: Option<String>,
    /// Restrict the numbers to one stylist.
    stylist_id: Option<String>,
}

impl DashboardQuery {
    /// Resolve the selector and clock into gateway filters.
    fn filters(&self, today: chrono::NaiveDate) -> (DateRange, StatsFilters) {
        let range = DateRange::parse_or_default(self.range.as_deref());
        let (from, to) = range.window(today);
        let filters = StatsFilters {
            date_from: Some(from),
            date_to: Some(to),
            stylist_id: self.stylist_id.clone(),
        };
        (range, filters)
    }
}

/// Headline number with its growth badge.
struct StatCard {
    label: &'static str,
    value: String,
    growth: String,
    growth_up: bool,
}

impl StatCard {
    fn new(label: &'static str, value: String, growth: f64) -> Self {
        Self {
            label,
            value,
            growth: format!("{growth:+.1}%"),
            growth_up: growth >= 0.0,
        }
    }
}

/// Status slice with a precomputed share of the total.
struct StatusRow {
    label: String,
    badge_class: String,
    count: String,
    share: String,
}

/// Row of the top services or top stylists table.
struct TopRow {
    name: String,
    bookings: String,
    revenue: String,
}

/// Recent booking row under the charts.
struct RecentRow {
    id: String,
    customer: String,
    service: String,
    stylist: String,
    when: String,
    status_label: String,
    badge_class: String,
    amount: String,
}

/// The dashboard screen.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage {
    nav: Nav,
    range: &'static str,
    cards: Vec<StatCard>,
    statuses: Vec<StatusRow>,
    top_services: Vec<TopRow>,
    top_stylists: Vec<TopRow>,
    recent: Vec<RecentRow>,
}

fn build_page(nav: Nav, range: DateRange, stats: &DashboardStats) -> DashboardPage {
    let cards = vec![
        StatCard::new(
            "Total Pendapatan",
            format_currency(stats.total_revenue),
            stats.revenue_growth,
        ),
        StatCard::new(
            "Total Booking",
            format_number(stats.total_bookings),
            stats.bookings_growth,
        ),
        StatCard::new(
            "Total Pelanggan",
            format_number(stats.total_customers),
            stats.customers_growth,
        ),
        StatCard::new(
            "Rating Rata-rata",
            format!("{:.1}", stats.average_rating),
            stats.rating_change,
        ),
    ];
    let statuses = stats
        .bookings_by_status
        .iter()
        .map(|row| StatusRow {
            label: status_label(&row.status).to_owned(),
            badge_class: status_badge_class(&row.status),
            count: format_number(row.count),
            share: percentage(row.count, stats.total_bookings),
        })
        .collect();
    let top_services = stats
        .top_services
        .iter()
        .map(|row| TopRow {
            name: row.name.clone(),
            bookings: format_number(row.bookings),
            revenue: format_currency(row.revenue),
        })
        .collect();
    let top_stylists = stats
        .top_stylists
        .iter()
        .map(|row| TopRow {
            name: format!("{} ({:.1})", row.name, row.rating),
            bookings: format_number(row.bookings),
            revenue: format_currency(row.revenue),
        })
        .collect();
    let recent = stats
        .recent_bookings
        .iter()
        .map(|row| RecentRow {
            id: row.id.clone(),
            customer: row.customer_name.clone(),
            service: row.service_name.clone(),
            stylist: row.stylist_name.clone(),
            when: format!("{} {}", format_date(row.appointment_date), row.appointment_time),
            status_label: status_label(&row.status).to_owned(),
            badge_class: status_badge_class(&row.status),
            amount: format_currency(row.total_amount),
        })
        .collect();
    DashboardPage {
        nav,
        range: range.as_str(),
        cards,
        statuses,
        top_services,
        top_stylists,
        recent,
    }
}

/// `GET /dashboard`: the analytics overview.
pub async fn page(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Dashboard, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let (range, filters) = query.filters(state.clock.today());
    match state.stats.stats(&auth.tokens.token, &filters).await {
        Ok(stats) => render(build_page(Nav::for_auth(&auth), range, &stats)),
        Err(error) => fail_page(&session, &auth, &error, "/dashboard"),
    }
}

/// Aggregate dashboard statistics for the selected window.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    params(
        ("range" = Option<String>, Query, description = "today | week | month | year"),
        ("stylist_id" = Option<String>, Query, description = "Restrict to one stylist"),
    ),
    responses(
        (status = 200, description = "Stats for the window", body = DashboardStats),
        (status = 401, description = "Not logged in", body = Error),
        (status = 403, description = "Role may not view the dashboard", body = Error),
    ),
    tag = "dashboard"
)]
pub async fn stats_json(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<DashboardQuery>,
) -> ApiResult<web::Json<DashboardStats>> {
    let auth = session
        .auth()?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let caps = crate::domain::permissions::Capabilities::for_user(&auth.user);
    if !caps.can(Resource::Dashboard, Action::Read) {
        return Err(Error::forbidden("role may not view the dashboard"));
    }
    let (_, filters) = query.filters(state.clock.today());
    let stats = state.stats.stats(&auth.tokens.token, &filters).await?;
    Ok(web::Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockStatsGateway;
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{
        fixture_auth, fixture_today, mock_state, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::NaiveDate;

    fn empty_stats() -> DashboardStats {
        DashboardStats {
            total_revenue: 1_500_000,
            total_bookings: 42,
            total_customers: 30,
            average_rating: 4.6,
            revenue_growth: 12.5,
            bookings_growth: -3.0,
            customers_growth: 0.0,
            rating_change: 0.1,
            revenue_by_day: Vec::new(),
            bookings_by_status: Vec::new(),
            top_services: Vec::new(),
            top_stylists: Vec::new(),
            recent_bookings: Vec::new(),
        }
    }

    fn dashboard_app(
        state: HttpState,
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
                web::get().to(|session: SessionContext| async move {
                    session.persist(&fixture_auth(Role::Admin)).expect("persist");
                    HttpResponse::Ok().finish()
                }),
            )
            .route("/dashboard", web::get().to(page))
            .route("/api/v1/dashboard/stats", web::get().to(stats_json))
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
    async fn default_window_is_first_of_month_through_today() {
        let mut stats = MockStatsGateway::new();
        let first = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid");
        stats
            .expect_stats()
            .withf(move |token, filters| {
                token == "bearer-token"
                    && filters.date_from == Some(first)
                    && filters.date_to == Some(fixture_today())
                    && filters.stylist_id.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(empty_stats()));
        let mut state = mock_state();
        state.stats = std::sync::Arc::new(stats);

        let app = test::init_service(dashboard_app(state)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("Rp1.500.000"));
    }

    #[actix_web::test]
    async fn anonymous_requests_bounce_to_login() {
        let app = test::init_service(dashboard_app(mock_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/dashboard").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").expect("location").as_bytes(),
            b"/login"
        );
    }

    #[actix_web::test]
    async fn json_endpoint_serves_the_raw_stats() {
        let mut stats = MockStatsGateway::new();
        stats
            .expect_stats()
            .times(1)
            .returning(|_, _| Ok(empty_stats()));
        let mut state = mock_state();
        state.stats = std::sync::Arc::new(stats);

        let app = test::init_service(dashboard_app(state)).await;
        let cookie = login_cookie(&app).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/dashboard/stats?range=week")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: DashboardStats = test::read_body_json(res).await;
        assert_eq!(body.total_bookings, 42);
    }
}
