//! Shared plumbing for the HTML screens.
//!
//! Every screen is gated twice: a missing session redirects to `/login`,
//! and a role without the required permission gets the access-denied page.
//! Destructive actions additionally require an explicit `confirm=yes`
//! form round-trip before any gateway call is made.

use actix_web::HttpResponse;
use actix_web::http::header;
use askama::Template;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session::SessionContext;
use crate::domain::auth::AuthSession;
use crate::domain::permissions::{Action, Capabilities, DashboardScope, Resource};
use crate::domain::ports::GatewayError;
use crate::view::render;

/// See-other redirect to an internal location.
#[must_use]
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Navigation context shared by every screen behind the login.
#[derive(Debug, Clone)]
pub struct Nav {
    /// Operator display name.
    pub user_name: String,
    /// Operator role, lowercase.
    pub role: String,
    /// Which sidebar links the role may see.
    pub show_dashboard: bool,
    pub show_bookings: bool,
    pub show_services: bool,
    pub show_stylists: bool,
    pub show_payments: bool,
    pub show_customers: bool,
    pub show_reviews: bool,
}

impl Nav {
    /// Derive the sidebar from the operator's capabilities.
    #[must_use]
    pub fn for_auth(auth: &AuthSession) -> Self {
        let caps = Capabilities::for_user(&auth.user);
        Self {
            user_name: auth.user.full_name.clone(),
            role: auth.user.role.to_string(),
            show_dashboard: caps.can_access(DashboardScope::Admin)
                || caps.can_access(DashboardScope::Manager)
                || caps.can_access(DashboardScope::Stylist),
            show_bookings: caps.can(Resource::Bookings, Action::Read),
            show_services: caps.can(Resource::Services, Action::Read),
            show_stylists: caps.can(Resource::Stylists, Action::Read),
            show_payments: caps.can(Resource::Payments, Action::Read),
            show_customers: caps.can(Resource::Users, Action::Read),
            show_reviews: caps.can(Resource::Reviews, Action::Read),
        }
    }
}

/// Access-denied page.
#[derive(Template)]
#[template(path = "denied.html")]
pub struct DeniedPage {
    /// Sidebar context.
    pub nav: Nav,
}

/// Alert page shown when a gateway call fails.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    /// Sidebar context.
    pub nav: Nav,
    /// Operator-facing message.
    pub message: String,
    /// Where the back link points.
    pub back: String,
}

/// Confirmation page for destructive actions.
#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmPage {
    /// Sidebar context.
    pub nav: Nav,
    /// Short question, e.g. "Hapus layanan ini?".
    pub title: String,
    /// Longer description of the consequence.
    pub message: String,
    /// Where the confirmed form posts to.
    pub action_href: String,
    /// Where the cancel link points.
    pub cancel_href: String,
    /// Whether to ask for a reason alongside the confirmation.
    pub ask_reason: bool,
}

/// Form payload for confirmed destructive actions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfirmForm {
    /// Must read `yes` for the action to run.
    pub confirm: Option<String>,
    /// Optional reason forwarded to the backend.
    pub reason: Option<String>,
}

impl ConfirmForm {
    /// Whether the operator has confirmed the action.
    #[must_use]
    pub fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }

    /// The trimmed reason, if one was supplied.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
    }
}

/// Require a logged-in operator with permission for `action` on
/// `resource`. Missing sessions bounce to `/login`; missing permissions
/// render the access-denied page. Permission checks fail closed.
pub fn require(
    session: &SessionContext,
    resource: Resource,
    action: Action,
) -> Result<AuthSession, HttpResponse> {
    let auth = match session.auth() {
        Ok(Some(auth)) => auth,
        Ok(None) => return Err(redirect("/login")),
        Err(error) => {
            warn!(%error, "unreadable session, forcing a fresh login");
            session.purge();
            return Err(redirect("/login"));
        }
    };
    let caps = Capabilities::for_user(&auth.user);
    if !caps.can(resource, action) {
        return Err(render(DeniedPage {
            nav: Nav::for_auth(&auth),
        }));
    }
    Ok(auth)
}

/// Map a gateway failure to a response. An expired token purges the
/// session and bounces to `/login`; everything else renders the alert
/// page with a back link.
pub fn fail_page(
    session: &SessionContext,
    auth: &AuthSession,
    error: &GatewayError,
    back: &str,
) -> HttpResponse {
    if matches!(error, GatewayError::Unauthorized) {
        session.purge();
        return redirect("/login");
    }
    warn!(%error, "gateway call failed");
    render(ErrorPage {
        nav: Nav::for_auth(auth),
        message: error.user_message(),
        back: back.to_owned(),
    })
}

/// Pagination controls for the list screens.
#[derive(Debug, Clone)]
pub struct PageNav {
    /// Human summary, e.g. `Halaman 2 dari 5 (43 data)`.
    pub summary: String,
    /// Link to the previous page, when one exists.
    pub prev_href: Option<String>,
    /// Link to the next page, when one exists.
    pub next_href: Option<String>,
}

impl PageNav {
    /// Build the controls from page metadata and a link template where
    /// `{page}` marks the page number.
    #[must_use]
    pub fn new(info: &pagination::PageInfo, href_template: &str) -> Self {
        let href = |page: u32| href_template.replace("{page}", &page.to_string());
        Self {
            summary: format!(
                "Halaman {} dari {} ({} data)",
                info.page,
                info.total_pages.max(1),
                info.total
            ),
            prev_href: info.has_previous().then(|| href(info.page - 1)),
            next_href: info.has_next().then(|| href(info.page + 1)),
        }
    }
}
