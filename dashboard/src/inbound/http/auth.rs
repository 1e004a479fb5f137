//! Login and logout screens.
//!
//! A successful login stores the backend tokens and account record in the
//! session cookie and lands on the dashboard (or the bookings list for
//! roles without dashboard access). Logout revokes upstream best-effort
//! and always purges the local session.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::pages::redirect;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::auth::{LoginCredentials, LoginValidationError};
use crate::domain::permissions::{Action, Capabilities, Resource};
use crate::view::render;

/// Standalone login screen, no sidebar.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage {
    /// Validation or gateway failure, when present.
    error: Option<String>,
    /// Email to refill after a failed attempt.
    email: String,
}

/// Raw login form fields.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

fn validation_message(error: LoginValidationError) -> &'static str {
    match error {
        LoginValidationError::EmptyEmail => "Email wajib diisi",
        LoginValidationError::InvalidEmail => "Format email tidak valid",
        LoginValidationError::EmptyPassword => "Password wajib diisi",
    }
}

/// Landing page for the role: dashboard when permitted, bookings otherwise.
fn home_for(caps: &Capabilities) -> &'static str {
    if caps.can(Resource::Dashboard, Action::Read) {
        "/dashboard"
    } else {
        "/bookings"
    }
}

/// `GET /` re-validates the stored token against the backend, then bounces
/// to the role's landing page. A revoked token is purged instead of letting
/// every screen fail with the same 401.
pub async fn index(session: SessionContext, state: web::Data<HttpState>) -> HttpResponse {
    let Ok(Some(auth)) = session.auth() else {
        return redirect("/login");
    };
    match state.auth.profile(&auth.tokens).await {
        Ok(user) => redirect(home_for(&Capabilities::for_user(&user))),
        Err(crate::domain::ports::GatewayError::Unauthorized) => {
            session.purge();
            redirect("/login")
        }
        // Backend hiccups should not log the operator out.
        Err(_) => redirect(home_for(&Capabilities::for_user(&auth.user))),
    }
}

/// `GET /login`: an already-authenticated operator skips the form.
pub async fn login_form(session: SessionContext) -> HttpResponse {
    if let Ok(Some(auth)) = session.auth() {
        return redirect(home_for(&Capabilities::for_user(&auth.user)));
    }
    render(LoginPage {
        error: None,
        email: String::new(),
    })
}

/// `POST /login`: validate, exchange credentials, persist the session.
pub async fn login_submit(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let credentials = match LoginCredentials::try_from_parts(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(error) => {
            return render(LoginPage {
                error: Some(validation_message(error).to_owned()),
                email: form.email.clone(),
            });
        }
    };
    match state.auth.login(&credentials).await {
        Ok(auth) => {
            if let Err(error) = session.persist(&auth) {
                warn!(%error, "failed to persist fresh login");
                return render(LoginPage {
                    error: Some("An unexpected error occurred".to_owned()),
                    email: form.email.clone(),
                });
            }
            info!(user = %auth.user.id, role = %auth.user.role, "operator logged in");
            redirect(home_for(&Capabilities::for_user(&auth.user)))
        }
        Err(error) => render(LoginPage {
            error: Some(error.user_message()),
            email: form.email.clone(),
        }),
    }
}

/// `POST /logout`: revoke upstream best-effort, always purge locally.
pub async fn logout(session: SessionContext, state: web::Data<HttpState>) -> HttpResponse {
    if let Ok(Some(auth)) = session.auth() {
        if let Err(error) = state.auth.logout(&auth.tokens).await {
            warn!(%error, "upstream logout failed, purging session anyway");
        }
    }
    session.purge();
    redirect("/login")
}
