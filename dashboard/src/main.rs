//! Gateway entry-point: wires the admin screens, JSON endpoints, and health
//! probes against the remote REST backend.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use dashboard::ApiDoc;
use dashboard::inbound::http::health::{HealthState, live, ready};
use dashboard::inbound::http::{HttpState, routes};
use dashboard::middleware::Trace;
use dashboard::server::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let key = load_session_key(&settings)?;
    let cookie_secure = settings.cookie_secure;

    let base_url = settings
        .api_base_url()
        .map_err(|e| std::io::Error::other(format!("invalid api_base_url: {e}")))?;
    let state = HttpState::for_backend(base_url, settings.request_timeout())
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(state);

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app
            .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app.service(web::scope("").wrap(session).configure(routes::configure))
    })
    .bind(settings.bind_address())?;

    health_state.mark_ready();
    server.run().await
}

/// Read the cookie signing key, falling back to an ephemeral one in dev.
fn load_session_key(settings: &ServerSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}
