//! Route table for the admin screens and the JSON surface.

use actix_web::web;

use super::{auth, bookings, customers, dashboard, payments, pages, reviews, services, stylists};

/// Register every screen and JSON endpoint. Health probes and middleware
/// are wired by the server bootstrap, not here.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(auth::index))
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login_submit))
        .route("/logout", web::post().to(auth::logout))
        .route("/dashboard", web::get().to(dashboard::page))
        .route("/api/v1/dashboard/stats", web::get().to(dashboard::stats_json))
        .route("/bookings", web::get().to(bookings::list))
        .route("/bookings", web::post().to(bookings::create))
        .route("/bookings/new", web::get().to(bookings::new_form))
        .route("/bookings/{id}", web::get().to(bookings::detail))
        .route("/bookings/{id}/confirm", web::post().to(bookings::confirm))
        .route("/bookings/{id}/cancel", web::post().to(bookings::cancel))
        .route("/bookings/{id}/complete", web::post().to(bookings::complete))
        .route("/services", web::get().to(services::list))
        .route("/services", web::post().to(services::create))
        .route("/services/new", web::get().to(services::new_form))
        .route("/services/{id}", web::post().to(services::update))
        .route("/services/{id}/edit", web::get().to(services::edit_form))
        .route(
            "/services/{id}/toggle-active",
            web::post().to(services::toggle_active),
        )
        .route("/services/{id}/delete", web::post().to(services::delete))
        .route("/stylists", web::get().to(stylists::list))
        .route("/stylists", web::post().to(stylists::create))
        .route("/stylists/new", web::get().to(stylists::new_form))
        .route("/stylists/{id}", web::get().to(stylists::detail))
        .route("/stylists/{id}", web::post().to(stylists::update))
        .route("/stylists/{id}/edit", web::get().to(stylists::edit_form))
        .route(
            "/stylists/{id}/toggle-availability",
            web::post().to(stylists::toggle_availability),
        )
        .route(
            "/stylists/{id}/schedules",
            web::post().to(stylists::add_schedule),
        )
        .route("/payments", web::get().to(payments::list))
        .route("/payments/{id}/refund", web::post().to(payments::refund))
        .route("/customers", web::get().to(customers::list))
        .route("/customers/{id}", web::get().to(customers::detail))
        .route("/reviews", web::get().to(reviews::list))
        .route(
            "/reviews/{id}/toggle-visibility",
            web::post().to(reviews::toggle_visibility),
        )
        .route("/reviews/{id}/delete", web::post().to(reviews::delete))
        // The customer app used to link the old appointments path.
        .route(
            "/appointments",
            web::get().to(|| async { pages::redirect("/bookings") }),
        );
}
