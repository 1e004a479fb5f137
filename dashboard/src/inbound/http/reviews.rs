//! Review moderation: list, visibility toggle, delete.

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{ConfirmForm, ConfirmPage, Nav, PageNav, fail_page, redirect, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::permissions::{Action, Capabilities, Resource};
use crate::domain::review::{Rating, Review, ReviewFilters};
use crate::view::format::{relative_time, truncate};
use crate::view::render;

/// Filter form on the moderation screen.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    page: Option<u32>,
    rating: Option<Rating>,
    is_visible: Option<bool>,
}

impl ReviewListQuery {
    fn filters(&self) -> ReviewFilters {
        ReviewFilters {
            page: self.page,
            rating: self.rating,
            is_visible: self.is_visible,
            ..ReviewFilters::default()
        }
    }

    fn href_template(&self) -> String {
        let mut href = String::from("/reviews?page={page}");
        if let Some(rating) = self.rating {
            href.push_str(&format!("&rating={}", rating.stars()));
        }
        if let Some(visible) = self.is_visible {
            href.push_str(&format!("&is_visible={visible}"));
        }
        href
    }
}

struct ReviewRow {
    id: String,
    stars: String,
    comment: String,
    author: String,
    age: String,
    is_visible: bool,
}

fn review_row(review: &Review, now: chrono::DateTime<chrono::Utc>) -> ReviewRow {
    let stars = review.rating.stars();
    ReviewRow {
        id: review.id.clone(),
        stars: format!("{}{}", "★".repeat(stars as usize), "☆".repeat(5 - stars as usize)),
        comment: truncate(review.comment.as_deref().unwrap_or(""), 120),
        author: if review.is_anonymous {
            "Anonim".to_owned()
        } else {
            review.customer_id.clone()
        },
        age: relative_time(now, review.created_at),
        is_visible: review.is_visible,
    }
}

/// The moderation screen.
#[derive(Template)]
#[template(path = "reviews/list.html")]
struct ReviewListPage {
    nav: Nav,
    rows: Vec<ReviewRow>,
    page_nav: PageNav,
    can_moderate: bool,
    can_delete: bool,
}

/// `GET /reviews`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<ReviewListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Reviews, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .reviews
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let now = chrono::Utc::now();
            let caps = Capabilities::for_user(&auth.user);
            render(ReviewListPage {
                nav: Nav::for_auth(&auth),
                rows: page
                    .items
                    .iter()
                    .map(|review| review_row(review, now))
                    .collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
                can_moderate: caps.can(Resource::Reviews, Action::Update),
                can_delete: caps.can(Resource::Reviews, Action::Delete),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/reviews"),
    }
}

/// `POST /reviews/{id}/toggle-visibility`.
pub async fn toggle_visibility(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Reviews, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Ubah visibilitas ulasan ini?".to_owned(),
            message: "Ulasan yang disembunyikan tidak tampil di aplikasi pelanggan.".to_owned(),
            action_href: format!("/reviews/{id}/toggle-visibility"),
            cancel_href: "/reviews".to_owned(),
            ask_reason: false,
        });
    }
    match state
        .reviews
        .toggle_visibility(&auth.tokens.token, &id)
        .await
    {
        Ok(_) => redirect("/reviews"),
        Err(error) => fail_page(&session, &auth, &error, "/reviews"),
    }
}

/// `POST /reviews/{id}/delete`.
pub async fn delete(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Reviews, Action::Delete) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Hapus ulasan ini?".to_owned(),
            message: "Ulasan yang dihapus tidak dapat dikembalikan.".to_owned(),
            action_href: format!("/reviews/{id}/delete"),
            cancel_href: "/reviews".to_owned(),
            ask_reason: false,
        });
    }
    match state.reviews.delete(&auth.tokens.token, &id).await {
        Ok(()) => redirect("/reviews"),
        Err(error) => fail_page(&session, &auth, &error, "/reviews"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_reviews_hide_the_author() {
        let review = Review {
            id: "r-1".to_owned(),
            booking_id: "b-1".to_owned(),
            customer_id: "c-1".to_owned(),
            stylist_id: "s-1".to_owned(),
            rating: Rating::new(4).expect("valid"),
            comment: Some("Potongannya rapi".to_owned()),
            is_anonymous: true,
            is_visible: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let row = review_row(&review, chrono::Utc::now());
        assert_eq!(row.author, "Anonim");
        assert_eq!(row.stars, "★★★★☆");
    }
}
