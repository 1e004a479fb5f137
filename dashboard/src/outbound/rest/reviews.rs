//! Review moderation adapter.
//!
//! Reviews are nested under bookings upstream, so every path starts with
//! `/bookings/reviews`.

use async_trait::async_trait;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::domain::ports::{GatewayResult, ReviewsGateway};
use crate::domain::review::{Review, ReviewFilters};
use pagination::Page;

/// [`ReviewsGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestReviewsGateway {
    client: RestClient,
}

impl RestReviewsGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn list_query(filters: &ReviewFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(id) = &filters.stylist_id {
        query.push(("stylistId", id.clone()));
    }
    if let Some(rating) = filters.rating {
        query.push(("rating", rating.stars().to_string()));
    }
    if let Some(visible) = filters.is_visible {
        query.push(("isVisible", visible.to_string()));
    }
    query
}

#[async_trait]
impl ReviewsGateway for RestReviewsGateway {
    async fn list(&self, token: &str, filters: &ReviewFilters) -> GatewayResult<Page<Review>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/bookings/reviews", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Review> {
        self.client
            .get(Some(token), &format!("/bookings/reviews/{id}"), &[])
            .await?
            .into_data()
    }

    async fn toggle_visibility(&self, token: &str, id: &str) -> GatewayResult<Review> {
        self.client
            .patch(
                Some(token),
                &format!("/bookings/reviews/{id}/toggle-visibility"),
                None,
            )
            .await?
            .into_data()
    }

    async fn delete(&self, token: &str, id: &str) -> GatewayResult<()> {
        self.client
            .delete::<serde_json::Value>(Some(token), &format!("/bookings/reviews/{id}"))
            .await?
            .into_unit()
    }
}
