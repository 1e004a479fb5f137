//! Booking adapter: listing, lifecycle transitions, and edits.

use async_trait::async_trait;
use serde_json::json;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE, to_body};
use crate::domain::booking::{Booking, BookingDraft, BookingFilters, BookingUpdate};
use crate::domain::ports::{BookingsGateway, GatewayResult};
use pagination::Page;

/// [`BookingsGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestBookingsGateway {
    client: RestClient,
}

impl RestBookingsGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

/// Build the `/bookings` query string, skipping unset filters.
fn list_query(filters: &BookingFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(id) = &filters.customer_id {
        query.push(("customerId", id.clone()));
    }
    if let Some(id) = &filters.stylist_id {
        query.push(("stylistId", id.clone()));
    }
    if let Some(id) = &filters.service_id {
        query.push(("serviceId", id.clone()));
    }
    if let Some(status) = filters.status {
        query.push(("status", status.as_str().to_owned()));
    }
    if let Some(date) = filters.start_date {
        query.push(("startDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(date) = filters.end_date {
        query.push(("endDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(field) = &filters.sort_by {
        query.push(("sortBy", field.clone()));
    }
    if let Some(order) = filters.sort_order {
        query.push(("sortOrder", order.as_str().to_owned()));
    }
    query
}

#[async_trait]
impl BookingsGateway for RestBookingsGateway {
    async fn list(&self, token: &str, filters: &BookingFilters) -> GatewayResult<Page<Booking>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/bookings", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Booking> {
        self.client
            .get(Some(token), &format!("/bookings/{id}"), &[])
            .await?
            .into_data()
    }

    async fn create(&self, token: &str, draft: &BookingDraft) -> GatewayResult<Booking> {
        self.client
            .post(Some(token), "/bookings", Some(to_body(draft)?))
            .await?
            .into_data()
    }

    async fn update(
        &self,
        token: &str,
        id: &str,
        update: &BookingUpdate,
    ) -> GatewayResult<Booking> {
        self.client
            .put(Some(token), &format!("/bookings/{id}"), Some(to_body(update)?))
            .await?
            .into_data()
    }

    async fn confirm(&self, token: &str, id: &str) -> GatewayResult<Booking> {
        self.client
            .put(Some(token), &format!("/bookings/{id}/confirm"), None)
            .await?
            .into_data()
    }

    async fn cancel(&self, token: &str, id: &str, reason: &str) -> GatewayResult<Booking> {
        let body = json!({ "reason": reason });
        self.client
            .put(Some(token), &format!("/bookings/{id}/cancel"), Some(body))
            .await?
            .into_data()
    }

    async fn complete(&self, token: &str, id: &str) -> GatewayResult<Booking> {
        self.client
            .put(Some(token), &format!("/bookings/{id}/complete"), None)
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingStatus, SortOrder};
    use chrono::NaiveDate;

    #[test]
    fn default_list_query_carries_only_paging() {
        let query = list_query(&BookingFilters::default());
        assert_eq!(
            query,
            vec![
                ("page", "1".to_owned()),
                ("limit", "10".to_owned()),
            ]
        );
    }

    #[test]
    fn set_filters_appear_with_camel_case_keys() {
        let filters = BookingFilters {
            page: Some(3),
            limit: Some(25),
            stylist_id: Some("sty-1".to_owned()),
            status: Some(BookingStatus::InProgress),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            sort_by: Some("appointmentDate".to_owned()),
            sort_order: Some(SortOrder::Desc),
            ..BookingFilters::default()
        };
        let query = list_query(&filters);
        assert!(query.contains(&("page", "3".to_owned())));
        assert!(query.contains(&("limit", "25".to_owned())));
        assert!(query.contains(&("stylistId", "sty-1".to_owned())));
        assert!(query.contains(&("status", "in_progress".to_owned())));
        assert!(query.contains(&("startDate", "2025-03-01".to_owned())));
        assert!(query.contains(&("endDate", "2025-03-31".to_owned())));
        assert!(query.contains(&("sortBy", "appointmentDate".to_owned())));
        assert!(query.contains(&("sortOrder", "desc".to_owned())));
        assert!(!query.iter().any(|(key, _)| *key == "customerId"));
    }
}
