//! Customer adapter over the shared `/users` endpoint.
//!
//! The backend has no dedicated customer resource; this adapter pins
//! `role=customer` on every list request so other account types never
//! leak into the customer screens.

use async_trait::async_trait;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::domain::booking::Booking;
use crate::domain::customer::{Customer, CustomerFilters};
use crate::domain::ports::{CustomersGateway, GatewayResult};
use pagination::Page;

/// [`CustomersGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestCustomersGateway {
    client: RestClient,
}

impl RestCustomersGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn list_query(filters: &CustomerFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("role", "customer".to_owned()),
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(search) = &filters.search {
        query.push(("search", search.clone()));
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
impl CustomersGateway for RestCustomersGateway {
    async fn list(&self, token: &str, filters: &CustomerFilters) -> GatewayResult<Page<Customer>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/users", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Customer> {
        self.client
            .get(Some(token), &format!("/users/{id}"), &[])
            .await?
            .into_data()
    }

    async fn booking_history(
        &self,
        token: &str,
        id: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> GatewayResult<Page<Booking>> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let query = [
            ("customerId", id.to_owned()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        self.client
            .get(Some(token), "/bookings", &query)
            .await?
            .into_page(page, limit)
    }
}
