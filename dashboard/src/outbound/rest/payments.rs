//! Payment adapter: transaction listing and refunds.

use async_trait::async_trait;
use serde_json::json;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::domain::payment::{Payment, PaymentFilters};
use crate::domain::ports::{GatewayResult, PaymentsGateway};
use pagination::Page;

/// [`PaymentsGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestPaymentsGateway {
    client: RestClient,
}

impl RestPaymentsGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn list_query(filters: &PaymentFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(id) = &filters.booking_id {
        query.push(("bookingId", id.clone()));
    }
    if let Some(id) = &filters.customer_id {
        query.push(("customerId", id.clone()));
    }
    if let Some(status) = filters.status {
        query.push(("status", status.as_str().to_owned()));
    }
    if let Some(method) = filters.method {
        query.push(("method", method.as_str().to_owned()));
    }
    if let Some(date) = filters.start_date {
        query.push(("startDate", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(date) = filters.end_date {
        query.push(("endDate", date.format("%Y-%m-%d").to_string()));
    }
    query
}

#[async_trait]
impl PaymentsGateway for RestPaymentsGateway {
    async fn list(&self, token: &str, filters: &PaymentFilters) -> GatewayResult<Page<Payment>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/payments", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Payment> {
        self.client
            .get(Some(token), &format!("/payments/{id}"), &[])
            .await?
            .into_data()
    }

    async fn refund(&self, token: &str, id: &str, reason: &str) -> GatewayResult<Payment> {
        let body = json!({ "reason": reason });
        self.client
            .post(Some(token), &format!("/payments/{id}/refund"), Some(body))
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentMethod, PaymentStatus};

    #[test]
    fn status_and_method_serialize_as_snake_case() {
        let filters = PaymentFilters {
            status: Some(PaymentStatus::Refunded),
            method: Some(PaymentMethod::DigitalWallet),
            ..PaymentFilters::default()
        };
        let query = list_query(&filters);
        assert!(query.contains(&("status", "refunded".to_owned())));
        assert!(query.contains(&("method", "digital_wallet".to_owned())));
    }
}
