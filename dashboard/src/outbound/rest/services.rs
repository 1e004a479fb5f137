//! Service catalogue adapter.

use async_trait::async_trait;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE, to_body};
use crate::domain::ports::{GatewayResult, ServicesGateway};
use crate::domain::service::{Service, ServiceDraft, ServiceFilters};
use pagination::Page;

/// [`ServicesGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestServicesGateway {
    client: RestClient,
}

impl RestServicesGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn list_query(filters: &ServiceFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(category) = filters.category {
        query.push(("category", category.as_str().to_owned()));
    }
    if let Some(active) = filters.is_active {
        query.push(("isActive", active.to_string()));
    }
    if let Some(popular) = filters.is_popular {
        query.push(("isPopular", popular.to_string()));
    }
    if let Some(search) = &filters.search {
        query.push(("search", search.clone()));
    }
    query
}

#[async_trait]
impl ServicesGateway for RestServicesGateway {
    async fn list(&self, token: &str, filters: &ServiceFilters) -> GatewayResult<Page<Service>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/services", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Service> {
        self.client
            .get(Some(token), &format!("/services/{id}"), &[])
            .await?
            .into_data()
    }

    async fn create(&self, token: &str, draft: &ServiceDraft) -> GatewayResult<Service> {
        self.client
            .post(Some(token), "/services", Some(to_body(draft)?))
            .await?
            .into_data()
    }

    async fn update(&self, token: &str, id: &str, draft: &ServiceDraft) -> GatewayResult<Service> {
        self.client
            .put(Some(token), &format!("/services/{id}"), Some(to_body(draft)?))
            .await?
            .into_data()
    }

    async fn delete(&self, token: &str, id: &str) -> GatewayResult<()> {
        self.client
            .delete::<serde_json::Value>(Some(token), &format!("/services/{id}"))
            .await?
            .into_unit()
    }

    async fn toggle_active(&self, token: &str, id: &str) -> GatewayResult<Service> {
        self.client
            .patch(Some(token), &format!("/services/{id}/toggle-active"), None)
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::ServiceCategory;

    #[test]
    fn boolean_filters_render_as_lowercase_literals() {
        let filters = ServiceFilters {
            category: Some(ServiceCategory::BeardTrim),
            is_active: Some(true),
            is_popular: Some(false),
            search: Some("cukur".to_owned()),
            ..ServiceFilters::default()
        };
        let query = list_query(&filters);
        assert!(query.contains(&("category", "beard_trim".to_owned())));
        assert!(query.contains(&("isActive", "true".to_owned())));
        assert!(query.contains(&("isPopular", "false".to_owned())));
        assert!(query.contains(&("search", "cukur".to_owned())));
    }
}
