//! Stylist adapter: profiles, availability, and schedules.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::client::RestClient;
use super::{DEFAULT_LIMIT, DEFAULT_PAGE, to_body};
use crate::domain::ports::{GatewayResult, StylistsGateway};
use crate::domain::stylist::{ScheduleEntry, Stylist, StylistDraft, StylistFilters};
use pagination::Page;

/// [`StylistsGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestStylistsGateway {
    client: RestClient,
}

impl RestStylistsGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn list_query(filters: &StylistFilters) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", filters.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ("limit", filters.limit.unwrap_or(DEFAULT_LIMIT).to_string()),
    ];
    if let Some(available) = filters.is_available {
        query.push(("isAvailable", available.to_string()));
    }
    if let Some(specialty) = &filters.specialty {
        query.push(("specialty", specialty.clone()));
    }
    if let Some(search) = &filters.search {
        query.push(("search", search.clone()));
    }
    query
}

#[async_trait]
impl StylistsGateway for RestStylistsGateway {
    async fn list(&self, token: &str, filters: &StylistFilters) -> GatewayResult<Page<Stylist>> {
        let page = filters.page.unwrap_or(DEFAULT_PAGE);
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT);
        self.client
            .get(Some(token), "/stylists", &list_query(filters))
            .await?
            .into_page(page, limit)
    }

    async fn get(&self, token: &str, id: &str) -> GatewayResult<Stylist> {
        self.client
            .get(Some(token), &format!("/stylists/{id}"), &[])
            .await?
            .into_data()
    }

    async fn create(&self, token: &str, draft: &StylistDraft) -> GatewayResult<Stylist> {
        self.client
            .post(Some(token), "/stylists", Some(to_body(draft)?))
            .await?
            .into_data()
    }

    async fn update(&self, token: &str, id: &str, draft: &StylistDraft) -> GatewayResult<Stylist> {
        self.client
            .put(Some(token), &format!("/stylists/{id}"), Some(to_body(draft)?))
            .await?
            .into_data()
    }

    async fn toggle_availability(&self, token: &str, id: &str) -> GatewayResult<Stylist> {
        self.client
            .patch(
                Some(token),
                &format!("/stylists/{id}/toggle-availability"),
                None,
            )
            .await?
            .into_data()
    }

    async fn schedule(
        &self,
        token: &str,
        id: &str,
        date: NaiveDate,
    ) -> GatewayResult<Vec<ScheduleEntry>> {
        let query = [("date", date.format("%Y-%m-%d").to_string())];
        self.client
            .get(Some(token), &format!("/stylists/{id}/schedules"), &query)
            .await?
            .into_data()
    }

    async fn add_schedule(
        &self,
        token: &str,
        id: &str,
        day: &str,
        entry: &ScheduleEntry,
    ) -> GatewayResult<Stylist> {
        let mut body = to_body(entry)?;
        if let Some(map) = body.as_object_mut() {
            map.insert("day".to_owned(), serde_json::Value::String(day.to_owned()));
        }
        self.client
            .post(Some(token), &format!("/stylists/{id}/schedules"), Some(body))
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_filter_uses_camel_case_key() {
        let filters = StylistFilters {
            is_available: Some(true),
            ..StylistFilters::default()
        };
        let query = list_query(&filters);
        assert!(query.contains(&("isAvailable", "true".to_owned())));
    }
}
