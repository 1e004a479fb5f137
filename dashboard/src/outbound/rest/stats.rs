//! Dashboard statistics adapter.

use async_trait::async_trait;

use super::client::RestClient;
use crate::domain::ports::{GatewayResult, StatsGateway};
use crate::domain::stats::{DashboardStats, StatsFilters};

/// [`StatsGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestStatsGateway {
    client: RestClient,
}

impl RestStatsGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

fn stats_query(filters: &StatsFilters) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(date) = filters.date_from {
        query.push(("dateFrom", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(date) = filters.date_to {
        query.push(("dateTo", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(id) = &filters.stylist_id {
        query.push(("stylistId", id.clone()));
    }
    query
}

#[async_trait]
impl StatsGateway for RestStatsGateway {
    async fn stats(&self, token: &str, filters: &StatsFilters) -> GatewayResult<DashboardStats> {
        self.client
            .get(Some(token), "/dashboard/stats", &stats_query(filters))
            .await?
            .into_data()
    }
}
