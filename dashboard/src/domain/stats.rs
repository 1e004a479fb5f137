//! Dashboard analytics: the server-computed stats tree and the date windows
//! the dashboard screen requests them for.
//!
//! Everything here is rendered as received; the gateway never recomputes
//! aggregates (the backend owns the numbers).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One point of the revenue-by-day series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Day the revenue was earned.
    pub date: NaiveDate,
    /// Revenue in rupiah.
    pub amount: i64,
}

/// Booking count for one status, for the status breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    /// Status wire value.
    pub status: String,
    /// Number of bookings in that status.
    pub count: u64,
}

/// Top-N entry for services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopService {
    /// Service id.
    pub id: String,
    /// Service name.
    pub name: String,
    /// Bookings in the window.
    pub bookings: u64,
    /// Revenue in the window.
    pub revenue: i64,
}

/// Top-N entry for stylists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopStylist {
    /// Stylist id.
    pub id: String,
    /// Stylist name.
    pub name: String,
    /// Bookings in the window.
    pub bookings: u64,
    /// Revenue in the window.
    pub revenue: i64,
    /// Average rating.
    pub rating: f64,
}

/// Recent booking row shown under the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking {
    /// Booking id.
    pub id: String,
    /// Customer display name.
    pub customer_name: String,
    /// Service name.
    pub service_name: String,
    /// Stylist display name.
    pub stylist_name: String,
    /// Appointment date.
    pub appointment_date: NaiveDate,
    /// Appointment time (`HH:MM`).
    pub appointment_time: String,
    /// Status wire value.
    pub status: String,
    /// Total amount in rupiah.
    pub total_amount: i64,
}

/// Aggregated dashboard statistics computed entirely server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Revenue in the window, rupiah.
    pub total_revenue: i64,
    /// Bookings in the window.
    pub total_bookings: u64,
    /// Distinct customers in the window.
    pub total_customers: u64,
    /// Average rating in the window.
    pub average_rating: f64,
    #[serde(default)]
    /// Revenue growth vs the previous window, percent.
    pub revenue_growth: f64,
    #[serde(default)]
    /// Booking growth vs the previous window, percent.
    pub bookings_growth: f64,
    #[serde(default)]
    /// Customer growth vs the previous window, percent.
    pub customers_growth: f64,
    #[serde(default)]
    /// Rating change vs the previous window.
    pub rating_change: f64,
    #[serde(default)]
    /// Revenue per day across the window.
    pub revenue_by_day: Vec<RevenuePoint>,
    #[serde(default)]
    /// Booking counts per status.
    pub bookings_by_status: Vec<StatusCount>,
    #[serde(default)]
    /// Best-performing services.
    pub top_services: Vec<TopService>,
    #[serde(default)]
    /// Best-performing stylists.
    pub top_stylists: Vec<TopStylist>,
    #[serde(default)]
    /// Latest bookings.
    pub recent_bookings: Vec<RecentBooking>,
}

/// Query filters for the stats endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilters {
    /// Window start (`YYYY-MM-DD`).
    pub date_from: Option<NaiveDate>,
    /// Window end (`YYYY-MM-DD`).
    pub date_to: Option<NaiveDate>,
    /// Restrict to one stylist.
    pub stylist_id: Option<String>,
}

/// Preset date ranges offered by the dashboard selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    /// Just today.
    Today,
    /// Sunday of this week through today.
    Week,
    /// First of this month through today.
    #[default]
    Month,
    /// First of January through today.
    Year,
}

impl DateRange {
    /// Parse the selector value, falling back to the default month range.
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("today") => Self::Today,
            Some("week") => Self::Week,
            Some("year") => Self::Year,
            _ => Self::Month,
        }
    }

    /// Selector wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Resolve the inclusive `[from, to]` window for the given day.
    ///
    /// The week starts on Sunday, matching the upstream dashboard's
    /// behaviour rather than ISO weeks.
    #[must_use]
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = match self {
            Self::Today => today,
            Self::Week => {
                let days_from_sunday = i64::from(today.weekday().num_days_from_sunday());
                today - Duration::days(days_from_sunday)
            }
            Self::Month => today.with_day(1).unwrap_or(today),
            Self::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        (from, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn month_window_runs_from_the_first_to_today() {
        let (from, to) = DateRange::Month.window(date(2025, 3, 18));
        assert_eq!(from, date(2025, 3, 1));
        assert_eq!(to, date(2025, 3, 18));
        assert_eq!(from.format("%Y-%m-%d").to_string(), "2025-03-01");
    }

    #[rstest]
    // 2025-03-18 is a Tuesday; the week started Sunday the 16th.
    #[case(DateRange::Week, date(2025, 3, 18), date(2025, 3, 16))]
    // A Sunday is its own week start.
    #[case(DateRange::Week, date(2025, 3, 16), date(2025, 3, 16))]
    #[case(DateRange::Today, date(2025, 3, 18), date(2025, 3, 18))]
    #[case(DateRange::Year, date(2025, 3, 18), date(2025, 1, 1))]
    fn windows_match_the_selector(
        #[case] range: DateRange,
        #[case] today: NaiveDate,
        #[case] expected_from: NaiveDate,
    ) {
        let (from, to) = range.window(today);
        assert_eq!(from, expected_from);
        assert_eq!(to, today);
    }

    #[rstest]
    #[case(None, DateRange::Month)]
    #[case(Some("today"), DateRange::Today)]
    #[case(Some("week"), DateRange::Week)]
    #[case(Some("year"), DateRange::Year)]
    #[case(Some("garbage"), DateRange::Month)]
    fn selector_parsing_defaults_to_month(#[case] raw: Option<&str>, #[case] expected: DateRange) {
        assert_eq!(DateRange::parse_or_default(raw), expected);
    }

    #[test]
    fn growth_fields_default_to_zero_when_absent() {
        let json = r#"{
            "totalRevenue": 1500000,
            "totalBookings": 42,
            "totalCustomers": 30,
            "averageRating": 4.6
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).expect("valid stats");
        assert_eq!(stats.revenue_growth, 0.0);
        assert!(stats.revenue_by_day.is_empty());
    }
}
