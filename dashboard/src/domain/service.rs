//! Service catalogue records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalogue category for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Standard haircut.
    Haircut,
    /// Beard shaping and trims.
    BeardTrim,
    /// Wash only.
    HairWash,
    /// Styling without a cut.
    Styling,
    /// Colouring treatments.
    Coloring,
    /// Scalp and hair treatments.
    Treatment,
    /// Bundled package of services.
    Package,
}

impl ServiceCategory {
    /// All categories, in catalogue order, for form selects.
    pub const ALL: [Self; 7] = [
        Self::Haircut,
        Self::BeardTrim,
        Self::HairWash,
        Self::Styling,
        Self::Coloring,
        Self::Treatment,
        Self::Package,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Haircut => "haircut",
            Self::BeardTrim => "beard_trim",
            Self::HairWash => "hair_wash",
            Self::Styling => "styling",
            Self::Coloring => "coloring",
            Self::Treatment => "treatment",
            Self::Package => "package",
        }
    }
}

/// Catalogue entry mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    /// Customer-facing description.
    pub description: String,
    /// Catalogue category.
    pub category: ServiceCategory,
    /// Price in rupiah.
    pub price: i64,
    /// Duration in minutes.
    pub duration: u32,
    /// Whether the service is bookable.
    pub is_active: bool,
    #[serde(default)]
    /// Featured on the customer app.
    pub is_popular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Image URL.
    pub image: Option<String>,
    #[serde(default)]
    /// Free-form tags.
    pub tags: Vec<String>,
    #[serde(default)]
    /// Preparation requirements shown to customers.
    pub requirements: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query filters for the service list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilters {
    /// Requested page.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Restrict to one category.
    pub category: Option<ServiceCategory>,
    /// Restrict by active flag.
    pub is_active: Option<bool>,
    /// Restrict by popular flag.
    pub is_popular: Option<bool>,
    /// Free-text search.
    pub search: Option<String>,
}

/// Create/update payload for a catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    /// Display name.
    pub name: String,
    /// Customer-facing description.
    pub description: String,
    /// Catalogue category.
    pub category: ServiceCategory,
    /// Price in rupiah.
    pub price: i64,
    /// Duration in minutes.
    pub duration: u32,
    /// Whether the service is bookable.
    pub is_active: bool,
    /// Featured on the customer app.
    pub is_popular: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Image URL.
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    /// Free-form tags.
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    /// Preparation requirements.
    pub requirements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_round_trip_snake_case() {
        for category in ServiceCategory::ALL {
            let json = serde_json::to_value(category).expect("serialisable");
            assert_eq!(json, category.as_str());
            let parsed: ServiceCategory = serde_json::from_value(json).expect("deserialisable");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let json = r#"{
            "id": "s1",
            "name": "Classic Cut",
            "category": "haircut",
            "price": 50000,
            "duration": 30,
            "isActive": true,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let service: Service = serde_json::from_str(json).expect("valid service");
        assert!(service.tags.is_empty());
        assert!(service.requirements.is_empty());
        assert!(!service.is_popular);
    }
}
