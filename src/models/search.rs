//! Request and response shapes for the CRM search endpoint.

use super::object::CrmObject;
use serde::{Deserialize, Serialize};

/// A single filter on one property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub value: String,
    pub property_name: String,
    pub operator: String,
}

impl Filter {
    /// Equality filter (`EQ`).
    pub fn eq(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            property_name: property.into(),
            operator: "EQ".to_string(),
        }
    }
}

/// Filters within a group are ANDed; groups are ORed by HubSpot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

/// Body of `POST /crm/v3/objects/{type}/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
}

impl SearchRequest {
    /// A single filter group matching every `(property, value)` pair.
    pub fn all_equal<I, K, V>(filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let filters = filters
            .into_iter()
            .map(|(property, value)| Filter::eq(property, value))
            .collect();

        Self {
            filter_groups: vec![FilterGroup { filters }],
            properties: Vec::new(),
        }
    }

    /// Properties to include on each returned record.
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: usize,

    #[serde(default)]
    pub results: Vec<CrmObject>,
}
