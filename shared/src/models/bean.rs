//! Coffee bean profile models

use serde::{Deserialize, Serialize};

/// Sentinel roast level applied when a profile arrives without one
pub const DEFAULT_ROAST_LEVEL: &str = "浅度烘焙";

/// A coffee bean profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeBean {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roast_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roast_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub bean_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Weight in grams as a numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    /// Defaults to `capacity` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<String>,
    /// Flavor tags, order preserved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flavor: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Components of a multi-origin blend, in blend order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_components: Option<Vec<BlendComponent>>,
}

/// One component of a multi-origin blend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlendComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Integer 0–100, stored as a string
    #[serde(default)]
    pub percentage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
}
