//! Brewing method models
//!
//! A Method is a timed pour recipe: brewing parameters plus an ordered
//! sequence of stages forming the brewing timeline.

use serde::{Deserialize, Serialize};

/// A brewing method (pour recipe)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Opaque identifier; regenerated on every import
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub params: MethodParams,
}

/// Brewing parameters, each a free-form unit-bearing display string
/// (e.g. `"15g"`, `"1:15"`, `"92°C"`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParams {
    #[serde(default)]
    pub coffee: String,
    #[serde(default)]
    pub water: String,
    #[serde(default)]
    pub ratio: String,
    #[serde(default)]
    pub grind_size: String,
    #[serde(default)]
    pub temp: String,
    #[serde(default)]
    pub video_url: String,
    /// The brewing timeline; order is significant and never re-sorted
    #[serde(default)]
    pub stages: Vec<Stage>,
}

/// One timed pour step within a method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// Cumulative elapsed seconds at the end of this stage
    #[serde(default)]
    pub time: u32,
    /// Seconds spent pouring during this stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pour_time: Option<u32>,
    /// Short stage name (e.g. 焖蒸)
    #[serde(default)]
    pub label: String,
    /// Water amount as a unit string (e.g. `"45g"`)
    #[serde(default)]
    pub water: String,
    /// Free-text instruction, may be empty
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub pour_type: PourType,
    #[serde(default)]
    pub valve_status: ValveStatus,
}

/// Pour styles
///
/// Any unrecognized input value, including the legacy synonym
/// `spiral`, normalizes to [`PourType::Circle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PourType {
    Center,
    #[default]
    Circle,
    Ice,
    Other,
}

impl PourType {
    /// Wire value used in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PourType::Center => "center",
            PourType::Circle => "circle",
            PourType::Ice => "ice",
            PourType::Other => "other",
        }
    }

    /// Localized label used in the readable text format
    pub fn text_label(&self) -> &'static str {
        match self {
            PourType::Center => "中心注水",
            PourType::Circle => "绕圈注水",
            PourType::Ice => "添加冰块",
            PourType::Other => "其他方式",
        }
    }

    /// Infer a pour style from a localized label by substring match
    pub fn from_text_label(label: &str) -> Self {
        if label.contains("中心") {
            PourType::Center
        } else if label.contains('冰') {
            PourType::Ice
        } else if label.contains("其他") {
            PourType::Other
        } else {
            PourType::Circle
        }
    }
}

impl From<&str> for PourType {
    fn from(value: &str) -> Self {
        match value {
            "center" => PourType::Center,
            "ice" => PourType::Ice,
            "other" => PourType::Other,
            // "circle", legacy "spiral" and anything unknown
            _ => PourType::Circle,
        }
    }
}

impl From<String> for PourType {
    fn from(value: String) -> Self {
        PourType::from(value.as_str())
    }
}

impl From<PourType> for String {
    fn from(value: PourType) -> Self {
        value.as_str().to_string()
    }
}

/// Flow valve position for switch-style drippers
///
/// Any value outside `open`/`closed` normalizes to the empty status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValveStatus {
    Open,
    Closed,
    #[default]
    None,
}

impl ValveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValveStatus::Open => "open",
            ValveStatus::Closed => "closed",
            ValveStatus::None => "",
        }
    }
}

impl From<&str> for ValveStatus {
    fn from(value: &str) -> Self {
        match value {
            "open" => ValveStatus::Open,
            "closed" => ValveStatus::Closed,
            _ => ValveStatus::None,
        }
    }
}

impl From<String> for ValveStatus {
    fn from(value: String) -> Self {
        ValveStatus::from(value.as_str())
    }
}

impl From<ValveStatus> for String {
    fn from(value: ValveStatus) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pour_type_normalization() {
        assert_eq!(PourType::from("center"), PourType::Center);
        assert_eq!(PourType::from("circle"), PourType::Circle);
        assert_eq!(PourType::from("spiral"), PourType::Circle);
        assert_eq!(PourType::from("banana"), PourType::Circle);
        assert_eq!(PourType::from(""), PourType::Circle);
    }

    #[test]
    fn test_valve_status_normalization() {
        assert_eq!(ValveStatus::from("open"), ValveStatus::Open);
        assert_eq!(ValveStatus::from("closed"), ValveStatus::Closed);
        assert_eq!(ValveStatus::from("ajar"), ValveStatus::None);
        assert_eq!(ValveStatus::from(""), ValveStatus::None);
    }

    #[test]
    fn test_pour_type_label_inference() {
        assert_eq!(PourType::from_text_label("中心注水"), PourType::Center);
        assert_eq!(PourType::from_text_label("添加冰块"), PourType::Ice);
        assert_eq!(PourType::from_text_label("其他方式"), PourType::Other);
        assert_eq!(PourType::from_text_label("绕圈注水"), PourType::Circle);
        assert_eq!(PourType::from_text_label("???"), PourType::Circle);
    }

    #[test]
    fn test_stage_deserialize_coerces_enums() {
        let stage: Stage = serde_json::from_str(
            r#"{"time":30,"label":"焖蒸","water":"45g","pourType":"spiral","valveStatus":"half"}"#,
        )
        .unwrap();
        assert_eq!(stage.pour_type, PourType::Circle);
        assert_eq!(stage.valve_status, ValveStatus::None);
        assert_eq!(stage.pour_time, None);
    }

    #[test]
    fn test_stage_serialize_wire_names() {
        let stage = Stage {
            time: 30,
            pour_time: Some(15),
            label: "焖蒸".to_string(),
            water: "45g".to_string(),
            detail: String::new(),
            pour_type: PourType::Circle,
            valve_status: ValveStatus::None,
        };
        let json = serde_json::to_value(&stage).unwrap();
        assert_eq!(json["pourType"], "circle");
        assert_eq!(json["pourTime"], 15);
        assert_eq!(json["valveStatus"], "");
    }
}
