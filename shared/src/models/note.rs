//! Brewing note models
//!
//! A BrewingNote logs one brew event: the equipment and method used,
//! the parameters, and 0–5 tasting scores.

use serde::{Deserialize, Serialize};

/// A logged brew event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewingNote {
    #[serde(default)]
    pub id: String,
    /// Stored-bean reference; after a text round trip this survives
    /// only as the free-text bean name (known lossy export)
    #[serde(default)]
    pub bean_id: String,
    #[serde(default)]
    pub method_name: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub params: NoteParams,
    #[serde(default)]
    pub taste: TasteRatings,
    /// Overall rating, 0–5
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
    /// Unix milliseconds
    #[serde(default)]
    pub timestamp: i64,
}

/// Recipe parameters as recorded for one brew
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteParams {
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
}

/// Tasting scores, each an integer 0–5
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TasteRatings {
    #[serde(default)]
    pub acidity: u8,
    #[serde(default)]
    pub sweetness: u8,
    #[serde(default)]
    pub bitterness: u8,
    #[serde(default)]
    pub body: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_wire_names() {
        let note = BrewingNote {
            id: "note-1".to_string(),
            bean_id: "bean-1".to_string(),
            method_name: "一刀流".to_string(),
            rating: 4,
            ..Default::default()
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["beanId"], "bean-1");
        assert_eq!(json["methodName"], "一刀流");
        assert_eq!(json["taste"]["acidity"], 0);
    }

    #[test]
    fn test_taste_defaults_to_zero() {
        let taste: TasteRatings = serde_json::from_str(r#"{"acidity":3}"#).unwrap();
        assert_eq!(taste.acidity, 3);
        assert_eq!(taste.sweetness, 0);
        assert_eq!(taste.body, 0);
    }
}
