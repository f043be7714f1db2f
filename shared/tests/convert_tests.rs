//! Conversion engine tests
//!
//! Covers the observable properties of the record conversion core:
//! - sanitize idempotence and JSON recovery
//! - shape-based disambiguation of JSON records
//! - method text round trips and stage-order preservation
//! - enum normalization for pour type and valve status

use proptest::prelude::*;

use shared::convert::{json_codec, method_text};
use shared::{
    clean_json_string, extract_record_from_text, ConvertError, ImportedRecord, Method,
    MethodParams, PourType, Stage, ValveStatus,
};

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_scenario_bean_text_import() {
    let input = "【咖啡豆】Ethiopia Yirgacheffe\n容量: 200g\n烘焙度: 浅度烘焙\n产地: 埃塞俄比亚\n";
    match extract_record_from_text(input) {
        Some(ImportedRecord::CoffeeBean(bean)) => {
            assert_eq!(bean.name, "Ethiopia Yirgacheffe");
            assert_eq!(bean.capacity.as_deref(), Some("200"));
            assert_eq!(bean.remaining.as_deref(), Some("200"));
            assert_eq!(bean.origin.as_deref(), Some("埃塞俄比亚"));
        }
        other => panic!("expected bean, got {other:?}"),
    }
}

#[test]
fn test_scenario_stage_line_inside_method_block() {
    let input = "【冲煮方案】测试\n1. [0分30秒] (注水15秒) [绕圈注水] 焖蒸 - 45g\n";
    match extract_record_from_text(input) {
        Some(ImportedRecord::Method(method)) => {
            let stage = &method.params.stages[0];
            assert_eq!(stage.time, 30);
            assert_eq!(stage.pour_time, Some(15));
            assert_eq!(stage.pour_type, PourType::Circle);
            assert_eq!(stage.label, "焖蒸");
            assert_eq!(stage.water, "45g");
        }
        other => panic!("expected method, got {other:?}"),
    }
}

#[test]
fn test_scenario_json_method_without_stages_fails_empty_stages() {
    let value: serde_json::Value =
        serde_json::from_str(r#"{"method": "一刀流", "params": {"coffee": "15g"}}"#).unwrap();
    assert!(matches!(
        json_codec::decode_method(&value),
        Err(ConvertError::EmptyStages)
    ));
    // And through the façade it degrades to "no record", not a panic
    assert!(extract_record_from_text(r#"{"method": "一刀流", "params": {"coffee": "15g"}}"#).is_none());
}

#[test]
fn test_disambiguation_stages_beat_roast_level() {
    let input = r#"{
        "method": "混合字段",
        "roastLevel": "深度烘焙",
        "params": {"stages": [{"time": 30, "label": "焖蒸", "water": "45g"}]}
    }"#;
    assert!(matches!(
        extract_record_from_text(input),
        Some(ImportedRecord::Method(_))
    ));
}

#[test]
fn test_disambiguation_ids_without_stages_is_note() {
    let input = r#"{"beanId": "b-1", "methodId": "m-1", "rating": 4}"#;
    assert!(matches!(
        extract_record_from_text(input),
        Some(ImportedRecord::BrewingNote(_))
    ));
}

#[test]
fn test_fenced_json_method_import() {
    let input = "```json\n{\"method\":\"一刀流\",\"params\":{\"stages\":[{\"time\":30,\"label\":\"焖蒸\",\"water\":\"45g\"}]}}\n```";
    assert!(matches!(
        extract_record_from_text(input),
        Some(ImportedRecord::Method(_))
    ));
}

#[test]
fn test_json_buried_in_prose_import() {
    let input = "这是为你优化的方案：\n{\"method\":\"改良一刀流\",\"params\":{\"stages\":[{\"time\":45,\"label\":\"注水\",\"water\":\"60g\"}]}}\n希望你喜欢！";
    match extract_record_from_text(input) {
        Some(ImportedRecord::Method(method)) => assert_eq!(method.name, "改良一刀流"),
        other => panic!("expected method, got {other:?}"),
    }
}

#[test]
fn test_unrecognized_input_is_none() {
    assert!(extract_record_from_text("完全无关的文字").is_none());
    assert!(extract_record_from_text("").is_none());
}

#[test]
fn test_sanitize_brace_recovery() {
    assert_eq!(
        clean_json_string("garbage prefix {\"a\":1} garbage suffix"),
        r#"{"a":1}"#
    );
}

#[test]
fn test_sanitize_fence_stripping() {
    assert_eq!(clean_json_string("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
}

// ============================================================================
// Properties
// ============================================================================

fn stage_strategy() -> impl Strategy<Value = Stage> {
    (
        0u32..600,
        1u32..=20,
        "[a-z]{1,8}",
        "[1-9][0-9]{0,2}",
        prop_oneof![
            Just(PourType::Center),
            Just(PourType::Circle),
            Just(PourType::Ice),
            Just(PourType::Other),
        ],
    )
        .prop_map(|(time, pour_time, label, water, pour_type)| Stage {
            time,
            pour_time: Some(pour_time),
            label,
            water: format!("{}g", water),
            detail: String::new(),
            pour_type,
            valve_status: ValveStatus::None,
        })
}

fn method_strategy() -> impl Strategy<Value = Method> {
    (
        "[a-z]{1,12}",
        prop::collection::vec(stage_strategy(), 1..8),
    )
        .prop_map(|(name, stages)| Method {
            id: "method-1700000000000-abc123".to_string(),
            name,
            params: MethodParams {
                coffee: "15g".to_string(),
                water: "225g".to_string(),
                ratio: "1:15".to_string(),
                grind_size: "中细".to_string(),
                temp: "92°C".to_string(),
                video_url: String::new(),
                stages,
            },
        })
}

proptest! {
    /// Property: sanitize is idempotent for any input
    #[test]
    fn prop_sanitize_idempotent(input in "\\PC*") {
        let once = clean_json_string(&input);
        prop_assert_eq!(clean_json_string(&once), once);
    }

    /// Property: any pour type input normalizes into the closed set,
    /// and anything unknown (including legacy "spiral") is circle
    #[test]
    fn prop_pour_type_normalizes(input in "\\PC*") {
        let normalized = PourType::from(input.as_str());
        prop_assert!(matches!(
            normalized,
            PourType::Center | PourType::Circle | PourType::Ice | PourType::Other
        ));
        if !["center", "ice", "other"].contains(&input.as_str()) {
            prop_assert_eq!(normalized, PourType::Circle);
        }
    }

    /// Property: any valve status outside open/closed is the empty status
    #[test]
    fn prop_valve_status_normalizes(input in "\\PC*") {
        let normalized = ValveStatus::from(input.as_str());
        if !["open", "closed"].contains(&input.as_str()) {
            prop_assert_eq!(normalized, ValveStatus::None);
        }
    }

    /// Property: text round trip preserves params and the ordered
    /// stage sequence field for field
    #[test]
    fn prop_method_text_round_trip(method in method_strategy()) {
        let decoded = method_text::decode(&method_text::encode(&method)).unwrap();
        prop_assert_eq!(&decoded.name, &method.name);
        prop_assert_eq!(&decoded.params.coffee, &method.params.coffee);
        prop_assert_eq!(&decoded.params.water, &method.params.water);
        prop_assert_eq!(&decoded.params.ratio, &method.params.ratio);
        prop_assert_eq!(&decoded.params.grind_size, &method.params.grind_size);
        prop_assert_eq!(&decoded.params.temp, &method.params.temp);
        prop_assert_eq!(&decoded.params.stages, &method.params.stages);
    }

    /// Property: decoding N written stages yields N stages in the same
    /// relative order
    #[test]
    fn prop_stage_order_preserved(method in method_strategy()) {
        let decoded = method_text::decode(&method_text::encode(&method)).unwrap();
        prop_assert_eq!(decoded.params.stages.len(), method.params.stages.len());
        let written: Vec<&str> = method.params.stages.iter().map(|s| s.label.as_str()).collect();
        let read: Vec<&str> = decoded.params.stages.iter().map(|s| s.label.as_str()).collect();
        prop_assert_eq!(written, read);
    }
}
