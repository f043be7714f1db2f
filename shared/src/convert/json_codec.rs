//! JSON record codec
//!
//! Decodes sanitized JSON into one of the three record kinds by trying
//! each kind's decoder in a fixed priority order, each guarded by its
//! own required-shape predicate. The denormalized "AI-generated"
//! method variant is folded into the canonical shape by a single
//! normalization pass before the standard method decoder runs.

use serde_json::{json, Value};
use tracing::debug;

use super::ImportedRecord;
use crate::error::{ConvertError, ConvertResult};
use crate::models::{
    new_record_id, BlendComponent, BrewingNote, CoffeeBean, Method, MethodParams, NoteParams,
    PourType, Stage, TasteRatings, ValveStatus, DEFAULT_ROAST_LEVEL,
};

/// Decode a parsed JSON object into whichever record kind its shape
/// matches, in priority order:
///
/// 1. non-empty `params.stages` → Method
/// 2. `roastLevel` or legacy `processingMethod` → CoffeeBean
/// 3. `beanId` and `methodId` both present → BrewingNote
/// 4. `method`/`coffeeBeanInfo` with a stages array anywhere → the
///    AI-generated method variant, normalized then decoded as Method
/// 5. lenient method reconstruction, then bean-by-name, else rejected
pub fn decode_json_record(value: &Value) -> ConvertResult<ImportedRecord> {
    if value
        .pointer("/params/stages")
        .and_then(Value::as_array)
        .is_some_and(|stages| !stages.is_empty())
    {
        return decode_method(value).map(ImportedRecord::Method);
    }

    if value.get("roastLevel").is_some() || value.get("processingMethod").is_some() {
        return decode_bean(value).map(ImportedRecord::CoffeeBean);
    }

    if value.get("beanId").is_some() && value.get("methodId").is_some() {
        return decode_note(value).map(ImportedRecord::BrewingNote);
    }

    let has_stages_array = value.pointer("/params/stages").is_some_and(Value::is_array)
        || value.get("stages").is_some_and(Value::is_array);
    if (value.get("method").is_some() || value.get("coffeeBeanInfo").is_some()) && has_stages_array
    {
        return decode_method(value).map(ImportedRecord::Method);
    }

    // Lenient fallback: method reconstruction first, then a bare bean
    match decode_method(value) {
        Ok(method) => Ok(ImportedRecord::Method(method)),
        // An explicit `method` field means the sender meant a method;
        // surface its real failure instead of guessing further
        Err(e) if value.get("method").is_some() => Err(e),
        Err(e) => {
            debug!(error = %e, "lenient method reconstruction failed");
            if value.get("name").is_some_and(Value::is_string) {
                decode_bean(value).map(ImportedRecord::CoffeeBean)
            } else {
                Err(ConvertError::Unrecognized)
            }
        }
    }
}

// ============================================================================
// Method
// ============================================================================

/// Decode a JSON method, tolerating the AI-generated variant and
/// partially specified params. A fresh identifier is always generated
/// so an import can never collide with stored records.
pub fn decode_method(value: &Value) -> ConvertResult<Method> {
    if !value.is_object() {
        return Err(ConvertError::Unrecognized);
    }
    let value = normalize_ai_method(value);

    let name = resolve_method_name(&value)?;

    let params = value.get("params");
    let param = |key: &str, default: &str| -> String {
        params
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let stages: Vec<Stage> = value
        .pointer("/params/stages")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(decode_stage).collect())
        .unwrap_or_default();
    if stages.is_empty() {
        return Err(ConvertError::EmptyStages);
    }

    Ok(Method {
        id: new_record_id("method"),
        name,
        params: MethodParams {
            coffee: param("coffee", "15g"),
            water: param("water", "225g"),
            ratio: param("ratio", "1:15"),
            grind_size: param("grindSize", "中细"),
            temp: param("temp", "92°C"),
            video_url: param("videoUrl", ""),
            stages,
        },
    })
}

/// Recipe name resolution: explicit `method`, canonical `name`, nested
/// `coffeeBeanInfo.method`, or a name synthesized from `equipment`.
fn resolve_method_name(value: &Value) -> ConvertResult<String> {
    if let Some(name) = non_empty_str(value.get("method")) {
        return Ok(name);
    }
    if let Some(name) = non_empty_str(value.get("name")) {
        return Ok(name);
    }
    if let Some(name) = non_empty_str(value.pointer("/coffeeBeanInfo/method")) {
        return Ok(name);
    }
    if let Some(equipment) = non_empty_str(value.get("equipment")) {
        return Ok(format!("{}优化方案", equipment));
    }
    Err(ConvertError::MissingField("method"))
}

/// Fold the denormalized AI-generated variant (recipe fields at the
/// top level) into the canonical `params` nesting. Canonical documents
/// pass through unchanged.
fn normalize_ai_method(value: &Value) -> Value {
    let mut root = value.clone();
    let mut params = root.get("params").cloned().unwrap_or_else(|| json!({}));
    if let Some(obj) = params.as_object_mut() {
        for key in ["coffee", "water", "ratio", "grindSize", "temp", "videoUrl", "stages"] {
            if !obj.contains_key(key) {
                if let Some(promoted) = value.get(key) {
                    obj.insert(key.to_string(), promoted.clone());
                }
            }
        }
    }
    if let Some(obj) = root.as_object_mut() {
        obj.insert("params".to_string(), params);
    }
    root
}

/// Normalize one stage entry independently; non-object entries are
/// dropped rather than failing the whole method.
fn decode_stage(value: &Value) -> Option<Stage> {
    value.as_object()?;
    Some(Stage {
        time: num_field(value, "time").unwrap_or(0),
        pour_time: num_field(value, "pourTime"),
        label: str_field(value, "label").unwrap_or_default(),
        water: str_field(value, "water").unwrap_or_default(),
        detail: str_field(value, "detail").unwrap_or_default(),
        pour_type: PourType::from(str_field(value, "pourType").unwrap_or_default()),
        valve_status: ValveStatus::from(str_field(value, "valveStatus").unwrap_or_default()),
    })
}

/// Minimal sharing-oriented encoding: name plus params with stages,
/// deliberately omitting the identifier.
pub fn method_to_json(method: &Method) -> String {
    let payload = json!({
        "method": method.name,
        "params": {
            "coffee": method.params.coffee,
            "water": method.params.water,
            "ratio": method.params.ratio,
            "grindSize": method.params.grind_size,
            "temp": method.params.temp,
            "stages": method.params.stages,
        }
    });
    serde_json::to_string(&payload).unwrap_or_default()
}

// ============================================================================
// Bean
// ============================================================================

fn decode_bean(value: &Value) -> ConvertResult<CoffeeBean> {
    let name = non_empty_str(value.get("name")).ok_or(ConvertError::MissingField("name"))?;

    let capacity = str_field(value, "capacity");
    let remaining = str_field(value, "remaining").or_else(|| capacity.clone());

    let flavor = value
        .get("flavor")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let blend_components = value
        .get("blendComponents")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(decode_blend_component).collect())
        .filter(|components: &Vec<BlendComponent>| !components.is_empty());

    Ok(CoffeeBean {
        id: new_record_id("bean"),
        name,
        roast_level: str_field(value, "roastLevel")
            .unwrap_or_else(|| DEFAULT_ROAST_LEVEL.to_string()),
        roast_date: str_field(value, "roastDate"),
        origin: str_field(value, "origin"),
        // `processingMethod` is the legacy spelling of `process`
        process: str_field(value, "process").or_else(|| str_field(value, "processingMethod")),
        variety: str_field(value, "variety"),
        bean_type: str_field(value, "type"),
        price: str_field(value, "price"),
        capacity,
        remaining,
        flavor,
        notes: str_field(value, "notes"),
        blend_components,
    })
}

fn decode_blend_component(value: &Value) -> Option<BlendComponent> {
    value.as_object()?;
    Some(BlendComponent {
        name: str_field(value, "name"),
        percentage: str_field(value, "percentage").unwrap_or_default(),
        origin: str_field(value, "origin"),
        process: str_field(value, "process"),
        variety: str_field(value, "variety"),
    })
}

// ============================================================================
// Note
// ============================================================================

fn decode_note(value: &Value) -> ConvertResult<BrewingNote> {
    let params = value.get("params");
    let param = |key: &str| -> String {
        params
            .and_then(|p| str_field(p, key))
            .unwrap_or_default()
    };

    let taste = value.get("taste");
    let score = |key: &str| -> u8 {
        taste
            .and_then(|t| num_field(t, key))
            .map(|n| n.min(5) as u8)
            .unwrap_or(0)
    };

    Ok(BrewingNote {
        id: new_record_id("note"),
        bean_id: str_field(value, "beanId").unwrap_or_default(),
        method_name: str_field(value, "methodName")
            .or_else(|| str_field(value, "method"))
            .unwrap_or_default(),
        equipment: str_field(value, "equipment").unwrap_or_default(),
        params: NoteParams {
            coffee: param("coffee"),
            water: param("water"),
            ratio: param("ratio"),
            grind_size: param("grindSize"),
            temp: param("temp"),
        },
        taste: TasteRatings {
            acidity: score("acidity"),
            sweetness: score("sweetness"),
            bitterness: score("bitterness"),
            body: score("body"),
        },
        rating: num_field(value, "rating").map(|n| n.min(5) as u8).unwrap_or(0),
        notes: str_field(value, "notes").unwrap_or_default(),
        timestamp: value
            .get("timestamp")
            .and_then(Value::as_i64)
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
    })
}

// ============================================================================
// Optimization bundle
// ============================================================================

/// Bean context accompanying a method into the optimization workflow
#[derive(Debug, Clone, Default)]
pub struct OptimizationContext {
    pub equipment: String,
    pub bean_name: String,
    pub roast_level: String,
}

/// Bundle a method with taste-profile context into the JSON document
/// pasted into the external AI-optimization workflow.
pub fn generate_optimization_json(
    method: &Method,
    context: &OptimizationContext,
    current_taste: &TasteRatings,
    ideal_taste: &TasteRatings,
    notes: &str,
    optimization_goal: &str,
) -> String {
    let payload = json!({
        "equipment": context.equipment,
        "method": method.name,
        "coffeeBeanInfo": {
            "name": context.bean_name,
            "roastLevel": context.roast_level,
        },
        "params": {
            "coffee": method.params.coffee,
            "water": method.params.water,
            "ratio": method.params.ratio,
            "grindSize": method.params.grind_size,
            "temp": method.params.temp,
            "stages": method.params.stages,
        },
        "currentTaste": current_taste,
        "idealTaste": ideal_taste,
        "notes": notes,
        "optimizationGoal": optimization_goal,
    });
    serde_json::to_string_pretty(&payload).unwrap_or_default()
}

// ============================================================================
// Lenient Value helpers
// ============================================================================

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String field tolerating numeric wire values (`"price": 128`)
fn str_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Integer field tolerating string wire values (`"time": "30"`)
fn num_field(value: &Value, key: &str) -> Option<u32> {
    match value.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .map(|n| n as u32)
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u32)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
