use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A generated learning roadmap.
///
/// Values of this type only come from [`RoadmapSuggestion::from_value`] (which
/// runs [`is_valid_roadmap`] first) or from code that builds them directly, so
/// a partially-shaped roadmap can never be rendered or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapSuggestion {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum RoadmapShapeError {
    #[error("Generated content does not match expected format")]
    InvalidShape,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structural predicate for roadmap JSON.
///
/// Every required field must be present with the right JSON type. `url` may be
/// absent but, when present, must be a string (`null` is rejected). Extra
/// fields are ignored.
pub fn is_valid_roadmap(content: &Value) -> bool {
    let Some(obj) = content.as_object() else {
        return false;
    };

    let is_str = |key: &str| obj.get(key).is_some_and(Value::is_string);

    let steps_ok = obj
        .get("steps")
        .and_then(Value::as_array)
        .is_some_and(|steps| steps.iter().all(Value::is_string));

    let resources_ok = obj
        .get("resources")
        .and_then(Value::as_array)
        .is_some_and(|resources| resources.iter().all(is_valid_resource));

    is_str("title") && is_str("description") && steps_ok && resources_ok
}

fn is_valid_resource(resource: &Value) -> bool {
    let Some(obj) = resource.as_object() else {
        return false;
    };
    obj.get("name").is_some_and(Value::is_string)
        && obj.get("type").is_some_and(Value::is_string)
        && obj.get("url").map_or(true, Value::is_string)
}

impl RoadmapSuggestion {
    /// Checks the shape of `content` and converts it into a typed roadmap.
    pub fn from_value(content: Value) -> Result<Self, RoadmapShapeError> {
        if !is_valid_roadmap(&content) {
            return Err(RoadmapShapeError::InvalidShape);
        }
        Ok(serde_json::from_value(content)?)
    }

    /// Parses raw JSON text, then applies [`RoadmapSuggestion::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, RoadmapShapeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}
