//! Property definitions with defaults from display.json
//!
//! display.json is embedded at compile time and declares every property a
//! caller may set, with its default value. Defaults live in that one file and
//! nowhere else in the code.

use super::attributes::AttributeOptions;
use super::error::{DisplayError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// display.json embedded at compile time
const DISPLAY_JSON: &str = include_str!("../../display.json");

/// Property definition from display.json
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default_value: String,
    pub description: String,
    /// For EnumeratedProperty, the valid values
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Enumerated,
    Double,
    Integer,
    Boolean,
}

/// Registry of all properties with their defaults from display.json
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a display.json document
    pub fn from_json(json: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json)?;

        let properties_array = json["properties"]
            .as_array()
            .ok_or_else(|| DisplayError::Config("missing 'properties' array".to_string()))?;

        let mut properties = HashMap::new();

        for prop in properties_array {
            let name = prop["name"]
                .as_str()
                .ok_or_else(|| DisplayError::Config("property missing 'name'".to_string()))?
                .to_string();

            let kind = match prop["kind"].as_str() {
                Some("StringProperty") => PropertyKind::String,
                Some("EnumeratedProperty") => PropertyKind::Enumerated,
                Some("DoubleProperty") => PropertyKind::Double,
                Some("IntegerProperty") => PropertyKind::Integer,
                Some("BooleanProperty") => PropertyKind::Boolean,
                other => {
                    return Err(DisplayError::Config(format!(
                        "property '{}' has unknown kind {:?}",
                        name, other
                    )))
                }
            };

            let default_value = prop["defaultValue"].as_str().unwrap_or("").to_string();
            let description = prop["description"].as_str().unwrap_or("").to_string();

            let valid_values = if kind == PropertyKind::Enumerated {
                prop["values"].as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            } else {
                None
            };

            properties.insert(
                name.clone(),
                PropertyDef {
                    name,
                    kind,
                    default_value,
                    description,
                    valid_values,
                },
            );
        }

        tracing::debug!("Loaded {} property definitions", properties.len());
        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(DISPLAY_JSON).unwrap_or_else(|e| {
            tracing::error!("Failed to load display.json: {}", e);
            PropertyRegistry::default()
        })
    })
}

/// Typed property reader
///
/// Reads caller-supplied values, falling back to the defaults of display.json.
/// Empty values count as "not set".
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    pub fn new(values: HashMap<String, String>) -> Self {
        let user_values = values
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { user_values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Whether the caller set a value for this property
    pub fn is_set(&self, name: &str) -> bool {
        self.user_values.contains_key(name)
    }

    /// Get string property (user value or default from display.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    ///
    /// Returns the user value if valid, otherwise logs a warning and returns
    /// the default.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.clone();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    /// Get f64 property, falling back to the default when unparsable
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);

        let value = self.get_string(name);
        if value.trim().is_empty() {
            return default;
        }

        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            return value;
        }

        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(min);
        tracing::warn!(
            "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
            value,
            name,
            min,
            max,
            default
        );
        default
    }

    /// Get optional i32 property (None when unset and without default)
    pub fn get_optional_i32(&self, name: &str) -> Option<i32> {
        let value = self.get_optional_string(name)?;
        match value.trim().parse::<i32>() {
            Ok(v) => Some(v),
            Err(_) => {
                let default = registry()
                    .get_default(name)
                    .and_then(|s| s.parse::<i32>().ok());
                tracing::warn!(
                    "Invalid integer value '{}' for property '{}'. Using default: {:?}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get i32 property with validation
    pub fn get_i32(&self, name: &str) -> i32 {
        self.get_optional_i32(name).unwrap_or(0)
    }

    /// Get boolean property ("true"/"false", case-insensitive)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry()
            .get_default(name)
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        match self.user_values.get(name).map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(other) => {
                tracing::warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other,
                    name,
                    default
                );
                default
            }
            None => default,
        }
    }

    /// Parse a comma separated list of numbers
    ///
    /// Returns None when the property is empty. Invalid entries are a
    /// configuration error rather than a silent fallback.
    pub fn get_f64_list(&self, name: &str) -> Result<Option<Vec<f64>>> {
        let value = match self.get_optional_string(name) {
            Some(v) => v,
            None => return Ok(None),
        };

        value
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    DisplayError::Config(format!(
                        "Invalid number '{}' in property '{}'",
                        part.trim(),
                        name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Raw attribute options, optionally scoped by a prefix (`<prefix>.color`, ...)
    ///
    /// `line_weight` is read as a synonym of `line_width`; the point radius
    /// is read from `point_radius`.
    pub fn get_attribute_options(&self, prefix: Option<&str>) -> AttributeOptions {
        let key = |field: &str| match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };
        AttributeOptions {
            color: self.get_optional_string(&key("color")),
            line_width: self
                .get_optional_string(&key("line_width"))
                .or_else(|| self.get_optional_string(&key("line_weight"))),
            line_type: self.get_optional_string(&key("line_type")),
            display_mode: self.get_optional_string(&key("display_mode")),
            radius: self.get_optional_string(&key("point_radius")),
        }
    }
}
