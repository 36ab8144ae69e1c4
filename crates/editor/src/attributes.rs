//! Block attribute schemas and the typed view over attribute records.

use std::collections::BTreeMap;

use ampblocks_core::FitTextSettings;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::BlockName;
use crate::config::EditorConfig;
use crate::error::AttributeError;
use crate::layout::AmpLayout;

/// Attribute value types understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `array`
    Array,
    /// `object`
    Object,
    /// `null`
    Null,
    /// Anything else the host declares.
    #[serde(other)]
    Unknown,
}

/// One entry of a block's `attributes` schema.
///
/// Host-specific keys (`source`, `selector`, ...) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AttributeType>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Other keys as given by the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttributeDefinition {
    /// Definition of `kind` without a default.
    pub fn of(kind: AttributeType) -> Self {
        Self {
            kind: Some(kind),
            default: None,
            extra: Map::new(),
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A block's attribute schema, keyed by attribute name.
pub type AttributeSchema = BTreeMap<String, AttributeDefinition>;

/// Attributes this extension contributes to `block`, in registration order.
pub fn amp_attributes_for(
    config: &EditorConfig,
    block: &BlockName,
) -> Vec<(&'static str, AttributeDefinition)> {
    use AttributeType::{Boolean, Number};

    if !block.is_known() {
        return Vec::new();
    }

    let mut attrs = vec![("ampLayout", AttributeDefinition::of(AttributeType::String))];

    if config.is_media_block(block) || block.is_embed() {
        attrs.push(("ampNoLoading", AttributeDefinition::of(Boolean)));
    }

    match block {
        BlockName::Gallery | BlockName::Shortcode => {
            attrs.push((
                "ampCarousel",
                AttributeDefinition::of(Boolean).with_default(true),
            ));
            attrs.push((
                "ampLightbox",
                AttributeDefinition::of(Boolean).with_default(false),
            ));
        }
        BlockName::Image => {
            attrs.push((
                "ampLightbox",
                AttributeDefinition::of(Boolean).with_default(false),
            ));
        }
        _ => {}
    }

    if config.is_text_block(block) {
        let defaults = config.fit_text_defaults();
        attrs.push((
            "ampFitText",
            AttributeDefinition::of(Boolean).with_default(false),
        ));
        attrs.push((
            "minFont",
            AttributeDefinition::of(Number).with_default(defaults.min_font),
        ));
        attrs.push((
            "maxFont",
            AttributeDefinition::of(Number).with_default(defaults.max_font),
        ));
        attrs.push((
            "height",
            AttributeDefinition::of(Number).with_default(defaults.height),
        ));
    }

    attrs
}

/// Register the AMP attributes for `block` on `schema`.
///
/// Attributes the block already declares are left alone. Returns how many were added.
pub fn augment_attributes(
    config: &EditorConfig,
    block: &BlockName,
    schema: &mut AttributeSchema,
) -> usize {
    let mut added = 0;
    for (name, definition) in amp_attributes_for(config, block) {
        if !schema.contains_key(name) {
            schema.insert(name.to_string(), definition);
            added += 1;
        }
    }
    if added > 0 {
        log::debug!("registered {} AMP attributes on {}", added, block);
    }
    added
}

/// Typed view over the attributes this extension reads.
///
/// Records come from the host and are not always well typed: booleans may
/// arrive as `"true"`/`1`, numbers as strings. Unreadable values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmpAttributes {
    /// Shortcode block text.
    pub text: Option<String>,
    /// Rich-text block content (HTML).
    pub content: Option<String>,
    /// Selected AMP layout; empty or unknown values mean the default.
    #[serde(deserialize_with = "lenient_layout")]
    pub amp_layout: Option<AmpLayout>,
    /// Suppress the loading indicator.
    #[serde(deserialize_with = "lenient_bool")]
    pub amp_no_loading: bool,
    /// Carousel toggle; unset means on.
    #[serde(deserialize_with = "lenient_opt_bool")]
    pub amp_carousel: Option<bool>,
    /// Lightbox toggle.
    #[serde(deserialize_with = "lenient_bool")]
    pub amp_lightbox: bool,
    /// Fit-text toggle.
    #[serde(deserialize_with = "lenient_bool")]
    pub amp_fit_text: bool,
    /// Fit-text minimum font size.
    #[serde(deserialize_with = "lenient_u32")]
    pub min_font: Option<u32>,
    /// Fit-text maximum font size.
    #[serde(deserialize_with = "lenient_u32")]
    pub max_font: Option<u32>,
    /// Fit-text container height, or media height.
    #[serde(deserialize_with = "lenient_u32")]
    pub height: Option<u32>,
    /// Media width.
    #[serde(deserialize_with = "lenient_u32")]
    pub width: Option<u32>,
}

impl AmpAttributes {
    /// Read a JSON attribute record.
    pub fn from_value(value: &Value) -> Result<Self, AttributeError> {
        if !value.is_object() {
            return Err(AttributeError::NotAnObject(json_kind(value)));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Carousel toggle with its default applied.
    pub fn carousel_enabled(&self) -> bool {
        self.amp_carousel.unwrap_or(true)
    }

    /// Fit-text settings as saved: unset sizes are zero and left off the tag.
    pub fn fit_text_settings(&self) -> FitTextSettings {
        FitTextSettings {
            min_font: self.min_font.unwrap_or(0),
            max_font: self.max_font.unwrap_or(0),
            height: self.height.unwrap_or(0),
        }
    }

    /// Fit-text settings with configured defaults for unset sizes.
    pub fn fit_text_settings_or(&self, defaults: FitTextSettings) -> FitTextSettings {
        FitTextSettings {
            min_font: self.min_font.unwrap_or(defaults.min_font),
            max_font: self.max_font.unwrap_or(defaults.max_font),
            height: self.height.unwrap_or(defaults.height),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim() {
            "" | "0" | "false" => Some(false),
            _ => Some(true),
        },
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(truthy(&Value::deserialize(deserializer)?).unwrap_or(false))
}

fn lenient_opt_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(truthy(&Value::deserialize(deserializer)?))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f.round() as u32))
}

fn lenient_layout<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AmpLayout>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(AmpLayout::parse(s.trim())),
        Value::Null => Ok(None),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(json_kind(&other)),
            &"a layout name",
        )),
    }
}
