//! AMP layout values and the per-block option table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::AmpAttributes;
use crate::block::BlockName;
use crate::config::EditorConfig;

/// AMP `layout` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmpLayout {
    /// `nodisplay`
    #[serde(rename = "nodisplay")]
    NoDisplay,
    /// `fixed`
    #[serde(rename = "fixed")]
    Fixed,
    /// `responsive`
    #[serde(rename = "responsive")]
    Responsive,
    /// `fixed-height`
    #[serde(rename = "fixed-height")]
    FixedHeight,
    /// `fill`
    #[serde(rename = "fill")]
    Fill,
    /// `container`
    #[serde(rename = "container")]
    Container,
    /// `flex-item`
    #[serde(rename = "flex-item")]
    FlexItem,
    /// `intrinsic`
    #[serde(rename = "intrinsic")]
    Intrinsic,
}

impl AmpLayout {
    /// Every layout, in menu order.
    pub const ALL: [AmpLayout; 8] = [
        AmpLayout::NoDisplay,
        AmpLayout::Fixed,
        AmpLayout::Responsive,
        AmpLayout::FixedHeight,
        AmpLayout::Fill,
        AmpLayout::Container,
        AmpLayout::FlexItem,
        AmpLayout::Intrinsic,
    ];

    /// Attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            AmpLayout::NoDisplay => "nodisplay",
            AmpLayout::Fixed => "fixed",
            AmpLayout::Responsive => "responsive",
            AmpLayout::FixedHeight => "fixed-height",
            AmpLayout::Fill => "fill",
            AmpLayout::Container => "container",
            AmpLayout::FlexItem => "flex-item",
            AmpLayout::Intrinsic => "intrinsic",
        }
    }

    /// Parse an attribute value; `None` for empty or unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layout| layout.as_str() == value)
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            AmpLayout::NoDisplay => "No Display",
            AmpLayout::Fixed => "Fixed",
            AmpLayout::Responsive => "Responsive",
            AmpLayout::FixedHeight => "Fixed height",
            AmpLayout::Fill => "Fill",
            AmpLayout::Container => "Container",
            AmpLayout::FlexItem => "Flex Item",
            AmpLayout::Intrinsic => "Intrinsic",
        }
    }
}

/// `{ value, label }` pair for select controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored attribute value.
    pub value: String,
    /// Visible label.
    pub label: String,
}

impl SelectOption {
    /// Build an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Layout options offered for `block`, led by an empty "Default" choice.
pub fn layout_options(config: &EditorConfig, block: &BlockName) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", "Default"))
        .chain(
            config
                .layout_options
                .iter()
                .filter(|option| !option.not_available.contains(block))
                .map(|option| SelectOption::new(option.value.as_str(), option.label.as_str())),
        )
        .collect()
}

/// Attribute changes to apply when an image block switches to `layout`.
///
/// Fixed layouts need explicit dimensions, so missing ones are filled from the
/// configured defaults; `fixed-height` drops any width.
pub fn image_layout_update(
    config: &EditorConfig,
    layout: Option<AmpLayout>,
    attrs: &AmpAttributes,
) -> Map<String, Value> {
    let mut changes = Map::new();
    changes.insert(
        "ampLayout".to_string(),
        Value::from(layout.map(AmpLayout::as_str).unwrap_or_default()),
    );

    match layout {
        Some(AmpLayout::FixedHeight) => {
            if attrs.height.is_none() {
                changes.insert("height".to_string(), Value::from(config.default_height));
            }
            if attrs.width.is_some() {
                changes.insert("width".to_string(), Value::Null);
            }
        }
        Some(AmpLayout::Fixed | AmpLayout::Responsive | AmpLayout::Intrinsic) => {
            if attrs.height.is_none() {
                changes.insert("height".to_string(), Value::from(config.default_height));
            }
            if attrs.width.is_none() {
                changes.insert("width".to_string(), Value::from(config.default_width));
            }
        }
        _ => {}
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn layout_strings_round_trip() {
        for layout in AmpLayout::ALL {
            assert_eq!(AmpLayout::parse(layout.as_str()), Some(layout));
        }
        assert_eq!(AmpLayout::parse(""), None);
        assert_eq!(AmpLayout::parse("stretch"), None);
    }

    #[test]
    fn image_gets_every_layout_but_container_is_allowed() {
        let config = EditorConfig::default();
        let options = layout_options(&config, &BlockName::Image);
        assert_eq!(
            values(&options),
            vec![
                "",
                "nodisplay",
                "fixed",
                "responsive",
                "fixed-height",
                "fill",
                "container",
                "flex-item",
                "intrinsic"
            ]
        );
        assert_eq!(options[0].label, "Default");
    }

    #[test]
    fn soundcloud_only_gets_fixed_height() {
        let config = EditorConfig::default();
        let options = layout_options(&config, &BlockName::embed("soundcloud"));
        assert_eq!(values(&options), vec!["", "fixed-height"]);
    }

    #[test]
    fn video_loses_container_and_intrinsic() {
        let config = EditorConfig::default();
        let options = layout_options(&config, &BlockName::Video);
        let values = values(&options);
        assert!(!values.contains(&"intrinsic"));
        assert!(!values.contains(&"container"));
        assert!(values.contains(&"fill"));
    }

    #[test]
    fn fixed_height_fills_height_and_clears_width() {
        let config = EditorConfig::default();
        let attrs = AmpAttributes {
            width: Some(300),
            ..Default::default()
        };
        let changes = image_layout_update(&config, Some(AmpLayout::FixedHeight), &attrs);
        assert_eq!(changes["ampLayout"], "fixed-height");
        assert_eq!(changes["height"], 400);
        assert_eq!(changes["width"], Value::Null);
    }

    #[test]
    fn fixed_keeps_existing_dimensions() {
        let config = EditorConfig::default();
        let attrs = AmpAttributes {
            width: Some(300),
            height: Some(200),
            ..Default::default()
        };
        let changes = image_layout_update(&config, Some(AmpLayout::Fixed), &attrs);
        assert_eq!(changes.len(), 1);

        let changes =
            image_layout_update(&config, Some(AmpLayout::Responsive), &AmpAttributes::default());
        assert_eq!(changes["width"], 608);
        assert_eq!(changes["height"], 400);
    }

    #[test]
    fn clearing_layout_only_resets_the_attribute() {
        let config = EditorConfig::default();
        let changes = image_layout_update(&config, None, &AmpAttributes::default());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["ampLayout"], "");
    }
}
