//! "AMP Settings" inspector panel descriptors.
//!
//! The host renders these with its own widgets; this module only decides which
//! controls a block gets and what state they show.

use ampblocks_core::is_gallery_shortcode;
use serde::Serialize;

use crate::attributes::AmpAttributes;
use crate::block::BlockName;
use crate::config::EditorConfig;
use crate::layout::{AmpLayout, SelectOption, layout_options};

const FONT_SIZE_RANGE: (u32, u32) = (6, 72);
const HEIGHT_RANGE: (u32, u32) = (1, 1000);

/// Inspector panel for one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectorPanel {
    /// Panel title.
    pub title: String,
    /// Controls, top to bottom.
    pub controls: Vec<Control>,
}

impl InspectorPanel {
    /// Attribute names bound to controls, in order.
    pub fn attributes(&self) -> Vec<&'static str> {
        self.controls.iter().filter_map(Control::attribute).collect()
    }
}

/// A single inspector control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Drop-down bound to a string attribute.
    Select {
        /// Bound attribute.
        attribute: &'static str,
        /// Label.
        label: &'static str,
        /// Current value.
        value: String,
        /// Choices.
        options: Vec<SelectOption>,
    },
    /// Checkbox-style toggle bound to a boolean attribute.
    Toggle {
        /// Bound attribute.
        attribute: &'static str,
        /// Label.
        label: &'static str,
        /// Current state.
        checked: bool,
    },
    /// Slider bound to a numeric attribute.
    Range {
        /// Bound attribute.
        attribute: &'static str,
        /// Label.
        label: &'static str,
        /// Current value.
        value: u32,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
    /// Non-interactive message.
    Notice {
        /// Severity.
        status: NoticeStatus,
        /// Message text.
        message: String,
    },
}

impl Control {
    /// Attribute this control edits, if any.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Control::Select { attribute, .. }
            | Control::Toggle { attribute, .. }
            | Control::Range { attribute, .. } => Some(*attribute),
            Control::Notice { .. } => None,
        }
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    /// Validation problem.
    Error,
    /// Advisory.
    Warning,
}

fn toggle(attribute: &'static str, label: &'static str, checked: bool) -> Control {
    Control::Toggle {
        attribute,
        label,
        checked,
    }
}

fn range(attribute: &'static str, label: &'static str, value: u32, bounds: (u32, u32)) -> Control {
    Control::Range {
        attribute,
        label,
        value,
        min: bounds.0,
        max: bounds.1,
    }
}

/// Build the panel for `block`, or `None` when the block gets no AMP controls.
pub fn inspector_panel(
    config: &EditorConfig,
    block: &BlockName,
    attrs: &AmpAttributes,
) -> Option<InspectorPanel> {
    if !block.is_known() {
        log::debug!("no AMP inspector controls for {}", block);
        return None;
    }

    let mut controls = Vec::new();

    let options = layout_options(config, block);
    if options.len() > 1 {
        controls.push(Control::Select {
            attribute: "ampLayout",
            label: "Layout",
            value: attrs
                .amp_layout
                .map(AmpLayout::as_str)
                .unwrap_or_default()
                .to_string(),
            options,
        });
    }

    if config.is_media_block(block) || block.is_embed() {
        controls.push(toggle(
            "ampNoLoading",
            "Prevent a loading indicator from appearing",
            attrs.amp_no_loading,
        ));
    }

    let gallery_controls = match block {
        BlockName::Gallery => true,
        BlockName::Shortcode => attrs.text.as_deref().is_some_and(is_gallery_shortcode),
        _ => false,
    };
    if gallery_controls {
        controls.push(toggle(
            "ampCarousel",
            "Display as carousel",
            attrs.carousel_enabled(),
        ));
        controls.push(toggle("ampLightbox", "Add lightbox effect", attrs.amp_lightbox));
    } else if *block == BlockName::Image {
        controls.push(toggle("ampLightbox", "Add lightbox effect", attrs.amp_lightbox));
    }

    if config.is_text_block(block) {
        controls.push(toggle(
            "ampFitText",
            "Automatically fit text to container",
            attrs.amp_fit_text,
        ));
        if attrs.amp_fit_text {
            let settings = attrs.fit_text_settings_or(config.fit_text_defaults());
            controls.push(range("height", "Height", settings.height, HEIGHT_RANGE));
            controls.push(range(
                "minFont",
                "Minimum font size",
                settings.min_font,
                FONT_SIZE_RANGE,
            ));
            controls.push(range(
                "maxFont",
                "Maximum font size",
                settings.max_font,
                FONT_SIZE_RANGE,
            ));
            controls.extend(settings.validate().into_iter().map(|notice| Control::Notice {
                status: NoticeStatus::Error,
                message: notice.message().to_string(),
            }));
        }
    }

    if controls.is_empty() {
        return None;
    }

    Some(InspectorPanel {
        title: config.panel_label.clone(),
        controls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn panel(block: BlockName, attrs: serde_json::Value) -> Option<InspectorPanel> {
        let attrs = AmpAttributes::from_value(&attrs).unwrap();
        inspector_panel(&EditorConfig::default(), &block, &attrs)
    }

    #[test]
    fn image_panel() {
        let panel = panel(BlockName::Image, json!({ "ampLayout": "fill" })).unwrap();
        assert_eq!(panel.title, "AMP Settings");
        assert_eq!(panel.attributes(), vec!["ampLayout", "ampNoLoading", "ampLightbox"]);
        assert!(matches!(
            &panel.controls[0],
            Control::Select { value, .. } if value == "fill"
        ));
    }

    #[test]
    fn gallery_panel_defaults_carousel_on() {
        let panel = panel(BlockName::Gallery, json!({})).unwrap();
        assert_eq!(panel.attributes(), vec!["ampLayout", "ampCarousel", "ampLightbox"]);
        assert_eq!(panel.controls[1], toggle("ampCarousel", "Display as carousel", true));
    }

    #[test]
    fn shortcode_gets_gallery_controls_only_for_galleries() {
        let gallery = panel(BlockName::Shortcode, json!({ "text": "[gallery ids=\"1\"]" })).unwrap();
        assert!(gallery.attributes().contains(&"ampCarousel"));

        let other = panel(BlockName::Shortcode, json!({ "text": "[video]" })).unwrap();
        assert_eq!(other.attributes(), vec!["ampLayout"]);
    }

    #[test]
    fn fit_text_controls_appear_when_enabled() {
        let off = panel(BlockName::Heading, json!({})).unwrap();
        assert_eq!(off.attributes(), vec!["ampLayout", "ampFitText"]);

        let on = panel(BlockName::Heading, json!({ "ampFitText": true })).unwrap();
        assert_eq!(
            on.attributes(),
            vec!["ampLayout", "ampFitText", "height", "minFont", "maxFont"]
        );
        assert_eq!(on.controls[2], range("height", "Height", 50, HEIGHT_RANGE));
        assert!(!on.controls.iter().any(|c| matches!(c, Control::Notice { .. })));
    }

    #[test]
    fn invalid_fit_text_settings_add_notices() {
        let panel = panel(
            BlockName::Paragraph,
            json!({ "ampFitText": true, "height": 20, "minFont": 30, "maxFont": 24 }),
        )
        .unwrap();
        let messages: Vec<&str> = panel
            .controls
            .iter()
            .filter_map(|c| match c {
                Control::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            messages,
            vec![
                "The height must be greater than the max font size.",
                "The min font size must less than the max font size."
            ]
        );
    }

    #[test]
    fn unknown_blocks_have_no_panel() {
        assert!(panel(BlockName::parse("core/table"), json!({})).is_none());
    }

    #[test]
    fn serializes_tagged_controls() {
        let panel = panel(BlockName::embed("youtube"), json!({ "ampNoLoading": true })).unwrap();
        let value = serde_json::to_value(&panel).unwrap();
        assert_eq!(
            value["controls"][1],
            json!({
                "type": "toggle",
                "attribute": "ampNoLoading",
                "label": "Prevent a loading indicator from appearing",
                "checked": true
            })
        );
    }
}
