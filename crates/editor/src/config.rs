//! Editor-side configuration: block categories, defaults and the layout table.
//!
//! The host passes this as JSON (or it is loaded from YAML in tooling). Every
//! field is optional; anything missing falls back to [`EditorConfig::default`].

use std::collections::HashSet;

use ampblocks_core::FitTextSettings;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::block::BlockName;
use crate::error::ConfigError;
use crate::layout::AmpLayout;

static DEFAULT_CONFIG: Lazy<EditorConfig> = Lazy::new(EditorConfig::default);

/// Configuration shared by every hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Title of the inspector panel.
    pub panel_label: String,
    /// Width applied when a layout needs one and the block has none.
    pub default_width: u32,
    /// Height applied when a layout needs one and the block has none.
    pub default_height: u32,
    /// Font sizes used as fit-text bounds.
    pub font_sizes: FontSizes,
    /// Default fit-text container height.
    pub fit_text_height: u32,
    /// Blocks that get fit-text controls.
    pub text_blocks: Vec<BlockName>,
    /// Blocks that get the loading-indicator toggle (besides embeds).
    pub media_blocks: Vec<BlockName>,
    /// Layout menu entries and where they are unavailable.
    pub layout_options: Vec<LayoutOption>,
}

/// Named font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    /// Default fit-text minimum.
    pub small: u32,
    /// Default fit-text maximum.
    pub larger: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            small: FitTextSettings::DEFAULT_MIN_FONT,
            larger: FitTextSettings::DEFAULT_MAX_FONT,
        }
    }
}

/// One layout menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOption {
    /// Layout value.
    pub value: AmpLayout,
    /// Menu label.
    pub label: String,
    /// Blocks that must not offer this layout.
    #[serde(default)]
    pub not_available: Vec<BlockName>,
}

impl LayoutOption {
    fn new(value: AmpLayout, not_available: &[BlockName]) -> Self {
        Self {
            value,
            label: value.label().to_string(),
            not_available: not_available.to_vec(),
        }
    }
}

impl EditorConfig {
    /// Process-wide default configuration.
    pub fn global() -> &'static EditorConfig {
        &DEFAULT_CONFIG
    }

    /// Load from JSON, filling gaps with defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from YAML, filling gaps with defaults.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for option in &self.layout_options {
            if !seen.insert(option.value) {
                return Err(ConfigError::DuplicateLayout(option.value.as_str().to_string()));
            }
        }
        if self.font_sizes.small >= self.font_sizes.larger {
            return Err(ConfigError::InvertedFontSizes {
                small: self.font_sizes.small,
                larger: self.font_sizes.larger,
            });
        }
        Ok(())
    }

    /// Whether `block` gets fit-text controls.
    pub fn is_text_block(&self, block: &BlockName) -> bool {
        self.text_blocks.contains(block)
    }

    /// Whether `block` is a media block (embeds count separately).
    pub fn is_media_block(&self, block: &BlockName) -> bool {
        self.media_blocks.contains(block)
    }

    /// Fit-text settings a freshly inserted text block starts with.
    pub fn fit_text_defaults(&self) -> FitTextSettings {
        FitTextSettings {
            min_font: self.font_sizes.small,
            max_font: self.font_sizes.larger,
            height: self.fit_text_height,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        let embed = BlockName::embed;
        let soundcloud = [embed("soundcloud")];

        Self {
            panel_label: "AMP Settings".to_string(),
            default_width: 608,
            default_height: 400,
            font_sizes: FontSizes::default(),
            fit_text_height: FitTextSettings::DEFAULT_HEIGHT,
            text_blocks: vec![
                BlockName::Paragraph,
                BlockName::Heading,
                BlockName::Code,
                BlockName::Quote,
                BlockName::Subhead,
            ],
            media_blocks: vec![BlockName::Image, BlockName::Video],
            layout_options: vec![
                LayoutOption::new(
                    AmpLayout::NoDisplay,
                    &[
                        embed("vimeo"),
                        embed("dailymotion"),
                        embed("hulu"),
                        embed("reddit"),
                        embed("soundcloud"),
                    ],
                ),
                LayoutOption::new(AmpLayout::Fixed, &soundcloud),
                LayoutOption::new(AmpLayout::Responsive, &soundcloud),
                LayoutOption::new(AmpLayout::FixedHeight, &[]),
                LayoutOption::new(AmpLayout::Fill, &soundcloud),
                LayoutOption::new(
                    AmpLayout::Container,
                    &[
                        BlockName::Video,
                        BlockName::Audio,
                        embed("youtube"),
                        embed("facebook"),
                        embed("instagram"),
                        embed("vimeo"),
                        embed("dailymotion"),
                        embed("hulu"),
                        embed("reddit"),
                        embed("soundcloud"),
                    ],
                ),
                LayoutOption::new(AmpLayout::FlexItem, &soundcloud),
                LayoutOption::new(
                    AmpLayout::Intrinsic,
                    &[
                        BlockName::Video,
                        embed("youtube"),
                        embed("facebook"),
                        embed("instagram"),
                        embed("vimeo"),
                        embed("dailymotion"),
                        embed("hulu"),
                        embed("reddit"),
                        embed("soundcloud"),
                    ],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.panel_label, "AMP Settings");
        assert_eq!(config.layout_options.len(), AmpLayout::ALL.len());
        assert!(config.is_text_block(&BlockName::Heading));
        assert!(!config.is_text_block(&BlockName::Image));
        assert!(config.is_media_block(&BlockName::Video));
    }

    #[test]
    fn global_matches_default() {
        assert_eq!(EditorConfig::global(), &EditorConfig::default());
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = EditorConfig::from_json_str(
            r#"{"panelLabel": "AMP", "defaultHeight": 300, "fontSizes": {"larger": 60}}"#,
        )
        .unwrap();
        assert_eq!(config.panel_label, "AMP");
        assert_eq!(config.default_height, 300);
        assert_eq!(config.default_width, 608);
        assert_eq!(config.font_sizes.small, 14);
        assert_eq!(config.font_sizes.larger, 60);
        assert_eq!(config.text_blocks, EditorConfig::default().text_blocks);
    }

    #[test]
    fn yaml_layout_table() {
        let yaml = "\
layoutOptions:
  - value: fixed
    label: Fixed
    notAvailable: [core/video]
  - value: fill
    label: Fill
";
        let config = EditorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.layout_options.len(), 2);
        assert_eq!(config.layout_options[0].not_available, vec![BlockName::Video]);
        assert!(config.layout_options[1].not_available.is_empty());
    }

    #[test]
    fn rejects_duplicate_layouts() {
        let err = EditorConfig::from_json_str(
            r#"{"layoutOptions": [{"value": "fill", "label": "A"}, {"value": "fill", "label": "B"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLayout(ref v) if v == "fill"));
    }

    #[test]
    fn rejects_inverted_font_sizes() {
        let err = EditorConfig::from_json_str(r#"{"fontSizes": {"small": 50, "larger": 20}}"#)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Font size 'small' (50) must be below 'larger' (20)"
        );
    }

    #[test]
    fn rejects_unknown_layout_values() {
        let err =
            EditorConfig::from_json_str(r#"{"layoutOptions": [{"value": "stretch", "label": "S"}]}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn fit_text_defaults_follow_font_sizes() {
        let settings = EditorConfig::default().fit_text_defaults();
        assert_eq!(settings, FitTextSettings::default());
    }
}
