//! The extension as the host sees it: one object answering the three block hooks.

use serde_json::Value;

use crate::attributes::{AmpAttributes, AttributeSchema, augment_attributes};
use crate::block::BlockName;
use crate::config::EditorConfig;
use crate::element::Element;
use crate::error::AttributeError;
use crate::inspector::{InspectorPanel, inspector_panel};
use crate::save::{SaveOutcome, filter_save};

/// Hooks a block-editor host invokes for every block type.
pub trait BlockHook {
    /// Add attributes to `block`'s schema during registration.
    fn register_attributes(&self, block: &BlockName, schema: &mut AttributeSchema);

    /// Inspector controls for a selected block.
    fn inspector_panel(&self, block: &BlockName, attrs: &AmpAttributes) -> Option<InspectorPanel>;

    /// Rewrite the element a block saves.
    fn save(&self, block: &BlockName, element: &Element, attrs: &AmpAttributes) -> SaveOutcome;
}

/// AMP block extension bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct AmpBlockExtension {
    config: EditorConfig,
}

impl AmpBlockExtension {
    /// Extension using `config`.
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// [`BlockHook::save`] over raw JSON attribute records.
    ///
    /// A record that cannot be read leaves the output unchanged rather than
    /// breaking the host's save; the problem is logged.
    pub fn save_json(&self, name: &str, element: &Element, attrs: &Value) -> SaveOutcome {
        match AmpAttributes::from_value(attrs) {
            Ok(attrs) => self.save(&BlockName::parse(name), element, &attrs),
            Err(err) => {
                log::warn!("skipping AMP save filter for {}: {}", name, err);
                SaveOutcome::Unchanged
            }
        }
    }

    /// [`BlockHook::inspector_panel`] over raw JSON attribute records.
    pub fn inspector_json(
        &self,
        name: &str,
        attrs: &Value,
    ) -> Result<Option<InspectorPanel>, AttributeError> {
        let attrs = AmpAttributes::from_value(attrs)?;
        Ok(self.inspector_panel(&BlockName::parse(name), &attrs))
    }
}

impl BlockHook for AmpBlockExtension {
    fn register_attributes(&self, block: &BlockName, schema: &mut AttributeSchema) {
        augment_attributes(&self.config, block, schema);
    }

    fn inspector_panel(&self, block: &BlockName, attrs: &AmpAttributes) -> Option<InspectorPanel> {
        inspector_panel(&self.config, block, attrs)
    }

    fn save(&self, block: &BlockName, element: &Element, attrs: &AmpAttributes) -> SaveOutcome {
        filter_save(&self.config, block, element, attrs)
    }
}
