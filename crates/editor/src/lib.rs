#![deny(missing_docs)]
//! ampblocks editor hooks: AMP attributes, inspector panels and save filters for block editors.

/// Extra attribute registration and typed attribute records.
pub mod attributes;
/// Block type identifiers.
pub mod block;
/// Editor configuration and defaults.
pub mod config;
/// Saved-element tree.
pub mod element;
/// Configuration and attribute errors.
pub mod error;
/// Hook trait and the extension façade.
pub mod extension;
/// Inspector panel descriptors.
pub mod inspector;
/// Layout values and availability table.
pub mod layout;
/// Save-output filters.
pub mod save;

pub use attributes::{
    AmpAttributes, AttributeDefinition, AttributeSchema, AttributeType, amp_attributes_for,
    augment_attributes,
};
pub use block::BlockName;
pub use config::{EditorConfig, FontSizes, LayoutOption};
pub use element::{Element, Node, RICH_TEXT_VALUE_PROP};
pub use error::{AttributeError, ConfigError};
pub use extension::{AmpBlockExtension, BlockHook};
pub use inspector::{Control, InspectorPanel, NoticeStatus, inspector_panel};
pub use layout::{AmpLayout, SelectOption, image_layout_update, layout_options};
pub use save::{SaveOutcome, extra_props, filter_save};
