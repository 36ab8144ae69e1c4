//! Save-output filters: gallery shortcode flags, fit text and AMP data attributes.

use std::borrow::Cow;

use ampblocks_core::{
    GalleryToggles, extract_fit_text_content, is_gallery_shortcode, rewrite_gallery_shortcode,
    wrap_fit_text,
};
use serde::Serialize;
use serde_json::Value;

use crate::attributes::AmpAttributes;
use crate::block::BlockName;
use crate::config::EditorConfig;
use crate::element::{Element, Node, RICH_TEXT_VALUE_PROP};

/// Result of filtering a block's saved element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Keep the host's element.
    Unchanged,
    /// Use this element instead.
    Replaced(Element),
    /// Emit this markup verbatim instead of any element.
    RawHtml(String),
}

impl SaveOutcome {
    /// Whether the host output stays as it was.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, SaveOutcome::Unchanged)
    }

    /// Final markup, given the element the host would have saved.
    pub fn render(&self, original: &Element) -> String {
        match self {
            SaveOutcome::Unchanged => original.to_html(),
            SaveOutcome::Replaced(element) => element.to_html(),
            SaveOutcome::RawHtml(html) => html.clone(),
        }
    }
}

/// `data-amp-*` props for `block`; the sanitizer turns these into AMP attributes.
pub fn extra_props(block: &BlockName, attrs: &AmpAttributes) -> Vec<(&'static str, Value)> {
    let mut props = Vec::new();
    if let Some(layout) = attrs.amp_layout {
        props.push(("data-amp-layout", Value::from(layout.as_str())));
    }
    if attrs.amp_no_loading {
        props.push(("data-amp-noloading", Value::from("true")));
    }
    if matches!(block, BlockName::Image | BlockName::Gallery) && attrs.amp_lightbox {
        props.push(("data-amp-lightbox", Value::from("true")));
    }
    if *block == BlockName::Gallery && !attrs.carousel_enabled() {
        props.push(("data-amp-carousel", Value::from("false")));
    }
    props
}

/// Filter the element the host is about to save for `block`.
pub fn filter_save(
    config: &EditorConfig,
    block: &BlockName,
    element: &Element,
    attrs: &AmpAttributes,
) -> SaveOutcome {
    if !block.is_known() {
        log::debug!("no AMP save filter for {}", block);
        return SaveOutcome::Unchanged;
    }

    if *block == BlockName::Shortcode
        && let Some(text) = attrs.text.as_deref()
        && is_gallery_shortcode(text)
    {
        return save_gallery_shortcode(text, attrs);
    }

    let mut updated = merge_extra_props(element, &extra_props(block, attrs));

    let fitted = apply_fit_text(config, block, updated.as_ref().unwrap_or(element), attrs);
    if fitted.is_some() {
        updated = fitted;
    }

    match updated {
        Some(element) => {
            log::debug!("rewrote saved {} element", block);
            SaveOutcome::Replaced(element)
        }
        None => SaveOutcome::Unchanged,
    }
}

fn save_gallery_shortcode(text: &str, attrs: &AmpAttributes) -> SaveOutcome {
    let toggles = GalleryToggles {
        carousel: attrs.carousel_enabled(),
        lightbox: attrs.amp_lightbox,
    };
    match rewrite_gallery_shortcode(text, toggles) {
        Cow::Owned(rewritten) if rewritten != text => SaveOutcome::RawHtml(rewritten),
        _ => SaveOutcome::Unchanged,
    }
}

/// Copy `element` with any missing extra props added; `None` when nothing was added.
fn merge_extra_props(element: &Element, extra: &[(&'static str, Value)]) -> Option<Element> {
    let missing: Vec<_> = extra
        .iter()
        .filter(|(name, _)| !element.props.contains_key(*name))
        .collect();
    if missing.is_empty() {
        return None;
    }

    let mut merged = element.clone();
    for (name, value) in missing {
        merged.props.insert(name.to_string(), value.clone());
    }
    Some(merged)
}

fn rich_text_content<'a>(element: &'a Element, attrs: &'a AmpAttributes) -> Option<&'a str> {
    attrs
        .content
        .as_deref()
        .or_else(|| element.prop_str(RICH_TEXT_VALUE_PROP))
}

fn apply_fit_text(
    config: &EditorConfig,
    block: &BlockName,
    element: &Element,
    attrs: &AmpAttributes,
) -> Option<Element> {
    if *block == BlockName::Paragraph && !attrs.amp_fit_text {
        // Drop a wrapper left behind after fit text was switched off.
        let content = rich_text_content(element, attrs)?;
        let inner = extract_fit_text_content(content);
        if inner == content {
            return None;
        }
        let mut unwrapped = element.clone();
        unwrapped
            .props
            .insert(RICH_TEXT_VALUE_PROP.to_string(), Value::from(inner));
        return Some(unwrapped);
    }

    if !config.is_text_block(block) || !attrs.amp_fit_text {
        return None;
    }

    let settings = attrs.fit_text_settings();
    if *block == BlockName::Paragraph {
        let content = rich_text_content(element, attrs).unwrap_or_default();
        let wrapped = wrap_fit_text(extract_fit_text_content(content), &settings);
        let mut paragraph = element.clone();
        paragraph
            .props
            .insert(RICH_TEXT_VALUE_PROP.to_string(), Value::from(wrapped));
        return Some(paragraph);
    }

    let wrapper = settings.attributes().into_iter().fold(
        Element::new("amp-fit-text").with_prop("layout", "fixed-height"),
        |wrapper, (name, value)| wrapper.with_prop(name, value),
    );
    Some(wrapper.with_child(Node::Element(element.clone())))
}
