use ampblocks_core::GalleryToggles;
use ampblocks_editor::{
    AmpAttributes, AmpBlockExtension, AmpLayout, AttributeSchema, BlockHook, BlockName,
    EditorConfig, Element,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Conversions
// ============================================================================

/// Reads the optional config object passed as the last argument of every hook.
fn parse_config(config: JsValue) -> Result<EditorConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(EditorConfig::default());
    }
    let config: EditorConfig = from_js(config, "config")?;
    config
        .validate()
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    Ok(config)
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

fn parse_attributes(attrs: JsValue) -> Result<AmpAttributes, JsError> {
    if attrs.is_undefined() || attrs.is_null() {
        return Ok(AmpAttributes::default());
    }
    let value: serde_json::Value = from_js(attrs, "attributes")?;
    AmpAttributes::from_value(&value).map_err(|e| JsError::new(&e.to_string()))
}

/// Plain objects instead of JS `Map`s, `null` for `None`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Block hooks
// ============================================================================

/// Adds the AMP attributes to a block type's `attributes` schema.
///
/// # Arguments
///
/// * `name` - Block identifier (e.g. `core/image`)
/// * `schema` - The block's existing attribute schema (may be undefined)
/// * `config` - Optional editor configuration
///
/// # Returns
///
/// The augmented schema. Attributes the block already declares are kept as-is.
#[wasm_bindgen(js_name = filterBlockAttributes)]
pub fn filter_block_attributes(
    name: &str,
    schema: JsValue,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let extension = AmpBlockExtension::new(parse_config(config)?);
    let mut schema: AttributeSchema = if schema.is_undefined() || schema.is_null() {
        AttributeSchema::new()
    } else {
        from_js(schema, "schema")?
    };
    extension.register_attributes(&BlockName::parse(name), &mut schema);
    to_js(&schema)
}

/// Describes the "AMP Settings" inspector panel for a selected block.
///
/// Returns `null` when the block gets no AMP controls.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const panel = inspectorPanel('core/gallery', { ampCarousel: false });
/// // panel = {
/// //   title: "AMP Settings",
/// //   controls: [
/// //     { type: "select", attribute: "ampLayout", ... },
/// //     { type: "toggle", attribute: "ampCarousel", label: "Display as carousel", checked: false },
/// //     { type: "toggle", attribute: "ampLightbox", label: "Add lightbox effect", checked: false }
/// //   ]
/// // }
/// ```
#[wasm_bindgen(js_name = inspectorPanel)]
pub fn inspector_panel(name: &str, attrs: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let extension = AmpBlockExtension::new(parse_config(config)?);
    let attrs = parse_attributes(attrs)?;
    to_js(&extension.inspector_panel(&BlockName::parse(name), &attrs))
}

/// Filters the element a block is about to save.
///
/// # Returns
///
/// One of:
/// - `{kind: "unchanged"}` - keep the host's element
/// - `{kind: "replaced", value: {tag, props, children}}` - save this element instead
/// - `{kind: "raw_html", value: "..."}` - emit the markup verbatim
#[wasm_bindgen(js_name = saveElement)]
pub fn save_element(
    name: &str,
    element: JsValue,
    attrs: JsValue,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let extension = AmpBlockExtension::new(parse_config(config)?);
    let element: Element = from_js(element, "element")?;
    let attrs = parse_attributes(attrs)?;
    to_js(&extension.save(&BlockName::parse(name), &element, &attrs))
}

/// Layout `{value, label}` options offered for a block, led by "Default".
#[wasm_bindgen(js_name = layoutOptions)]
pub fn layout_options(name: &str, config: JsValue) -> Result<JsValue, JsError> {
    let config = parse_config(config)?;
    to_js(&ampblocks_editor::layout_options(&config, &BlockName::parse(name)))
}

/// Attribute changes to apply when an image block's layout changes.
#[wasm_bindgen(js_name = imageLayoutUpdate)]
pub fn image_layout_update(
    layout: &str,
    attrs: JsValue,
    config: JsValue,
) -> Result<JsValue, JsError> {
    let config = parse_config(config)?;
    let attrs = parse_attributes(attrs)?;
    to_js(&ampblocks_editor::image_layout_update(
        &config,
        AmpLayout::parse(layout),
        &attrs,
    ))
}

// ============================================================================
// Text helpers
// ============================================================================

/// Brings a gallery shortcode's `amp-carousel`/`amp-lightbox` flags in line with the toggles.
#[wasm_bindgen(js_name = rewriteGalleryShortcode)]
pub fn rewrite_gallery_shortcode(text: &str, carousel: bool, lightbox: bool) -> String {
    ampblocks_core::rewrite_gallery_shortcode(text, GalleryToggles { carousel, lightbox })
        .into_owned()
}

/// Inner content of the first `<amp-fit-text>` wrapper, or the input unchanged.
#[wasm_bindgen(js_name = extractFitTextContent)]
pub fn extract_fit_text_content(markup: &str) -> String {
    ampblocks_core::extract_fit_text_content(markup).to_string()
}
