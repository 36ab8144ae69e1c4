use ampblocks_wasm::{
    extract_fit_text_content, filter_block_attributes, image_layout_update, inspector_panel,
    layout_options, rewrite_gallery_shortcode, save_element,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct Panel {
    title: String,
    controls: Vec<Control>,
}

#[derive(Deserialize, Debug)]
struct Control {
    #[serde(rename = "type")]
    kind: String,
    attribute: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Outcome {
    kind: String,
    value: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct SelectOption {
    value: String,
}

fn js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .expect("serialize to JsValue")
}

#[wasm_bindgen_test]
fn registers_gallery_attributes() {
    let schema = js(&serde_json::json!({ "ids": { "type": "array" } }));
    let result = filter_block_attributes("core/gallery", schema, JsValue::UNDEFINED)
        .expect("filter should succeed");

    let schema: serde_json::Value = serde_wasm_bindgen::from_value(result).expect("deserialize");
    assert_eq!(schema["ids"]["type"], "array");
    assert_eq!(schema["ampCarousel"]["default"], true);
    assert_eq!(schema["ampLightbox"]["type"], "boolean");
}

#[wasm_bindgen_test]
fn gallery_panel_lists_toggles() {
    let attrs = js(&serde_json::json!({ "ampCarousel": false }));
    let result = inspector_panel("core/gallery", attrs, JsValue::UNDEFINED).expect("panel");
    let panel: Panel = serde_wasm_bindgen::from_value(result).expect("deserialize panel");

    assert_eq!(panel.title, "AMP Settings");
    let attributes: Vec<_> = panel
        .controls
        .iter()
        .filter_map(|c| c.attribute.as_deref())
        .collect();
    assert_eq!(attributes, vec!["ampLayout", "ampCarousel", "ampLightbox"]);
    assert_eq!(panel.controls[1].kind, "toggle");
}

#[wasm_bindgen_test]
fn unknown_block_has_no_panel() {
    let result = inspector_panel("core/table", JsValue::UNDEFINED, JsValue::UNDEFINED)
        .expect("panel");
    assert!(result.is_null());
}

#[wasm_bindgen_test]
fn save_rewrites_gallery_shortcode() {
    let element = js(&serde_json::json!({ "tag": "div" }));
    let attrs = js(&serde_json::json!({ "text": "[gallery ids=\"1,2,3\"]", "ampCarousel": false }));
    let result = save_element("core/shortcode", element, attrs, JsValue::UNDEFINED).expect("save");
    let outcome: Outcome = serde_wasm_bindgen::from_value(result).expect("deserialize outcome");

    assert_eq!(outcome.kind, "raw_html");
    assert_eq!(
        outcome.value,
        Some(serde_json::json!("[gallery amp-carousel=false ids=\"1,2,3\"]"))
    );
}

#[wasm_bindgen_test]
fn save_rejects_malformed_elements() {
    let attrs = js(&serde_json::json!({}));
    assert!(save_element("core/image", JsValue::from_str("nope"), attrs, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn layout_options_respect_config() {
    let config = js(&serde_json::json!({
        "layoutOptions": [
            { "value": "fill", "label": "Fill", "notAvailable": ["core/video"] },
            { "value": "fixed", "label": "Fixed" }
        ]
    }));
    let result = layout_options("core/video", config).expect("options");
    let options: Vec<SelectOption> = serde_wasm_bindgen::from_value(result).expect("deserialize");
    let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["", "fixed"]);
}

#[wasm_bindgen_test]
fn fixed_height_image_fills_height_and_clears_width() {
    let attrs = js(&serde_json::json!({ "width": 300 }));
    let result = image_layout_update("fixed-height", attrs, JsValue::UNDEFINED).expect("update");
    let changes: serde_json::Value = serde_wasm_bindgen::from_value(result).expect("deserialize");

    assert_eq!(changes["ampLayout"], "fixed-height");
    assert_eq!(changes["height"], 400);
    assert_eq!(changes["width"], serde_json::Value::Null);
    assert!(changes.as_object().unwrap().contains_key("width"));
}

#[wasm_bindgen_test]
fn text_helpers() {
    assert_eq!(
        rewrite_gallery_shortcode("[gallery ids=\"1,2,3\"]", true, true),
        "[gallery amp-lightbox=true ids=\"1,2,3\"]"
    );
    assert_eq!(
        extract_fit_text_content("<amp-fit-text height=\"50\">Hello</amp-fit-text>"),
        "Hello"
    );
    assert_eq!(extract_fit_text_content("plain text"), "plain text");
}
