//! Minimal saved-element tree exchanged with the host's save pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prop holding a rich-text element's inner HTML (`RichText.Content`'s `value`).
pub const RICH_TEXT_VALUE_PROP: &str = "value";

/// An element returned by a block's `save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Props in insertion order.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Markup emitted verbatim.
    Html(String),
}

impl Element {
    /// Element with no props or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style prop setter.
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// String value of prop `name`, if it is a string.
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// Render to HTML.
    ///
    /// Attribute values and text are escaped; the rich-text `value` prop and
    /// [`Node::Html`] children are emitted as-is. `false`/`null` props are
    /// dropped and `true` renders as a bare attribute.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.props {
            if name == RICH_TEXT_VALUE_PROP {
                continue;
            }
            match value {
                Value::Null | Value::Bool(false) => {}
                Value::Bool(true) => {
                    out.push(' ');
                    out.push_str(name);
                }
                Value::String(s) => push_attr(out, name, s),
                other => push_attr(out, name, &other.to_string()),
            }
        }
        out.push('>');

        if let Some(value) = self.prop_str(RICH_TEXT_VALUE_PROP) {
            out.push_str(value);
        }
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&html_escape::encode_text(text)),
                Node::Html(html) => out.push_str(html),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}
