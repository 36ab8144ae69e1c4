//! Structured shortcode opening tags (`[name key=value ...]`).
//!
//! Attributes keep their source order and quote style so that a parsed tag
//! serializes back to the text it came from. Callers that only need to edit
//! one tag inside a larger string use [`Shortcode::find`] and
//! [`ShortcodeSpan::splice`], which leave the surrounding text untouched.

use std::fmt::{self, Write as _};
use std::ops::Range;

use crate::error::ShortcodeError;

/// A single shortcode attribute, either `key=value` or a bare positional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeAttr {
    /// Attribute name; `None` for positional values.
    pub key: Option<String>,
    /// Unquoted value.
    pub value: String,
    /// Quote character used around the value in the source, if any.
    pub quote: Option<char>,
}

impl ShortcodeAttr {
    /// Named attribute. Values that would not survive unquoted get double quotes.
    pub fn named(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let quote = needs_quotes(&value).then_some('"');
        Self {
            key: Some(key.into()),
            value,
            quote,
        }
    }

    /// Positional attribute.
    pub fn positional(value: impl Into<String>) -> Self {
        let value = value.into();
        let quote = needs_quotes(&value).then_some('"');
        Self {
            key: None,
            value,
            quote,
        }
    }

    /// Whether this attribute is named `key`.
    pub fn is_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

impl fmt::Display for ShortcodeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "{}=", key)?;
        }
        match self.quote {
            Some(q) => write!(f, "{q}{}{q}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == ']' || c == '[')
}

/// Parsed shortcode opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode {
    /// Shortcode name (e.g. `gallery`).
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<ShortcodeAttr>,
    /// Whether the tag ended with `/]`.
    pub self_closing: bool,
}

/// Location of a shortcode inside a larger string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeSpan {
    /// Byte range of the opening tag, brackets included.
    pub range: Range<usize>,
    /// Byte offset just past the tag name.
    pub name_end: usize,
    /// Byte range of each attribute in `shortcode.attrs`, leading whitespace excluded.
    pub attr_ranges: Vec<Range<usize>>,
    /// The parsed tag.
    pub shortcode: Shortcode,
}

impl ShortcodeSpan {
    /// Replace the spanned tag in `text` with `replacement`, keeping everything else.
    ///
    /// The whole tag is re-serialized; use the attribute-level edits below to
    /// keep the tag's own spacing.
    pub fn splice(&self, text: &str, replacement: &Shortcode) -> String {
        let mut out = String::with_capacity(text.len() + 32);
        out.push_str(&text[..self.range.start]);
        write!(out, "{}", replacement).ok();
        out.push_str(&text[self.range.end..]);
        out
    }

    /// Insert ` attr` directly after the tag name. Every other byte is kept.
    pub fn insert_attr(&self, text: &str, attr: &ShortcodeAttr) -> String {
        let mut out = String::with_capacity(text.len() + 32);
        out.push_str(&text[..self.name_end]);
        write!(out, " {}", attr).ok();
        out.push_str(&text[self.name_end..]);
        out
    }

    /// Replace the source text of attribute `index` with `attr`.
    pub fn replace_attr(&self, text: &str, index: usize, attr: &ShortcodeAttr) -> Option<String> {
        let range = self.attr_ranges.get(index)?;
        let mut out = String::with_capacity(text.len() + 16);
        out.push_str(&text[..range.start]);
        write!(out, "{}", attr).ok();
        out.push_str(&text[range.end..]);
        Some(out)
    }

    /// Cut attribute `index` out of `text` together with the whitespace before it.
    pub fn remove_attr(&self, text: &str, index: usize) -> Option<String> {
        let range = self.attr_ranges.get(index)?;
        let start = match index {
            0 => self.name_end,
            _ => self.attr_ranges[index - 1].end,
        };
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..start]);
        out.push_str(&text[range.end..]);
        Some(out)
    }
}

impl Shortcode {
    /// Empty tag named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    /// Parse exactly one opening tag. Trailing whitespace is allowed.
    pub fn parse(text: &str) -> Result<Self, ShortcodeError> {
        let parsed = parse_prefix(text)?;
        let rest = &text[parsed.len..];
        if !rest.trim().is_empty() {
            return Err(ShortcodeError::TrailingText(rest.to_string()));
        }
        Ok(parsed.shortcode)
    }

    /// Locate the first opening tag named `name` in `text`.
    ///
    /// Closing tags (`[/name]`), escaped tags (`[[name]]`) and longer names
    /// sharing the prefix (`[gallery-item]` for `gallery`) never match. Tags
    /// that fail to parse are skipped.
    pub fn find(text: &str, name: &str) -> Option<ShortcodeSpan> {
        let needle = format!("[{}", name);
        let mut from = 0;
        while let Some(rel) = text[from..].find(&needle) {
            let start = from + rel;
            from = start + needle.len();

            let escaped = text[..start].ends_with('[');
            let bounded = matches!(
                text[from..].chars().next(),
                Some(c) if c.is_whitespace() || c == '/' || c == ']'
            );
            if escaped || !bounded {
                continue;
            }

            if let Ok(parsed) = parse_prefix(&text[start..]) {
                return Some(ShortcodeSpan {
                    range: start..start + parsed.len,
                    name_end: start + parsed.name_end,
                    attr_ranges: parsed
                        .attr_ranges
                        .into_iter()
                        .map(|r| start + r.start..start + r.end)
                        .collect(),
                    shortcode: parsed.shortcode,
                });
            }
        }
        None
    }

    /// Value of the first attribute named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.is_key(key))
            .map(|a| a.value.as_str())
    }

    /// Whether an attribute `key` with exactly `value` is present.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Set `key` to `value`.
    ///
    /// An existing attribute is updated in place (keeping its quote style);
    /// otherwise the attribute is inserted directly after the name. Returns
    /// whether the tag changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.is_key(key)) {
            if attr.value == value {
                return false;
            }
            attr.value = value.to_string();
            if attr.quote.is_none() && needs_quotes(value) {
                attr.quote = Some('"');
            }
            return true;
        }
        self.attrs.insert(0, ShortcodeAttr::named(key, value));
        true
    }

    /// Remove the first attribute named `key`.
    pub fn remove(&mut self, key: &str) -> Option<ShortcodeAttr> {
        let index = self.attrs.iter().position(|a| a.is_key(key))?;
        Some(self.attrs.remove(index))
    }

    /// Remove `key` only when it currently holds `value`. Returns whether it was removed.
    pub fn remove_value(&mut self, key: &str, value: &str) -> bool {
        if self.contains(key, value) {
            self.remove(key);
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        for attr in &self.attrs {
            write!(f, " {}", attr)?;
        }
        if self.self_closing {
            f.write_str(" /")?;
        }
        f.write_char(']')
    }
}

impl std::str::FromStr for Shortcode {
    type Err = ShortcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Byte cursor over the tag source.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn quoted(&mut self, quote: char) -> Result<&'a str, ShortcodeError> {
        let offset = self.pos;
        self.bump();
        let Some(len) = self.rest().find(quote) else {
            return Err(ShortcodeError::UnterminatedQuote { quote, offset });
        };
        let value = &self.rest()[..len];
        self.pos += len + quote.len_utf8();
        Ok(value)
    }

    fn closes_self(&self) -> bool {
        self.rest()
            .strip_prefix('/')
            .is_some_and(|after| after.trim_start().starts_with(']'))
    }
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '[' | ']' | '/' | '"' | '\'' | '=' | '<' | '>')
}

fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | ']' | '"' | '\'')
}

fn is_bare_value_char(c: char) -> bool {
    !c.is_whitespace() && c != ']'
}

/// Opening tag parsed from the start of a string, with source offsets.
struct Parsed {
    shortcode: Shortcode,
    name_end: usize,
    attr_ranges: Vec<Range<usize>>,
    len: usize,
}

/// Parse an opening tag at the start of `text`.
fn parse_prefix(text: &str) -> Result<Parsed, ShortcodeError> {
    let mut cursor = Cursor { src: text, pos: 0 };
    match cursor.peek() {
        Some('[') => cursor.bump(),
        found => return Err(ShortcodeError::MissingOpenBracket { found }),
    }

    let name_start = cursor.pos;
    let name = cursor.take_while(is_name_char);
    if name.is_empty() {
        return Err(match cursor.peek() {
            None => ShortcodeError::Unterminated,
            Some(_) => ShortcodeError::EmptyName { offset: name_start },
        });
    }

    let name_end = cursor.pos;
    let mut shortcode = Shortcode::new(name);
    let mut attr_ranges = Vec::new();
    loop {
        cursor.skip_whitespace();
        let attr_start = cursor.pos;
        let attr = match cursor.peek() {
            None => return Err(ShortcodeError::Unterminated),
            Some(']') => {
                cursor.bump();
                break;
            }
            Some('/') if cursor.closes_self() => {
                cursor.bump();
                cursor.skip_whitespace();
                cursor.bump();
                shortcode.self_closing = true;
                break;
            }
            Some(q @ ('"' | '\'')) => ShortcodeAttr {
                key: None,
                value: cursor.quoted(q)?.to_string(),
                quote: Some(q),
            },
            Some(_) => {
                let key = cursor.take_while(is_key_char);
                if key.is_empty() {
                    // Stray `=`: keep it as a bare value.
                    ShortcodeAttr {
                        key: None,
                        value: cursor.take_while(is_bare_value_char).to_string(),
                        quote: None,
                    }
                } else if cursor.peek() != Some('=') {
                    ShortcodeAttr {
                        key: None,
                        value: key.to_string(),
                        quote: None,
                    }
                } else {
                    cursor.bump();
                    match cursor.peek() {
                        Some(q @ ('"' | '\'')) => ShortcodeAttr {
                            key: Some(key.to_string()),
                            value: cursor.quoted(q)?.to_string(),
                            quote: Some(q),
                        },
                        _ => ShortcodeAttr {
                            key: Some(key.to_string()),
                            value: cursor.take_while(is_bare_value_char).to_string(),
                            quote: None,
                        },
                    }
                }
            }
        };
        shortcode.attrs.push(attr);
        attr_ranges.push(attr_start..cursor.pos);
    }

    Ok(Parsed {
        shortcode,
        name_end,
        attr_ranges,
        len: cursor.pos,
    })
}
