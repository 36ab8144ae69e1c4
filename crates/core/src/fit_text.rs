//! `<amp-fit-text>` wrapping helpers.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

const OPEN_TAG: &str = "<amp-fit-text";
const CLOSE_TAG: &str = "</amp-fit-text>";

/// Return the inner content of the first `<amp-fit-text ...>...</amp-fit-text>` in `markup`.
///
/// Attributes on the opening tag are ignored and the shortest inner content
/// wins. Markup without a complete wrapper comes back unchanged.
///
/// # Examples
///
/// ```
/// use ampblocks_core::extract_fit_text_content;
///
/// assert_eq!(
///     extract_fit_text_content("<amp-fit-text height=\"50\">Hello</amp-fit-text>"),
///     "Hello"
/// );
/// assert_eq!(extract_fit_text_content("plain text"), "plain text");
/// ```
pub fn extract_fit_text_content(markup: &str) -> &str {
    let mut from = 0;
    while let Some(rel) = markup[from..].find(OPEN_TAG) {
        let after_name = from + rel + OPEN_TAG.len();
        from = after_name;

        let bounded = matches!(
            markup[after_name..].chars().next(),
            Some(c) if c == '>' || c == '/' || c.is_whitespace()
        );
        if !bounded {
            continue;
        }

        // Later openings cannot succeed where this one found no `>` or closing tag.
        let Some(gt) = markup[after_name..].find('>') else {
            return markup;
        };
        let inner_start = after_name + gt + 1;
        return match markup[inner_start..].find(CLOSE_TAG) {
            Some(len) => &markup[inner_start..inner_start + len],
            None => markup,
        };
    }
    markup
}

/// Font size bounds and container height for fit text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitTextSettings {
    /// Smallest font size the text may shrink to.
    pub min_font: u32,
    /// Largest font size the text may grow to.
    pub max_font: u32,
    /// Fixed container height.
    pub height: u32,
}

impl FitTextSettings {
    /// Default minimum font size.
    pub const DEFAULT_MIN_FONT: u32 = 14;
    /// Default maximum font size.
    pub const DEFAULT_MAX_FONT: u32 = 48;
    /// Default container height.
    pub const DEFAULT_HEIGHT: u32 = 50;

    /// Opening `<amp-fit-text>` tag; zero-valued settings are left out.
    pub fn opening_tag(&self) -> String {
        let mut tag = String::from("<amp-fit-text layout=\"fixed-height\"");
        for (name, value) in self.attributes() {
            write!(tag, " {}=\"{}\"", name, value).ok();
        }
        tag.push('>');
        tag
    }

    /// Non-zero settings as `(attribute, value)` pairs, in tag order.
    pub fn attributes(&self) -> Vec<(&'static str, u32)> {
        [
            ("min-font-size", self.min_font),
            ("max-font-size", self.max_font),
            ("height", self.height),
        ]
        .into_iter()
        .filter(|(_, value)| *value != 0)
        .collect()
    }

    /// Problems the editor should show next to the fit-text controls.
    pub fn validate(&self) -> Vec<FitTextNotice> {
        let mut notices = Vec::new();
        if self.height <= self.max_font {
            notices.push(FitTextNotice::HeightNotAboveMaxFont);
        }
        if self.min_font >= self.max_font {
            notices.push(FitTextNotice::MinFontNotBelowMaxFont);
        }
        notices
    }
}

impl Default for FitTextSettings {
    fn default() -> Self {
        Self {
            min_font: Self::DEFAULT_MIN_FONT,
            max_font: Self::DEFAULT_MAX_FONT,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

/// Wrap `content` in an `<amp-fit-text>` element built from `settings`.
pub fn wrap_fit_text(content: &str, settings: &FitTextSettings) -> String {
    let mut out = settings.opening_tag();
    out.push_str(content);
    out.push_str(CLOSE_TAG);
    out
}

/// Presentational warning about inconsistent fit-text settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitTextNotice {
    /// The container must be taller than the largest font.
    HeightNotAboveMaxFont,
    /// The minimum font size must be below the maximum.
    MinFontNotBelowMaxFont,
}

impl FitTextNotice {
    /// Message shown to the editor user.
    pub fn message(self) -> &'static str {
        match self {
            FitTextNotice::HeightNotAboveMaxFont => {
                "The height must be greater than the max font size."
            }
            FitTextNotice::MinFontNotBelowMaxFont => {
                "The min font size must less than the max font size."
            }
        }
    }
}

impl fmt::Display for FitTextNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
