//! Block type identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

const EMBED_PREFIX: &str = "core-embed/";

/// Editor block type, parsed from the host's `namespace/name` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockName {
    /// `core/paragraph`
    Paragraph,
    /// `core/heading`
    Heading,
    /// `core/code`
    Code,
    /// `core/quote`
    Quote,
    /// `core/subhead`
    Subhead,
    /// `core/image`
    Image,
    /// `core/video`
    Video,
    /// `core/audio`
    Audio,
    /// `core/gallery`
    Gallery,
    /// `core/shortcode`
    Shortcode,
    /// `core-embed/<provider>`; holds the provider.
    Embed(String),
    /// Any block this extension does not know about.
    Other(String),
}

impl BlockName {
    /// Parse a host identifier. Never fails; unknown names become [`BlockName::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "core/paragraph" => Self::Paragraph,
            "core/heading" => Self::Heading,
            "core/code" => Self::Code,
            "core/quote" => Self::Quote,
            "core/subhead" => Self::Subhead,
            "core/image" => Self::Image,
            "core/video" => Self::Video,
            "core/audio" => Self::Audio,
            "core/gallery" => Self::Gallery,
            "core/shortcode" => Self::Shortcode,
            _ => match name.strip_prefix(EMBED_PREFIX) {
                Some(provider) if !provider.is_empty() => Self::Embed(provider.to_string()),
                _ => Self::Other(name.to_string()),
            },
        }
    }

    /// Embed block for `provider` (e.g. `youtube`).
    pub fn embed(provider: &str) -> Self {
        Self::Embed(provider.to_string())
    }

    /// Whether this is a `core-embed/*` block.
    pub fn is_embed(&self) -> bool {
        matches!(self, Self::Embed(_))
    }

    /// Whether the extension handles this block at all.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = match self {
            Self::Paragraph => "core/paragraph",
            Self::Heading => "core/heading",
            Self::Code => "core/code",
            Self::Quote => "core/quote",
            Self::Subhead => "core/subhead",
            Self::Image => "core/image",
            Self::Video => "core/video",
            Self::Audio => "core/audio",
            Self::Gallery => "core/gallery",
            Self::Shortcode => "core/shortcode",
            Self::Embed(provider) => return write!(f, "{}{}", EMBED_PREFIX, provider),
            Self::Other(name) => name,
        };
        f.write_str(fixed)
    }
}

impl From<&str> for BlockName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for BlockName {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<BlockName> for String {
    fn from(block: BlockName) -> Self {
        block.to_string()
    }
}
