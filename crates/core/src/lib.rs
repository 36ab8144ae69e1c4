#![deny(missing_docs)]
//! ampblocks core: shortcode parsing, gallery flag rewriting and fit-text helpers.

/// Error types.
pub mod error;
/// `<amp-fit-text>` extraction, wrapping and validation.
pub mod fit_text;
/// Gallery shortcode carousel/lightbox flags.
pub mod gallery;
/// Structured shortcode opening tags.
pub mod shortcode;

pub use error::ShortcodeError;
pub use fit_text::{FitTextNotice, FitTextSettings, extract_fit_text_content, wrap_fit_text};
pub use gallery::{
    GALLERY_SHORTCODE, GalleryToggles, add_carousel_disabled_flag, add_lightbox_enabled_flag,
    has_carousel_disabled_flag, has_lightbox_enabled_flag, is_gallery_shortcode,
    remove_carousel_disabled_flag, remove_lightbox_enabled_flag, rewrite_gallery_shortcode,
};
pub use shortcode::{Shortcode, ShortcodeAttr, ShortcodeSpan};
