//! Gallery shortcode flag rewriting.
//!
//! AMP galleries are controlled by two shortcode attributes: `amp-carousel=false`
//! turns the default carousel off and `amp-lightbox=true` turns the lightbox on.
//! The helpers here read and toggle those attributes on the first `[gallery]`
//! tag of a block's text. Only the flag's own bytes change; the tag's spacing
//! and quoting stay as written.

use std::borrow::Cow;

use crate::shortcode::{Shortcode, ShortcodeAttr};

/// Shortcode name the flags apply to.
pub const GALLERY_SHORTCODE: &str = "gallery";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flag {
    CarouselDisabled,
    LightboxEnabled,
}

impl Flag {
    fn key(self) -> &'static str {
        match self {
            Flag::CarouselDisabled => "amp-carousel",
            Flag::LightboxEnabled => "amp-lightbox",
        }
    }

    fn value(self) -> &'static str {
        match self {
            Flag::CarouselDisabled => "false",
            Flag::LightboxEnabled => "true",
        }
    }
}

fn has_flag(text: &str, flag: Flag) -> bool {
    Shortcode::find(text, GALLERY_SHORTCODE)
        .is_some_and(|span| span.shortcode.contains(flag.key(), flag.value()))
}

fn edit_flag(text: &str, flag: Flag, present: bool) -> Cow<'_, str> {
    let Some(span) = Shortcode::find(text, GALLERY_SHORTCODE) else {
        return Cow::Borrowed(text);
    };

    let (key, value) = (flag.key(), flag.value());
    let index = span.shortcode.attrs.iter().position(|a| a.is_key(key));
    let edited = match (present, index) {
        (true, None) => Some(span.insert_attr(text, &ShortcodeAttr::named(key, value))),
        (true, Some(i)) if span.shortcode.attrs[i].value != value => {
            let mut attr = span.shortcode.attrs[i].clone();
            attr.value = value.to_string();
            span.replace_attr(text, i, &attr)
        }
        (false, Some(i)) if span.shortcode.attrs[i].value == value => span.remove_attr(text, i),
        _ => None,
    };

    match edited {
        Some(edited) => Cow::Owned(edited),
        None => Cow::Borrowed(text),
    }
}

/// Whether the first gallery shortcode in `text` disables the carousel.
pub fn has_carousel_disabled_flag(text: &str) -> bool {
    has_flag(text, Flag::CarouselDisabled)
}

/// Whether the first gallery shortcode in `text` enables the lightbox.
pub fn has_lightbox_enabled_flag(text: &str) -> bool {
    has_flag(text, Flag::LightboxEnabled)
}

/// Drop `amp-carousel=false` from the gallery shortcode. Borrowed when absent.
pub fn remove_carousel_disabled_flag(text: &str) -> Cow<'_, str> {
    edit_flag(text, Flag::CarouselDisabled, false)
}

/// Drop `amp-lightbox=true` from the gallery shortcode. Borrowed when absent.
pub fn remove_lightbox_enabled_flag(text: &str) -> Cow<'_, str> {
    edit_flag(text, Flag::LightboxEnabled, false)
}

/// Insert `amp-carousel=false` right after `[gallery`.
///
/// Idempotent: text already carrying the flag, or holding no gallery
/// shortcode, comes back borrowed.
pub fn add_carousel_disabled_flag(text: &str) -> Cow<'_, str> {
    edit_flag(text, Flag::CarouselDisabled, true)
}

/// Insert `amp-lightbox=true` right after `[gallery`. Idempotent.
pub fn add_lightbox_enabled_flag(text: &str) -> Cow<'_, str> {
    edit_flag(text, Flag::LightboxEnabled, true)
}

/// Loose check used to decide whether a shortcode block gets gallery controls.
pub fn is_gallery_shortcode(text: &str) -> bool {
    text.contains(GALLERY_SHORTCODE)
}

/// Editor toggles driving [`rewrite_gallery_shortcode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GalleryToggles {
    /// "Display as carousel" is on.
    pub carousel: bool,
    /// "Add lightbox effect" is on.
    pub lightbox: bool,
}

/// Bring the gallery shortcode's flags in line with the editor toggles.
///
/// Returns borrowed text when nothing had to change.
pub fn rewrite_gallery_shortcode(text: &str, toggles: GalleryToggles) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);

    if !toggles.lightbox {
        current = apply(current, remove_lightbox_enabled_flag);
    }

    if toggles.carousel {
        current = apply(current, remove_carousel_disabled_flag);
        if !toggles.lightbox {
            return current;
        }
    } else {
        current = apply(current, add_carousel_disabled_flag);
    }

    if toggles.lightbox {
        current = apply(current, add_lightbox_enabled_flag);
    }

    if let Cow::Owned(rewritten) = &current {
        log::debug!("rewrote gallery shortcode: {:?} -> {:?}", text, rewritten);
    }
    current
}

fn apply<'a>(current: Cow<'a, str>, edit: fn(&str) -> Cow<'_, str>) -> Cow<'a, str> {
    let edited = match edit(&current) {
        Cow::Owned(next) => Some(next),
        Cow::Borrowed(_) => None,
    };
    match edited {
        Some(next) => Cow::Owned(next),
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "[gallery ids=\"1,2,3\"]";

    #[test]
    fn detects_flags_on_gallery_only() {
        assert!(has_carousel_disabled_flag("[gallery amp-carousel=false]"));
        assert!(has_lightbox_enabled_flag("[gallery ids=1 amp-lightbox=true]"));
        assert!(!has_carousel_disabled_flag("[gallery amp-carousel=true]"));
        assert!(!has_carousel_disabled_flag("[video amp-carousel=false]"));
        assert!(!has_lightbox_enabled_flag(""));
    }

    #[test]
    fn quoted_flag_values_count() {
        assert!(has_carousel_disabled_flag("[gallery amp-carousel=\"false\"]"));
        assert_eq!(
            remove_carousel_disabled_flag("[gallery amp-carousel=\"false\" ids=\"1\"]"),
            "[gallery ids=\"1\"]"
        );
    }

    #[test]
    fn removal_without_flag_is_identity() {
        for s in ["", "plain text", PLAIN, "[gallery  ids=1]", "[gallery amp-carousel=true]"] {
            assert!(matches!(remove_carousel_disabled_flag(s), Cow::Borrowed(b) if b == s));
            assert!(matches!(remove_lightbox_enabled_flag(s), Cow::Borrowed(b) if b == s));
        }
    }

    #[test]
    fn add_then_remove_round_trips() {
        for s in [
            PLAIN,
            "[gallery]",
            "<p>[gallery columns=2 link='file']</p>",
            "[gallery  ids=\"1,2,3\"\tcolumns=2]",
            "[gallery\n  ids=\"1,2,3\"  columns=2 ]",
            "[gallery ids=1 / ]",
        ] {
            let added = add_carousel_disabled_flag(s);
            assert!(has_carousel_disabled_flag(&added));
            assert_eq!(remove_carousel_disabled_flag(&added), s);

            let added = add_lightbox_enabled_flag(s);
            assert!(has_lightbox_enabled_flag(&added));
            assert_eq!(remove_lightbox_enabled_flag(&added), s);
        }
    }

    #[test]
    fn removal_keeps_irregular_spacing() {
        assert_eq!(
            remove_carousel_disabled_flag("[gallery amp-carousel=false\n  ids=\"1,2,3\"  columns=2 ]"),
            "[gallery\n  ids=\"1,2,3\"  columns=2 ]"
        );
        assert_eq!(
            remove_lightbox_enabled_flag("[gallery\tids=1  amp-lightbox=true ]"),
            "[gallery\tids=1 ]"
        );
    }

    #[test]
    fn add_updates_existing_value_in_place() {
        assert_eq!(
            add_carousel_disabled_flag("[gallery  amp-carousel=\"true\"\tids=1 ]"),
            "[gallery  amp-carousel=\"false\"\tids=1 ]"
        );
    }

    #[test]
    fn add_inserts_directly_after_name() {
        assert_eq!(
            add_carousel_disabled_flag(PLAIN),
            "[gallery amp-carousel=false ids=\"1,2,3\"]"
        );
        assert_eq!(
            add_lightbox_enabled_flag(PLAIN),
            "[gallery amp-lightbox=true ids=\"1,2,3\"]"
        );
    }

    #[test]
    fn add_is_idempotent() {
        let once = add_carousel_disabled_flag(PLAIN).into_owned();
        let twice = add_carousel_disabled_flag(&once);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice.matches("amp-carousel").count(), 1);
    }

    #[test]
    fn add_without_gallery_is_identity() {
        assert_eq!(add_carousel_disabled_flag("[video src=a.mp4]"), "[video src=a.mp4]");
        assert_eq!(add_lightbox_enabled_flag("gallery"), "gallery");
    }

    #[test]
    fn gallery_detection_is_substring_based() {
        assert!(is_gallery_shortcode(PLAIN));
        assert!(is_gallery_shortcode("my gallery"));
        assert!(!is_gallery_shortcode("[video]"));
    }

    #[test]
    fn carousel_off_lightbox_off_disables_carousel() {
        let out = rewrite_gallery_shortcode(PLAIN, GalleryToggles::default());
        assert_eq!(out, "[gallery amp-carousel=false ids=\"1,2,3\"]");
    }

    #[test]
    fn carousel_on_strips_flag() {
        let toggles = GalleryToggles {
            carousel: true,
            lightbox: false,
        };
        let out = rewrite_gallery_shortcode("[gallery amp-carousel=false ids=\"1,2,3\"]", toggles);
        assert_eq!(out, PLAIN);
    }

    #[test]
    fn lightbox_on_adds_flag() {
        let toggles = GalleryToggles {
            carousel: true,
            lightbox: true,
        };
        let out = rewrite_gallery_shortcode(PLAIN, toggles);
        assert_eq!(out, "[gallery amp-lightbox=true ids=\"1,2,3\"]");
    }

    #[test]
    fn lightbox_off_strips_lightbox_flag() {
        let toggles = GalleryToggles {
            carousel: true,
            lightbox: false,
        };
        let out = rewrite_gallery_shortcode("[gallery amp-lightbox=true ids=\"1,2,3\"]", toggles);
        assert_eq!(out, PLAIN);
    }

    #[test]
    fn both_flags_when_carousel_off_and_lightbox_on() {
        let toggles = GalleryToggles {
            carousel: false,
            lightbox: true,
        };
        let out = rewrite_gallery_shortcode(PLAIN, toggles);
        assert_eq!(
            out,
            "[gallery amp-lightbox=true amp-carousel=false ids=\"1,2,3\"]"
        );
    }

    #[test]
    fn already_consistent_text_is_borrowed() {
        let toggles = GalleryToggles {
            carousel: true,
            lightbox: false,
        };
        assert!(matches!(rewrite_gallery_shortcode(PLAIN, toggles), Cow::Borrowed(_)));

        let disabled = "[gallery amp-carousel=false ids=\"1,2,3\"]";
        let out = rewrite_gallery_shortcode(disabled, GalleryToggles::default());
        assert!(matches!(out, Cow::Borrowed(b) if b == disabled));
    }
}
