//! The DOM contract: what the host page must expose for patches to land.
//!
//! The original markup located hero text by `data-i18n` markers, images by
//! filename substrings, and contact strings by two hard-coded placeholder
//! literals. Those values are fragile coupling to one particular page, so
//! they live here as overridable fields instead of constants buried in the
//! patch code. The defaults reproduce the original markup's contract.

/// Marker attribute carried by hero and CTA elements.
pub const DEFAULT_MARKER_ATTR: &str = "data-i18n";

/// Selectors, markers, and legacy literals for one host page.
#[derive(Debug, Clone)]
pub struct PageContract {
    /// Attribute used to tag patchable text elements.
    pub marker_attr: String,
    /// Marker key of the hero title element.
    pub hero_title_key: String,
    /// Marker key of the hero subtitle element.
    pub hero_subtitle_key: String,
    /// Marker key of the hero body text element.
    pub hero_text_key: String,
    /// Marker key of the primary CTA control.
    pub cta_primary_key: String,
    /// Marker key of the secondary CTA control.
    pub cta_secondary_key: String,
    /// `src` substring identifying the logo image(s). Matches all.
    pub logo_src: String,
    /// `src` substring identifying the hero image. First match only.
    pub hero_src: String,
    /// `src` substring identifying the banner image. First match only.
    pub banner_src: String,
    /// `src` substring identifying the service-area image. First match only.
    pub service_area_src: String,
    /// Placeholder phone number replaced wherever it occurs in page text.
    pub legacy_phone: String,
    /// Placeholder email replaced wherever it occurs in page text.
    pub legacy_email: String,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            marker_attr: DEFAULT_MARKER_ATTR.to_string(),
            hero_title_key: "heroTitle".to_string(),
            hero_subtitle_key: "heroSubtitle".to_string(),
            hero_text_key: "heroText".to_string(),
            cta_primary_key: "getQuote".to_string(),
            cta_secondary_key: "ourServices".to_string(),
            logo_src: "logo.png".to_string(),
            hero_src: "group.jpeg".to_string(),
            banner_src: "banner.png".to_string(),
            service_area_src: "servicearea.png".to_string(),
            legacy_phone: "(575) 520-2483".to_string(),
            legacy_email: "chiosclean@gmail.com".to_string(),
        }
    }
}

impl PageContract {
    /// CSS selector for an element tagged with the given marker key.
    pub fn marker_selector(&self, key: &str) -> String {
        format!(r#"[{}="{}"]"#, self.marker_attr, key)
    }

    /// CSS selector for images whose `src` contains the given substring.
    pub fn img_selector(src_fragment: &str) -> String {
        format!(r#"img[src*="{src_fragment}"]"#)
    }
}
