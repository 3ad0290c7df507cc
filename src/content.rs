//! The content document: a loosely-typed tree of optional sections.
//!
//! Every field is optional. An absent field means "leave the existing
//! page content unchanged"; absence never deletes or clears anything.
//! Unknown keys in the JSON are ignored.

use serde::{Deserialize, Serialize};

/// A parsed content document.
///
/// Mirrors the fixed JSON schema: `site`, `images`, `content.hero`,
/// `content.contact`, `styles.colors`. The tree is immutable after load;
/// a session holds it for the lifetime of the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContent {
    /// Site-wide metadata (title, meta description).
    pub site: Option<SiteInfo>,
    /// Replacement URLs for the page's known images.
    pub images: Option<ImageSet>,
    /// Text content sections.
    pub content: Option<ContentSection>,
    /// Theme styling.
    pub styles: Option<StyleSection>,
}

impl SiteContent {
    /// Parse a content document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The hero section, if the document carries one.
    pub fn hero(&self) -> Option<&HeroContent> {
        self.content.as_ref()?.hero.as_ref()
    }

    /// The contact section, if the document carries one.
    pub fn contact(&self) -> Option<&ContactInfo> {
        self.content.as_ref()?.contact.as_ref()
    }

    /// The theme colors, if the document carries them.
    pub fn colors(&self) -> Option<&ThemeColors> {
        self.styles.as_ref()?.colors.as_ref()
    }
}

/// Site-wide metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteInfo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Replacement URLs for the four known page images.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    pub logo: Option<String>,
    pub hero: Option<String>,
    pub banner: Option<String>,
    #[serde(rename = "serviceArea")]
    pub service_area: Option<String>,
}

/// The `content` wrapper object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSection {
    pub hero: Option<HeroContent>,
    pub contact: Option<ContactInfo>,
}

/// Hero block text and call-to-action controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub text: Option<String>,
    pub cta: Option<CtaPair>,
}

/// The primary/secondary call-to-action pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CtaPair {
    pub primary: Option<CtaButton>,
    pub secondary: Option<CtaButton>,
}

/// One call-to-action control: label text and optional destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CtaButton {
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// The `styles` wrapper object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSection {
    pub colors: Option<ThemeColors>,
}

/// Theme colors as CSS color strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: Option<String>,
    pub accent: Option<String>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "site": {"title": "Acme Cleaning", "description": "We clean."},
            "images": {"logo": "/img/new-logo.png", "serviceArea": "/img/area.png"},
            "content": {
                "hero": {
                    "title": "Spotless",
                    "cta": {"primary": {"text": "Get a quote", "link": "/quote"}}
                },
                "contact": {"phone": "(555) 123-4567", "email": "hi@acme.test"}
            },
            "styles": {"colors": {"primary": "#112233"}}
        }"#;

        let content = SiteContent::from_json(json).unwrap();
        assert_eq!(content.site.as_ref().unwrap().title.as_deref(), Some("Acme Cleaning"));
        assert_eq!(
            content.images.as_ref().unwrap().service_area.as_deref(),
            Some("/img/area.png")
        );
        let hero = content.hero().unwrap();
        assert_eq!(hero.title.as_deref(), Some("Spotless"));
        assert!(hero.subtitle.is_none());
        let primary = hero.cta.as_ref().unwrap().primary.as_ref().unwrap();
        assert_eq!(primary.link.as_deref(), Some("/quote"));
        assert_eq!(content.contact().unwrap().email.as_deref(), Some("hi@acme.test"));
        assert_eq!(content.colors().unwrap().primary.as_deref(), Some("#112233"));
    }

    #[test]
    fn test_empty_document_is_all_absent() {
        let content = SiteContent::from_json("{}").unwrap();
        assert!(content.site.is_none());
        assert!(content.images.is_none());
        assert!(content.hero().is_none());
        assert!(content.contact().is_none());
        assert!(content.colors().is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content =
            SiteContent::from_json(r#"{"site": {"title": "T", "tagline": "x"}, "extra": 1}"#)
                .unwrap();
        assert_eq!(content.site.unwrap().title.as_deref(), Some("T"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SiteContent::from_json("{not json").is_err());
    }
}
