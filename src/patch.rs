//! Apply a content document to a parsed page.
//!
//! A fixed sequence of independent, best-effort patches over the same
//! document. Each patch is skipped entirely when its source field or its
//! target element is absent, and no patch aborts the others. Re-applying
//! the same document produces the same final page state.

use scraper::Selector;

use crate::content::{CtaButton, SiteContent};
use crate::contract::PageContract;
use crate::dom::PageDocument;

/// CSS custom property receiving `styles.colors.primary`.
const PRIMARY_COLOR_PROP: &str = "--primary-color";
/// CSS custom property receiving `styles.colors.accent`.
const ACCENT_COLOR_PROP: &str = "--accent-color";
/// CSS custom property receiving `styles.colors.text`.
const TEXT_COLOR_PROP: &str = "--text-color";

/// Patch the page with every value the content document carries.
pub fn apply_content(doc: &mut PageDocument, content: &SiteContent, contract: &PageContract) {
    // 1. Title and meta description
    apply_site_info(doc, content);

    // 2. Images, matched by src substring
    apply_images(doc, content, contract);

    // 3. Hero block and CTA controls
    apply_hero(doc, content, contract);

    // 4. Contact links and legacy literals
    apply_contact(doc, content, contract);

    // 5. Theme colors on the root element
    apply_theme(doc, content);
}

// ── Site info ───────────────────────────────────────────────────────────────

fn apply_site_info(doc: &mut PageDocument, content: &SiteContent) {
    let Some(site) = content.site.as_ref() else {
        return;
    };

    if let Some(title) = site.title.as_deref() {
        let sel = Selector::parse("title").unwrap();
        if let Some(id) = doc.first_id(&sel) {
            doc.set_text(id, title);
            tracing::debug!("patched page title");
        }
    }

    if let Some(description) = site.description.as_deref() {
        let sel = Selector::parse(r#"meta[name="description"]"#).unwrap();
        if let Some(id) = doc.first_id(&sel) {
            doc.set_attr(id, "content", description);
            tracing::debug!("patched meta description");
        }
    }
}

// ── Images ──────────────────────────────────────────────────────────────────

fn apply_images(doc: &mut PageDocument, content: &SiteContent, contract: &PageContract) {
    let Some(images) = content.images.as_ref() else {
        return;
    };

    // The logo appears in several places (header, footer); the rest are
    // single placements.
    if let Some(url) = images.logo.as_deref() {
        set_img_src(doc, &contract.logo_src, url, true);
    }
    if let Some(url) = images.hero.as_deref() {
        set_img_src(doc, &contract.hero_src, url, false);
    }
    if let Some(url) = images.banner.as_deref() {
        set_img_src(doc, &contract.banner_src, url, false);
    }
    if let Some(url) = images.service_area.as_deref() {
        set_img_src(doc, &contract.service_area_src, url, false);
    }
}

fn set_img_src(doc: &mut PageDocument, src_fragment: &str, url: &str, all: bool) {
    let Ok(sel) = Selector::parse(&PageContract::img_selector(src_fragment)) else {
        return;
    };
    let ids = if all {
        doc.select_ids(&sel)
    } else {
        doc.first_id(&sel).into_iter().collect()
    };
    for id in ids {
        doc.set_attr(id, "src", url);
        tracing::debug!("patched image src matching {src_fragment}");
    }
}

// ── Hero block ──────────────────────────────────────────────────────────────

fn apply_hero(doc: &mut PageDocument, content: &SiteContent, contract: &PageContract) {
    let Some(hero) = content.hero() else {
        return;
    };

    set_marked_text(doc, contract, &contract.hero_title_key, hero.title.as_deref());
    set_marked_text(doc, contract, &contract.hero_subtitle_key, hero.subtitle.as_deref());
    set_marked_text(doc, contract, &contract.hero_text_key, hero.text.as_deref());

    if let Some(cta) = hero.cta.as_ref() {
        apply_cta(doc, contract, &contract.cta_primary_key, cta.primary.as_ref());
        apply_cta(doc, contract, &contract.cta_secondary_key, cta.secondary.as_ref());
    }
}

fn set_marked_text(doc: &mut PageDocument, contract: &PageContract, key: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    let Ok(sel) = Selector::parse(&contract.marker_selector(key)) else {
        return;
    };
    if let Some(id) = doc.first_id(&sel) {
        doc.set_text(id, value);
        tracing::debug!("patched text marked {key}");
    }
}

/// A CTA control is patched only when its label is present; the link is
/// rewritten only when the control is an anchor or sits inside one.
fn apply_cta(doc: &mut PageDocument, contract: &PageContract, key: &str, button: Option<&CtaButton>) {
    let Some(button) = button else {
        return;
    };
    let Some(text) = button.text.as_deref() else {
        return;
    };
    let Ok(sel) = Selector::parse(&contract.marker_selector(key)) else {
        return;
    };
    let Some(id) = doc.first_id(&sel) else {
        return;
    };

    doc.set_text(id, text);
    if let Some(link) = button.link.as_deref() {
        if let Some(anchor) = doc.closest_anchor(id) {
            doc.set_attr(anchor, "href", link);
            tracing::debug!("patched CTA link marked {key}");
        }
    }
}

// ── Contact ─────────────────────────────────────────────────────────────────

fn apply_contact(doc: &mut PageDocument, content: &SiteContent, contract: &PageContract) {
    let Some(contact) = content.contact() else {
        return;
    };

    if let Some(phone) = contact.phone.as_deref() {
        let href = format!("tel:{}", strip_non_digits(phone));
        let sel = Selector::parse(r#"a[href^="tel:"]"#).unwrap();
        for id in doc.select_ids(&sel) {
            doc.set_attr(id, "href", &href);
        }
        let touched = doc.replace_in_text_nodes(&contract.legacy_phone, phone);
        tracing::debug!("patched phone contact, {touched} text node(s) rewritten");
    }

    if let Some(email) = contact.email.as_deref() {
        let href = format!("mailto:{email}");
        let sel = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
        for id in doc.select_ids(&sel) {
            doc.set_attr(id, "href", &href);
        }
        let touched = doc.replace_in_text_nodes(&contract.legacy_email, email);
        tracing::debug!("patched email contact, {touched} text node(s) rewritten");
    }
}

/// Keep only ASCII digits, the canonical `tel:` form.
fn strip_non_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

// ── Theme ───────────────────────────────────────────────────────────────────

fn apply_theme(doc: &mut PageDocument, content: &SiteContent) {
    let Some(colors) = content.colors() else {
        return;
    };

    if let Some(primary) = colors.primary.as_deref() {
        doc.set_root_style_property(PRIMARY_COLOR_PROP, primary);
    }
    if let Some(accent) = colors.accent.as_deref() {
        doc.set_root_style_property(ACCENT_COLOR_PROP, accent);
    }
    if let Some(text) = colors.text.as_deref() {
        doc.set_root_style_property(TEXT_COLOR_PROP, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html style="--primary-color: #000000">
<head>
    <title>Static Title</title>
    <meta name="description" content="Static description">
</head>
<body>
    <header><img class="brand" src="assets/logo.png"></header>
    <section class="hero">
        <img src="assets/group.jpeg">
        <h1 data-i18n="heroTitle">Old Hero</h1>
        <h2 data-i18n="heroSubtitle">Old Subtitle</h2>
        <p data-i18n="heroText">Old hero text</p>
        <a href="#old-quote"><span data-i18n="getQuote">Quote</span></a>
        <span data-i18n="ourServices">Services</span>
    </section>
    <img src="assets/banner.png">
    <img src="assets/servicearea.png">
    <footer>
        <img class="brand" src="assets/logo.png">
        <p>Call us at (575) 520-2483 or write to <em>chiosclean@gmail.com</em></p>
        <a href="tel:5755202483">(575) 520-2483</a>
        <a href="mailto:chiosclean@gmail.com">email us</a>
    </footer>
</body>
</html>"#;

    fn sample_page() -> PageDocument {
        PageDocument::parse(SAMPLE_PAGE)
    }

    fn apply(doc: &mut PageDocument, json: &str) {
        let content = SiteContent::from_json(json).unwrap();
        apply_content(doc, &content, &PageContract::default());
    }

    fn sel(selector: &str) -> Selector {
        Selector::parse(selector).unwrap()
    }

    #[test]
    fn test_title_and_meta_description() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"site": {"title": "New Title", "description": "New description"}}"#,
        );
        let title = doc.first_id(&sel("title")).unwrap();
        assert_eq!(doc.text(title), "New Title");
        let meta = doc.first_id(&sel(r#"meta[name="description"]"#)).unwrap();
        assert_eq!(doc.attr(meta, "content").as_deref(), Some("New description"));
    }

    #[test]
    fn test_logo_patches_every_match_hero_first_only() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"images": {"logo": "https://cdn.test/l.png", "hero": "https://cdn.test/h.jpeg"}}"#,
        );
        let logos = doc.select_ids(&sel("img.brand"));
        assert_eq!(logos.len(), 2);
        for id in logos {
            assert_eq!(doc.attr(id, "src").as_deref(), Some("https://cdn.test/l.png"));
        }
        let hero = doc.first_id(&sel("section.hero img")).unwrap();
        assert_eq!(doc.attr(hero, "src").as_deref(), Some("https://cdn.test/h.jpeg"));
        // Untouched images keep their shipped sources.
        assert!(doc.first_id(&sel(r#"img[src="assets/banner.png"]"#)).is_some());
    }

    #[test]
    fn test_hero_text_and_ctas() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"content": {"hero": {
                "title": "Fresh Title",
                "text": "Fresh body",
                "cta": {
                    "primary": {"text": "Get a quote", "link": "/quote"},
                    "secondary": {"text": "What we do", "link": "/services"}
                }
            }}}"#,
        );
        let title = doc.first_id(&sel(r#"[data-i18n="heroTitle"]"#)).unwrap();
        assert_eq!(doc.text(title), "Fresh Title");
        // Subtitle was absent from the document: untouched.
        let subtitle = doc.first_id(&sel(r#"[data-i18n="heroSubtitle"]"#)).unwrap();
        assert_eq!(doc.text(subtitle), "Old Subtitle");

        // Primary CTA is wrapped in an anchor: text and link both change.
        let primary = doc.first_id(&sel(r#"[data-i18n="getQuote"]"#)).unwrap();
        assert_eq!(doc.text(primary), "Get a quote");
        let anchor = doc.closest_anchor(primary).unwrap();
        assert_eq!(doc.attr(anchor, "href").as_deref(), Some("/quote"));

        // Secondary CTA has no anchor: text changes, no link to rewrite.
        let secondary = doc.first_id(&sel(r#"[data-i18n="ourServices"]"#)).unwrap();
        assert_eq!(doc.text(secondary), "What we do");
        assert!(doc.closest_anchor(secondary).is_none());
    }

    #[test]
    fn test_cta_without_text_is_skipped_entirely() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"content": {"hero": {"cta": {"primary": {"link": "/quote"}}}}}"#,
        );
        let primary = doc.first_id(&sel(r#"[data-i18n="getQuote"]"#)).unwrap();
        assert_eq!(doc.text(primary), "Quote");
        let anchor = doc.closest_anchor(primary).unwrap();
        assert_eq!(doc.attr(anchor, "href").as_deref(), Some("#old-quote"));
    }

    #[test]
    fn test_phone_rewrites_tel_links_and_literal() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"content": {"contact": {"phone": "(555) 123-4567"}}}"#,
        );
        for id in doc.select_ids(&sel(r#"a[href^="tel:"]"#)) {
            assert_eq!(doc.attr(id, "href").as_deref(), Some("tel:5551234567"));
        }
        let html = doc.html();
        assert!(!html.contains("(575) 520-2483"));
        assert!(html.contains("Call us at (555) 123-4567"));
        assert!(html.contains(">(555) 123-4567</a>"));
    }

    #[test]
    fn test_email_rewrites_mailto_links_and_literal() {
        let mut doc = sample_page();
        apply(
            &mut doc,
            r#"{"content": {"contact": {"email": "new@example.com"}}}"#,
        );
        for id in doc.select_ids(&sel(r#"a[href^="mailto:"]"#)) {
            assert_eq!(doc.attr(id, "href").as_deref(), Some("mailto:new@example.com"));
        }
        let html = doc.html();
        assert!(!html.contains("chiosclean@gmail.com"));
        // Replacement happens inside the <em>, markup intact.
        assert!(html.contains("<em>new@example.com</em>"));
    }

    #[test]
    fn test_theme_colors_upsert_only_present_ones() {
        let mut doc = sample_page();
        apply(&mut doc, r#"{"styles": {"colors": {"primary": "#112233"}}}"#);
        let style = doc.attr(doc.root_id(), "style").unwrap();
        assert_eq!(style, "--primary-color: #112233");

        apply(&mut doc, r#"{"styles": {"colors": {"accent": "#445566"}}}"#);
        let style = doc.attr(doc.root_id(), "style").unwrap();
        assert_eq!(style, "--primary-color: #112233; --accent-color: #445566");
    }

    #[test]
    fn test_empty_document_changes_nothing() {
        let mut doc = sample_page();
        let before = doc.html();
        apply(&mut doc, "{}");
        assert_eq!(doc.html(), before);
    }

    #[test]
    fn test_applying_twice_equals_applying_once() {
        let json = r#"{
            "site": {"title": "T2", "description": "D2"},
            "images": {"logo": "https://cdn.test/l.png"},
            "content": {
                "hero": {"title": "H2", "cta": {"primary": {"text": "Go", "link": "/go"}}},
                "contact": {"phone": "(555) 123-4567", "email": "new@example.com"}
            },
            "styles": {"colors": {"primary": "#112233", "text": "#445566"}}
        }"#;
        let mut once = sample_page();
        apply(&mut once, json);
        let mut twice = sample_page();
        apply(&mut twice, json);
        apply(&mut twice, json);
        assert_eq!(once.html(), twice.html());
    }

    #[test]
    fn test_strip_non_digits() {
        assert_eq!(strip_non_digits("(555) 123-4567"), "5551234567");
        assert_eq!(strip_non_digits("+1 555.123.4567"), "15551234567");
        assert_eq!(strip_non_digits(""), "");
    }
}
