//! Parsed page wrapper with the small mutation surface the patches need.
//!
//! `scraper` handles parsing and CSS selector matching; mutation goes
//! through the tree it exposes (`ego_tree`), keyed by `NodeId`. Selection
//! borrows the document, so callers collect ids first and mutate after.

use ego_tree::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::{namespace_url, ns, LocalName, QualName};
use scraper::node::{Node, Text};
use scraper::{ElementRef, Html, Selector};

/// A static HTML page parsed into a mutable tree.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails;
    /// malformed markup is repaired the way browsers repair it.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Serialize the page back to HTML, preserving the doctype.
    pub fn html(&self) -> String {
        let mut out = String::new();
        for child in self.html.tree.root().children() {
            match child.value() {
                Node::Doctype(doctype) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(doctype.name());
                    out.push('>');
                }
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        out.push_str(&element.html());
                    }
                }
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(&comment.comment);
                    out.push_str("-->");
                }
                _ => {}
            }
        }
        out
    }

    /// Ids of all elements matching the selector, in document order.
    pub fn select_ids(&self, selector: &Selector) -> Vec<NodeId> {
        self.html.select(selector).map(|el| el.id()).collect()
    }

    /// Id of the first element matching the selector.
    pub fn first_id(&self, selector: &Selector) -> Option<NodeId> {
        self.html.select(selector).next().map(|el| el.id())
    }

    /// Id of the root `<html>` element.
    pub fn root_id(&self) -> NodeId {
        self.html.root_element().id()
    }

    /// Replace the element's children with a single text node.
    pub fn set_text(&mut self, id: NodeId, value: &str) {
        let child_ids: Vec<NodeId> = match self.html.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => return,
        };
        for child_id in child_ids {
            if let Some(mut child) = self.html.tree.get_mut(child_id) {
                child.detach();
            }
        }
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.append(Node::Text(Text {
                text: StrTendril::from_slice(value),
            }));
        }
    }

    /// Set an attribute on an element, inserting it if absent.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(mut node) = self.html.tree.get_mut(id) else {
            return;
        };
        if let Node::Element(element) = node.value() {
            if let Some((_, existing)) = element
                .attrs
                .iter_mut()
                .find(|(key, _)| key.local.as_ref() == name)
            {
                *existing = StrTendril::from_slice(value);
            } else {
                element.attrs.insert(
                    QualName::new(None, ns!(), LocalName::from(name)),
                    StrTendril::from_slice(value),
                );
            }
        }
    }

    /// Read an attribute from an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        match self.html.tree.get(id)?.value() {
            Node::Element(element) => element.attr(name).map(str::to_string),
            _ => None,
        }
    }

    /// Concatenated descendant text of a node.
    pub fn text(&self, id: NodeId) -> String {
        let Some(node) = self.html.tree.get(id) else {
            return String::new();
        };
        let mut out = String::new();
        for descendant in node.descendants() {
            if let Node::Text(text) = descendant.value() {
                out.push_str(&text.text);
            }
        }
        out
    }

    /// Id of the given node if it is an `<a>`, else its nearest `<a>`
    /// ancestor. Mirrors `closest("a")`.
    pub fn closest_anchor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.html.tree.get(id)?;
        std::iter::once(node)
            .chain(node.ancestors())
            .find(|candidate| matches!(candidate.value(), Node::Element(el) if el.name() == "a"))
            .map(|anchor| anchor.id())
    }

    /// Replace a substring in every text node that contains it. Operating
    /// on text nodes keeps surrounding markup intact. Returns the number
    /// of nodes touched.
    pub fn replace_in_text_nodes(&mut self, needle: &str, replacement: &str) -> usize {
        if needle.is_empty() || needle == replacement {
            return 0;
        }
        let mut touched = 0;
        for node in self.html.tree.values_mut() {
            if let Node::Text(text) = node {
                if text.text.contains(needle) {
                    let updated = text.text.replace(needle, replacement);
                    text.text = StrTendril::from_slice(&updated);
                    touched += 1;
                }
            }
        }
        touched
    }

    /// Upsert one declaration in the root element's inline `style`,
    /// leaving unrelated declarations in place.
    pub fn set_root_style_property(&mut self, property: &str, value: &str) {
        let root = self.root_id();
        let current = self.attr(root, "style").unwrap_or_default();
        let updated = upsert_style_declaration(&current, property, value);
        self.set_attr(root, "style", &updated);
    }
}

/// Rewrite an inline style string with one declaration set to `value`.
fn upsert_style_declaration(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<(String, String)> = style
        .split(';')
        .filter_map(|declaration| {
            let declaration = declaration.trim();
            if declaration.is_empty() {
                return None;
            }
            let (name, val) = declaration.split_once(':')?;
            Some((name.trim().to_string(), val.trim().to_string()))
        })
        .collect();

    let value = value.trim();
    if let Some((_, existing)) = declarations
        .iter_mut()
        .find(|(name, _)| name == property)
    {
        *existing = value.to_string();
    } else {
        declarations.push((property.to_string(), value.to_string()));
    }

    declarations
        .iter()
        .map(|(name, val)| format!("{name}: {val}"))
        .collect::<Vec<_>>()
        .join("; ")
}
