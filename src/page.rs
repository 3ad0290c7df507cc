// Copyright 2026 Pagefill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Page session: one parsed page, at most one content load.
//!
//! A session starts `Unloaded` with the static markup as shipped. The
//! first `hydrate` call fetches the content document and applies it; on
//! success the session is `Loaded` for the rest of its lifetime and later
//! calls are no-ops. On failure the page keeps its static markup and the
//! failure is logged once, never surfaced.

use crate::content::SiteContent;
use crate::contract::PageContract;
use crate::dom::PageDocument;
use crate::fetch::ContentClient;
use crate::patch::apply_content;

/// Load lifecycle of a page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Static markup as shipped; no content document loaded.
    Unloaded,
    /// Content fetched and applied. Terminal for the session's lifetime.
    Loaded,
}

/// Owns one parsed page and its at-most-one loaded content document.
pub struct PageSession {
    document: PageDocument,
    contract: PageContract,
    content: Option<SiteContent>,
    attempted: bool,
}

impl PageSession {
    /// Parse a page with the default DOM contract.
    pub fn new(html: &str) -> Self {
        Self::with_contract(html, PageContract::default())
    }

    /// Parse a page with an explicit DOM contract.
    pub fn with_contract(html: &str, contract: PageContract) -> Self {
        Self {
            document: PageDocument::parse(html),
            contract,
            content: None,
            attempted: false,
        }
    }

    /// Fetch the content document from `url` and patch the page.
    ///
    /// Fires at most once per session, success or not: later calls return
    /// the settled state without another request, the way a page loads
    /// content once and changes again only on a full reload. Fetch and
    /// parse failures collapse to one logged diagnostic and the session
    /// stays `Unloaded`; the page keeps its static markup and zero
    /// patches are applied.
    pub async fn hydrate(&mut self, client: &ContentClient, url: &str) -> LoadState {
        if self.attempted {
            return self.state();
        }
        self.attempted = true;

        match client.fetch_content(url).await {
            Ok(content) => {
                apply_content(&mut self.document, &content, &self.contract);
                self.content = Some(content);
                tracing::info!("content loaded and applied");
                LoadState::Loaded
            }
            Err(e) => {
                // Fallback: the page keeps its default static content.
                tracing::error!("content load failed: {e}");
                LoadState::Unloaded
            }
        }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        if self.content.is_some() {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        }
    }

    /// The loaded content document, for inspection and debugging.
    pub fn content(&self) -> Option<&SiteContent> {
        self.content.as_ref()
    }

    /// The page as HTML, patched if a load has happened.
    pub fn html(&self) -> String {
        self.document.html()
    }

    /// The underlying document, for embedders that patch further.
    pub fn document(&self) -> &PageDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unloaded() {
        let session = PageSession::new("<html><body>static</body></html>");
        assert_eq!(session.state(), LoadState::Unloaded);
        assert!(session.content().is_none());
        assert!(session.html().contains("static"));
    }
}
