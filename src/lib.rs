// Copyright 2026 Pagefill Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pagefill — hydrate static HTML pages from a remote JSON content document.
//!
//! Fetch a content document once, then patch the parsed page in place:
//! title and meta description, known images, the hero text block and its
//! CTA links, phone/email contact links, and theme colors as CSS custom
//! properties. Every field of the document is optional; absence leaves
//! the shipped markup untouched.

pub mod content;
pub mod contract;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod page;
pub mod patch;

pub use content::SiteContent;
pub use contract::PageContract;
pub use dom::PageDocument;
pub use error::{HydrateError, HydrateResult};
pub use fetch::ContentClient;
pub use page::{LoadState, PageSession};
pub use patch::apply_content;
