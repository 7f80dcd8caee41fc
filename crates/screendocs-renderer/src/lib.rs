//! Screen documentation rendering.
//!
//! Rendering happens in two pure steps:
//!
//! 1. [`DocumentRenderer`] turns a screen's endpoint declarations and the
//!    loaded specs into a line-oriented markdown document.
//! 2. [`markdown_to_blocks`] classifies each line into a [`Block`], prefixed
//!    with an informational callout.
//!
//! ```
//! use screendocs_config::ScreenConfig;
//! use screendocs_openapi::SpecCollection;
//! use screendocs_renderer::{Block, DocumentRenderer, markdown_to_blocks};
//!
//! let screen = ScreenConfig {
//!     description: "Sign-in screen".to_owned(),
//!     endpoints: Vec::new(),
//! };
//! let md = DocumentRenderer::new().render("Login", &screen, &SpecCollection::default());
//! let blocks = markdown_to_blocks(&md, "Auto-synced");
//! assert_eq!(blocks[1], Block::Heading1("Login - API Documentation".to_owned()));
//! ```

mod blocks;
mod document;

pub use blocks::{Block, MAX_BLOCK_TEXT_LEN, classify_line, markdown_to_blocks};
pub use document::{DocumentRenderer, MAX_DESCRIPTION_LEN, clean_description};
