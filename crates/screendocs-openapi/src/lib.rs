//! OpenAPI support for screendocs.
//!
//! - [`SpecCollection`]: the set of parsed OpenAPI documents, keyed by the
//!   identifier endpoints use as their `source`
//! - [`SpecCollection::resolve`]: looks up an endpoint declaration and
//!   returns a [`ResolvedEndpoint`] with local `$ref`s followed
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use screendocs_openapi::SpecCollection;
//!
//! let files = vec!["api/openapi.yaml".to_owned()];
//! let specs = SpecCollection::load(Path::new("."), &files)?;
//! println!("Loaded {} spec files", specs.len());
//! # Ok(())
//! # }
//! ```

pub mod document;
mod lenient;
mod loader;
mod resolve;

pub use document::OpenApiDocument;
pub use loader::{SpecCollection, SpecError};
pub use resolve::{Field, JsonBody, ResolvedEndpoint, ResponseSummary};
