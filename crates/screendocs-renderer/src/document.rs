//! Markdown document rendering for a screen.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use screendocs_config::{EndpointDecl, ScreenConfig, mapping::MAPPING_FILENAME};
use screendocs_openapi::{Field, ResolvedEndpoint, SpecCollection};

/// Longest description kept, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Runs of three or more newlines.
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Renders the documentation page for one screen.
///
/// The output is line oriented: one heading, bullet, divider or paragraph per
/// line, as consumed by [`markdown_to_blocks`](crate::markdown_to_blocks).
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    source_name: String,
    synced_at: DateTime<Utc>,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    /// Create a renderer stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_name: MAPPING_FILENAME.to_owned(),
            synced_at: Utc::now(),
        }
    }

    /// Mapping file named in the provenance footer.
    #[must_use]
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Timestamp written in the footer.
    #[must_use]
    pub fn synced_at(mut self, at: DateTime<Utc>) -> Self {
        self.synced_at = at;
        self
    }

    /// Render the document for `screen_name`.
    ///
    /// Endpoints appear in declaration order. Planned endpoints and endpoints
    /// missing from every loaded spec get a placeholder note.
    pub fn render(&self, screen_name: &str, screen: &ScreenConfig, specs: &SpecCollection) -> String {
        let mut md = String::with_capacity(4096);

        let _ = write!(md, "# {screen_name} - API Documentation\n\n");
        let _ = write!(md, "{}\n\n", screen.description);
        md.push_str("---\n\n");

        for decl in &screen.endpoints {
            if decl.is_planned() {
                write_placeholder(&mut md, decl, "Status: Planned - Not yet deployed");
            } else if let Some(endpoint) = specs.resolve(decl) {
                write_endpoint(&mut md, &endpoint);
            } else {
                write_placeholder(&mut md, decl, "Endpoint not found in spec");
            }
            md.push_str("---\n\n");
        }

        let _ = writeln!(
            md,
            "*Last synced: {}*",
            self.synced_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        let _ = writeln!(md, "*Source: {}*", self.source_name);

        md
    }
}

fn write_placeholder(md: &mut String, decl: &EndpointDecl, note: &str) {
    let _ = writeln!(md, "## {} `{}`", decl.method, decl.path);
    let _ = write!(md, "*{note}*\n\n");
}

fn write_endpoint(md: &mut String, endpoint: &ResolvedEndpoint) {
    let _ = write!(md, "## {} `{}`\n\n", endpoint.method, endpoint.path);

    if !endpoint.summary.is_empty() {
        let _ = write!(md, "**{}**\n\n", endpoint.summary);
    }

    if !endpoint.description.is_empty() {
        let _ = write!(md, "{}\n\n", clean_description(&endpoint.description));
    }

    if !endpoint.parameters.is_empty() {
        md.push_str("### Parameters\n\n");
        for param in &endpoint.parameters {
            write_field(md, param);
        }
        md.push('\n');
    }

    if let Some(body) = &endpoint.request_body {
        md.push_str("### Request Body\n\n");
        for prop in &body.properties {
            write_field(md, prop);
        }
        md.push('\n');
    }

    if !endpoint.responses.is_empty() {
        md.push_str("### Responses\n\n");
        for response in &endpoint.responses {
            let _ = writeln!(md, "- **{}**: {}", response.code, response.description);
        }
        md.push('\n');
    }
}

fn write_field(md: &mut String, field: &Field) {
    let marker = if field.required {
        "*(required)*"
    } else {
        "*(optional)*"
    };
    let _ = writeln!(
        md,
        "- **{}** {marker}: {}",
        field.name,
        field.description_or_type()
    );
}

/// Collapse runs of blank lines to one and cap the length.
pub fn clean_description(description: &str) -> String {
    BLANK_RUN_RE
        .replace_all(description, "\n\n")
        .chars()
        .take(MAX_DESCRIPTION_LEN)
        .collect()
}
