//! Line-oriented translation of a rendered document into content blocks.
//!
//! Blocks here are schema-neutral; mapping them to a concrete remote block
//! format happens in the client crate.

/// Maximum text length of a single block.
pub const MAX_BLOCK_TEXT_LEN: usize = 2000;

/// A content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Informational banner at the top of the page.
    Callout(String),
    /// `# ` line.
    Heading1(String),
    /// `## ` line.
    Heading2(String),
    /// `### ` line.
    Heading3(String),
    /// `- ` line.
    BulletedListItem(String),
    /// `---` line.
    Divider,
    /// Line wrapped in `*`.
    Italic(String),
    /// Any other non-blank line.
    Paragraph(String),
}

/// Classify one line of the rendered document.
///
/// Prefixes are checked in order: `# `, `## `, `### `, `- `, exact `---`,
/// `*...*`, then plain text. Blank lines yield `None`.
pub fn classify_line(line: &str) -> Option<Block> {
    if line.trim().is_empty() {
        return None;
    }

    let block = if let Some(rest) = line.strip_prefix("# ") {
        Block::Heading1(clip(rest.trim()))
    } else if let Some(rest) = line.strip_prefix("## ") {
        Block::Heading2(clip(rest.trim()))
    } else if let Some(rest) = line.strip_prefix("### ") {
        Block::Heading3(clip(rest.trim()))
    } else if let Some(rest) = line.strip_prefix("- ") {
        Block::BulletedListItem(clip(rest.trim()))
    } else if line == "---" {
        Block::Divider
    } else if line.starts_with('*') && line.ends_with('*') {
        let inner = line.strip_prefix('*').unwrap_or(line);
        let inner = inner.strip_suffix('*').unwrap_or(inner);
        Block::Italic(clip(inner))
    } else {
        Block::Paragraph(clip(line))
    };

    Some(block)
}

/// Translate a rendered document into blocks, led by a callout.
pub fn markdown_to_blocks(markdown: &str, callout: &str) -> Vec<Block> {
    std::iter::once(Block::Callout(clip(callout)))
        .chain(markdown.lines().filter_map(classify_line))
        .collect()
}

/// Truncate to [`MAX_BLOCK_TEXT_LEN`] characters.
fn clip(text: &str) -> String {
    text.chars().take(MAX_BLOCK_TEXT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classify_headings() {
        assert_eq!(
            classify_line("# Login - API Documentation"),
            Some(Block::Heading1("Login - API Documentation".to_owned()))
        );
        assert_eq!(
            classify_line("## POST `/login`"),
            Some(Block::Heading2("POST `/login`".to_owned()))
        );
        assert_eq!(
            classify_line("### Responses  "),
            Some(Block::Heading3("Responses".to_owned()))
        );
    }

    #[test]
    fn test_classify_heading_without_space_is_paragraph() {
        assert_eq!(
            classify_line("#hashtag"),
            Some(Block::Paragraph("#hashtag".to_owned()))
        );
        assert_eq!(
            classify_line("#### Deep"),
            Some(Block::Paragraph("#### Deep".to_owned()))
        );
    }

    #[test]
    fn test_classify_bullet() {
        assert_eq!(
            classify_line("- **id** *(required)*: User id"),
            Some(Block::BulletedListItem(
                "**id** *(required)*: User id".to_owned()
            ))
        );
    }

    #[test]
    fn test_classify_divider() {
        assert_eq!(classify_line("---"), Some(Block::Divider));
        assert_eq!(
            classify_line("----"),
            Some(Block::Paragraph("----".to_owned()))
        );
    }

    #[test]
    fn test_classify_italic_strips_one_star_each_side() {
        assert_eq!(
            classify_line("*Endpoint not found in spec*"),
            Some(Block::Italic("Endpoint not found in spec".to_owned()))
        );
        assert_eq!(
            classify_line("**Authenticate user**"),
            Some(Block::Italic("*Authenticate user*".to_owned()))
        );
        assert_eq!(classify_line("*"), Some(Block::Italic(String::new())));
    }

    #[test]
    fn test_classify_blank_lines() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("   \t"), None);
    }

    #[test]
    fn test_long_text_truncated() {
        let line = "p".repeat(2500);
        let Some(Block::Paragraph(text)) = classify_line(&line) else {
            panic!("expected paragraph");
        };
        assert_eq!(text.chars().count(), MAX_BLOCK_TEXT_LEN);

        let bullet = format!("- {}", "é".repeat(2100));
        let Some(Block::BulletedListItem(text)) = classify_line(&bullet) else {
            panic!("expected bullet");
        };
        assert_eq!(text.chars().count(), MAX_BLOCK_TEXT_LEN);
    }

    #[test]
    fn test_markdown_to_blocks() {
        let md = "# Login - API Documentation\n\nSign in\n\n---\n\n## GET `/me`\n*Endpoint not found in spec*\n\n";
        let blocks = markdown_to_blocks(md, "Auto-synced");
        assert_eq!(
            blocks,
            vec![
                Block::Callout("Auto-synced".to_owned()),
                Block::Heading1("Login - API Documentation".to_owned()),
                Block::Paragraph("Sign in".to_owned()),
                Block::Divider,
                Block::Heading2("GET `/me`".to_owned()),
                Block::Italic("Endpoint not found in spec".to_owned()),
            ]
        );
    }

    #[test]
    fn test_markdown_to_blocks_is_deterministic() {
        let md = "# A\n- b\n---\n*c*\nd\n";
        assert_eq!(markdown_to_blocks(md, "x"), markdown_to_blocks(md, "x"));
    }

    #[test]
    fn test_empty_document_has_only_callout() {
        assert_eq!(
            markdown_to_blocks("\n\n", "note"),
            vec![Block::Callout("note".to_owned())]
        );
    }
}
