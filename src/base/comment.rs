//! Suppression directives parsed from comments.
//!
//! A declaration can be excluded from reporting with a directive in the
//! comment immediately preceding it:
//!
//! ```text
//! // periphery:ignore
//! // periphery:ignore:parameters
//! // periphery:ignore:all
//! ```

/// A parsed suppression directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentCommand {
    /// Never report this declaration or its descendants.
    Ignore,
    /// Never report unused parameters of this function.
    IgnoreParameters,
    /// Ignore everything from this declaration to the end of the file.
    IgnoreAll,
}

impl CommentCommand {
    const MARKER: &'static str = "periphery:";

    /// Parse all directives out of a comment block.
    ///
    /// Each line is scanned independently; text before and after the
    /// directive on the same line is ignored, so directives survive doc
    /// comment styles and trailing prose.
    pub fn parse_block(comment: &str) -> Vec<CommentCommand> {
        comment.lines().filter_map(Self::parse_line).collect()
    }

    fn parse_line(line: &str) -> Option<CommentCommand> {
        let rest = line.split(Self::MARKER).nth(1)?;
        let command = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_end_matches(|c: char| !c.is_ascii_alphanumeric() && c != ':');
        match command {
            "ignore" => Some(Self::Ignore),
            "ignore:parameters" => Some(Self::IgnoreParameters),
            "ignore:all" => Some(Self::IgnoreAll),
            _ => None,
        }
    }
}
