//! Parse configuration

/// Default limit on element nesting
pub const DEFAULT_MAX_DEPTH: usize = 400;

/// Options controlling tree construction.
///
/// ```
/// use rustyhtml::{HtmlDocument, ParseOptions};
///
/// let options = ParseOptions::default()
///     .with_fragment_context("div")
///     .with_keep_whitespace(false);
/// let doc = HtmlDocument::parse_with_options("<p>a</p> <p>b</p>", &options);
/// assert_eq!(doc.root().child_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum element nesting depth before construction stops
    pub max_depth: usize,
    /// Parse the input as the children of a synthetic element with this
    /// lowercase name
    pub fragment_context: Option<String>,
    /// Keep whitespace-only text as `Whitespace` nodes
    pub keep_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            fragment_context: None,
            keep_whitespace: true,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Context element by name, known tag or custom. An empty name clears it.
    pub fn with_fragment_context(mut self, name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        self.fragment_context = (!name.is_empty()).then_some(name);
        self
    }

    pub fn with_keep_whitespace(mut self, keep: bool) -> Self {
        self.keep_whitespace = keep;
        self
    }
}
