//! Parser configuration.

/// Options for [`parse_with_options`](crate::parse_with_options).
///
/// ## Examples
///
/// ```rust
/// use yamlite::{parse_with_options, Options};
///
/// let options = Options::new().with_max_depth(4);
/// assert!(parse_with_options("a: {b: {c: {d: {e: 1}}}}", &options).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum nesting depth before parsing stops with a structural
    /// error. Bounds recursion on hostile input.
    pub(crate) max_depth: usize,
}

impl Options {
    /// Creates options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured maximum nesting depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Options {
    fn default() -> Self {
        Options { max_depth: 128 }
    }
}
