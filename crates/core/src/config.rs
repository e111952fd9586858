//! Configuration for outline queries
//!
//! A query is stateless apart from this configuration; the same config can
//! be reused across invocations.

/// Configuration for an outline query
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Maximum `\@input` nesting depth before resolution is aborted.
    /// The visited-set cycle guard catches true cycles; this caps
    /// pathological but acyclic chains.
    pub max_include_depth: usize,

    /// Whether to transliterate `\IeC {...}` accent groups into their
    /// unicode characters before parsing
    pub decode_accents: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_include_depth: 16,
            decode_accents: true,
        }
    }
}

impl QueryConfig {
    /// Set maximum include depth (builder pattern)
    pub fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Set accent transliteration (builder pattern)
    pub fn with_decode_accents(mut self, decode: bool) -> Self {
        self.decode_accents = decode;
        self
    }
}
