//! Query front-end
//!
//! Orchestrates the pipeline: resolve includes, strip comments, build the
//! section tree, then post-process the matches. A query with exactly one
//! unambiguous match collapses to the bare label key; anything else is
//! surfaced as the full outline for the caller to disambiguate.

use crate::config::QueryConfig;
use crate::engine::builder::TreeBuilder;
use crate::engine::resolver::{decode_accents, strip_comments, AuxResolver, ResolveError};
use crate::models::{collect_labels, Filter, Outline, QueryResult};
use crate::parsers::ParserError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// Outline query over one document's aux file closure
pub struct OutlineQuery {
    config: QueryConfig,
}

impl OutlineQuery {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline for `file` (a document or aux file path) and a
    /// raw filter string, classified by shape into a label-key or value
    /// prefix.
    pub fn run(&self, file: &Path, raw_filter: &str) -> Result<QueryResult, QueryError> {
        let filter = Filter::classify(raw_filter);

        let mut resolver = AuxResolver::new(&self.config);
        let contents = resolver.resolve(file)?;
        let stripped = strip_comments(&contents);
        let content = if self.config.decode_accents {
            decode_accents(&stripped)
        } else {
            stripped
        };

        let outline = TreeBuilder::new(&filter)?.build(&content)?;
        Ok(post_process(outline, &filter))
    }
}

// A single match collapses to its bare key when the filter pinned it down:
// either a value filter that some value equals exactly, or any non-empty
// key filter. An empty filter with one match still gets the full outline.
fn post_process(outline: Outline, filter: &Filter) -> QueryResult {
    let unique = {
        let labels = collect_labels(&outline.nodes);
        match labels.as_slice() {
            [(key, value)] => {
                let exact_value =
                    !filter.value_prefix.is_empty() && *value == filter.value_prefix;
                if exact_value || !filter.label_prefix.is_empty() {
                    Some((*key).to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    };

    QueryResult {
        outline: outline.nodes,
        unique,
        warnings: outline.warnings,
    }
}
