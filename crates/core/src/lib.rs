//! Auxoutline Core Library
//!
//! Extracts a navigable outline (section hierarchy plus cross-reference
//! labels) from the aux files a LaTeX compiler writes beside a document,
//! so an editor can jump to or display document structure without parsing
//! the source itself.
//!
//! # Features
//!
//! - Resolve nested `\@input` aux-file inclusion with cycle detection
//! - Reconstruct the section tree from `\contentsline` toc records
//! - Decode `\newlabel` records under the plain, hyperref and cleveref
//!   grammars, filtered by a label-key or displayed-value prefix
//! - Collapse a single unambiguous match to its bare label key
//! - Output as fold-marker text, JSON, or YAML
//!
//! # Example
//!
//! ```no_run
//! use auxoutline_core::{format_result, OutlineQuery, OutputFormat, QueryConfig};
//! use std::path::Path;
//!
//! let query = OutlineQuery::new(QueryConfig::default());
//! let result = query.run(Path::new("thesis.tex"), "eq:").unwrap();
//!
//! let output = format_result(&result, OutputFormat::Text).unwrap();
//! print!("{}", output);
//! ```

pub mod config;
pub mod engine;
pub mod models;
pub mod output;
pub mod parsers;

// Re-exports for convenience
pub use config::QueryConfig;
pub use engine::{OutlineQuery, QueryError, ResolveError};
pub use models::*;
pub use output::{format_result, render_outline, FormatError, OutputFormat};
pub use parsers::{Heading, HeadingDecoder, LabelDecoder, ParserError};
