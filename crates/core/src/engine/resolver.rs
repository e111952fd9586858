//! Aux file loading and include resolution
//!
//! Locates the aux file belonging to a document, inlines nested `\@input`
//! records recursively, and normalizes the content for parsing. Missing or
//! unreadable files resolve to empty content; only structural problems
//! (cyclic or runaway include chains) are reported as errors.

use crate::config::QueryConfig;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("cyclic \\@input chain through {}", .0.display())]
    CyclicInclude(PathBuf),

    #[error("\\@input records nested deeper than {0} levels")]
    IncludeDepthExceeded(usize),
}

/// Resolver for one aux file and its `\@input` closure.
///
/// All includes are resolved against the entry file's parent directory via
/// absolute paths, so process working directory never changes.
pub struct AuxResolver<'a> {
    config: &'a QueryConfig,
    base: PathBuf,
    // Stack of files currently being inlined, for cycle detection. A file
    // included twice on separate branches is inlined twice; only a file
    // that includes itself (directly or not) is an error.
    in_progress: HashSet<PathBuf>,
}

impl<'a> AuxResolver<'a> {
    pub fn new(config: &'a QueryConfig) -> Self {
        Self {
            config,
            base: PathBuf::from("."),
            in_progress: HashSet::new(),
        }
    }

    /// Read the aux file for `entry` (a document or aux file path) with all
    /// nested includes inlined. A missing entry file yields an empty string.
    pub fn resolve(&mut self, entry: &Path) -> Result<String, ResolveError> {
        if let Some(parent) = entry.parent() {
            if parent.as_os_str().is_empty() {
                self.base = PathBuf::from(".");
            } else {
                self.base = parent.to_path_buf();
            }
        }
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.read_aux(&name, 0)
    }

    fn read_aux(&mut self, name: &str, depth: usize) -> Result<String, ResolveError> {
        if depth > self.config.max_include_depth {
            return Err(ResolveError::IncludeDepthExceeded(
                self.config.max_include_depth,
            ));
        }

        let path = self.base.join(aux_name(name));
        if !path.is_file() {
            return Ok(String::new());
        }
        let marker = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !self.in_progress.insert(marker.clone()) {
            return Err(ResolveError::CyclicInclude(path));
        }

        // Read errors past the existence check degrade to empty content
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                self.in_progress.remove(&marker);
                return Ok(String::new());
            }
        };

        // lines() also normalizes \r\n endings
        let result = self.inline_includes(&raw, depth);
        self.in_progress.remove(&marker);
        result
    }

    fn inline_includes(&mut self, raw: &str, depth: usize) -> Result<String, ResolveError> {
        let mut out = String::with_capacity(raw.len());
        for line in raw.lines() {
            if let Some(inner) = input_record(line) {
                out.push_str(&self.read_aux(inner, depth + 1)?);
            } else {
                out.push_str(line);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

/// Aux file name for a document or aux file name: strip a `.tex` suffix,
/// then append `.aux` unless already present.
fn aux_name(name: &str) -> String {
    let stem = name.strip_suffix(".tex").unwrap_or(name);
    if stem.ends_with(".aux") {
        stem.to_string()
    } else {
        format!("{stem}.aux")
    }
}

/// The include target of a line-anchored `\@input{...}` record
fn input_record(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(r"\@input{")?;
    let end = rest.find('}')?;
    Some(&rest[..end])
}

/// Remove comments (an unescaped `%` to end of line) and drop lines that
/// are empty afterwards. A `%` is unescaped when preceded by an even
/// number, including zero, of consecutive backslashes.
pub fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        let stripped = strip_line_comment(line);
        if !stripped.trim().is_empty() {
            out.push_str(stripped);
            out.push('\n');
        }
    }
    out
}

fn strip_line_comment(line: &str) -> &str {
    let mut backslashes = 0usize;
    for (i, b) in line.bytes().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'%' => {
                if backslashes % 2 == 0 {
                    return &line[..i];
                }
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    line
}

/// Transliterate `\IeC {\"a}`-style accent groups written by inputenc
const ACCENT_GROUPS: [(&str, &str); 7] = [
    (r#"\IeC {\"a}"#, "ä"),
    (r#"\IeC {\"o}"#, "ö"),
    (r#"\IeC {\"u}"#, "ü"),
    (r#"\IeC {\"A}"#, "Ä"),
    (r#"\IeC {\"O}"#, "Ö"),
    (r#"\IeC {\"U}"#, "Ü"),
    (r"\IeC {\'e}", "é"),
];

pub fn decode_accents(content: &str) -> String {
    let mut out = content.to_string();
    for (pattern, replacement) in ACCENT_GROUPS {
        if out.contains(pattern) {
            out = out.replace(pattern, replacement);
        }
    }
    out
}
