//! Decoding of `\@writefile{toc}{\contentsline {...}...}` heading records
//!
//! Four grammars are tried in priority order: numbered with hyperref detail
//! groups, numbered, amsart/amsbook `\tocsection`/`\tocchapter`, and a bare
//! fallback capturing any title without a number.

use crate::models::SectionKind;
use regex::Regex;

use super::ParserError;

/// A decoded section heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Numbered { number: String, title: String },
    Bare { title: String },
}

impl Heading {
    /// Displayed number, empty for unnumbered headings
    pub fn number(&self) -> &str {
        match self {
            Heading::Numbered { number, .. } => number,
            Heading::Bare { .. } => "",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Heading::Numbered { title, .. } | Heading::Bare { title } => title,
        }
    }
}

/// Decoder for the heading grammars of one section kind
pub struct HeadingDecoder {
    hyperref: Regex,
    numbered: Regex,
    ams: Regex,
    bare: Regex,
}

impl HeadingDecoder {
    pub fn new(kind: SectionKind) -> Result<Self, ParserError> {
        let kind = kind.as_str();
        Ok(Self {
            hyperref: compile(&format!(
                r"\{{{kind}\}}\{{\\numberline \{{(?:\\relax )?(.*?)\}}(.*?)\}}\{{[^{{}}]*\}}\{{[^{{}}]*\}}\}}$"
            ))?,
            numbered: compile(&format!(
                r"\{{{kind}\}}\{{\\numberline \{{(?:\\relax )?(.*?)\}}(.*?)\}}"
            ))?,
            ams: compile(&format!(
                r"\{{{kind}\}}\{{\\toc(section|chapter) \{{(.*?)\}}\{{(.*?)\}}\{{(.*?)\}}"
            ))?,
            bare: compile(&format!(r"\{{{kind}\}}\{{(.*?)\}}"))?,
        })
    }

    /// Decode a marker line, trying each grammar in turn. `None` means no
    /// grammar matched; the caller substitutes a placeholder so the subtree
    /// is not lost.
    pub fn decode(&self, line: &str) -> Option<Heading> {
        if let Some(caps) = self.hyperref.captures(line) {
            return Some(Heading::Numbered {
                number: caps[1].to_string(),
                title: caps[2].to_string(),
            });
        }
        if let Some(caps) = self.numbered.captures(line) {
            return Some(Heading::Numbered {
                number: caps[1].to_string(),
                title: caps[2].to_string(),
            });
        }
        if let Some(caps) = self.ams.captures(line) {
            // amsart leaves the chapter slot empty; amsbook fills both
            let number = if caps[2].is_empty() {
                caps[3].to_string()
            } else {
                format!("{} {}", &caps[2], &caps[3])
            };
            return Some(Heading::Numbered {
                number,
                title: caps[4].to_string(),
            });
        }
        if let Some(caps) = self.bare.captures(line) {
            return Some(Heading::Bare {
                title: caps[1].to_string(),
            });
        }
        None
    }
}

fn compile(pattern: &str) -> Result<Regex, ParserError> {
    Regex::new(pattern).map_err(|e| ParserError::InitError(e.to_string()))
}
