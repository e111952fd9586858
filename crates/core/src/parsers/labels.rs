//! Decoding of `\newlabel` records
//!
//! A label record carries a cross-reference key and a group structure whose
//! shape depends on which packages were active when the aux file was
//! written. Decoding tries an ordered set of grammars and uses the first
//! that matches; a record matching none of them is skipped, never an error.

use crate::models::Label;
use regex::Regex;

use super::ParserError;

/// Decoder for `\newlabel` records under the cleveref, hyperref and plain
/// grammars
pub struct LabelDecoder {
    any_label: Regex,
    tocindent: Regex,
    cref_marker: Regex,
    cleveref: Regex,
    hyperref: Regex,
    plain: Regex,
    ams_companion: Regex,
}

impl LabelDecoder {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            any_label: compile(r"^\\newlabel\{([^{}]+?)(@cref)?\}")?,
            tocindent: compile(r"^tocindent-?[0-9]*$")?,
            cref_marker: compile(r"\\newlabel\{[^{}]*@cref\}")?,
            cleveref: compile(
                r"^\\newlabel\{[^{}]+?@cref\}\{\{\[([^\]]*)\]\[[^\]]*\]\[[^\]]*\]([^{}]*)\}\{[^{}]*\}\}",
            )?,
            hyperref: compile(
                r"^\\newlabel\{[^{}]+?\}\{\{(?:\\relax )?(.*?)\}.*\{(?:aliascounter:)?([^{}]*)\}\{[^{}]*\}\}",
            )?,
            plain: compile(r"^\\newlabel\{[^{}]+?\}\{\{(?:\\relax )?(.*)\}\{.*\}\}")?,
            ams_companion: compile(r"^\\newlabel\{[^{}]+?\}\{\{\{(.*?)\}\}\{[0-9a-zA-Z]*\}")?,
        })
    }

    /// True when any record in the block carries a cleveref annotation.
    /// Cleveref writes each label twice (a plain record and an `@cref`
    /// twin), so the whole block switches to cleveref-only decoding to
    /// avoid emitting every label twice.
    pub fn block_has_cleveref(&self, block: &str) -> bool {
        self.cref_marker.is_match(block)
    }

    /// Decode one line into a label, best effort. Returns `None` for
    /// non-label lines, internal bookkeeping keys, and records no grammar
    /// recognizes.
    pub fn decode(&self, line: &str, cleveref_block: bool) -> Option<Label> {
        let line = line.trim_start();
        let caps = self.any_label.captures(line)?;
        let key = caps.get(1)?.as_str();

        // tocindent markers are internal bookkeeping, never surfaced
        if self.tocindent.is_match(key) {
            return None;
        }

        let value = if cleveref_block {
            self.decode_cleveref(line)?
        } else {
            self.decode_hyperref(line)
                .or_else(|| self.decode_plain(line))?
        };
        if value.is_empty() {
            return None;
        }

        Some(Label {
            key: key.to_string(),
            value: value.replace(['{', '}'], ""),
        })
    }

    // `\newlabel{eq:a@cref}{{[equation][2][]4.2}{[9]}}`: a category tag in
    // the first bracket group and the raw number after the third.
    fn decode_cleveref(&self, line: &str) -> Option<String> {
        let caps = self.cleveref.captures(line)?;
        let category = caps.get(1)?.as_str();
        let number = caps.get(2)?.as_str();
        if category == "equation" || category == "subequation" {
            Some(format!("({number})"))
        } else {
            Some(format!("{category}.{number}"))
        }
    }

    // `\newlabel{sec:x}{{1.2}{5}{Title}{section.1.2}{}}`: the shown text in
    // the first inner group, the counter reference in the second-to-last.
    fn decode_hyperref(&self, line: &str) -> Option<String> {
        let caps = self.hyperref.captures(line)?;
        let text = caps.get(1)?.as_str();
        let counter = caps.get(2)?.as_str();

        if counter.contains("equation.") {
            return Some(format!("({text})"));
        }
        if counter.contains("AMS.") {
            // Named (AMS-style) equation: the number sits in a companion
            // triple-brace group, followed by the page number.
            return match self.ams_companion.captures(line) {
                Some(companion) => companion.get(1).map(|m| format!("({})", m.as_str())),
                None => Some(counter.to_string()),
            };
        }

        let word: String = counter
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        Some(format!("{word}.{text}"))
    }

    // `\newlabel{sec:x}{{1.2}{5}}`: shown text verbatim
    fn decode_plain(&self, line: &str) -> Option<String> {
        let caps = self.plain.captures(line)?;
        Some(caps.get(1)?.as_str().to_string())
    }
}

fn compile(pattern: &str) -> Result<Regex, ParserError> {
    Regex::new(pattern).map_err(|e| ParserError::InitError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> LabelDecoder {
        LabelDecoder::new().unwrap()
    }

    #[test]
    fn test_plain_label() {
        let label = decoder()
            .decode(r"\newlabel{sec:intro}{{1.2}{5}}", false)
            .unwrap();
        assert_eq!(label.key, "sec:intro");
        assert_eq!(label.value, "1.2");
    }

    #[test]
    fn test_plain_label_with_relax() {
        let label = decoder()
            .decode(r"\newlabel{sec:x}{{\relax 2}{7}}", false)
            .unwrap();
        assert_eq!(label.value, "2");
    }

    #[test]
    fn test_hyperref_section() {
        let label = decoder()
            .decode(
                r"\newlabel{sec:intro}{{1.2}{5}{Introduction}{section.1.2}{}}",
                false,
            )
            .unwrap();
        assert_eq!(label.key, "sec:intro");
        assert_eq!(label.value, "section.1.2");
    }

    #[test]
    fn test_hyperref_equation_is_parenthesized() {
        let label = decoder()
            .decode(r"\newlabel{eq:euler}{{4.1}{9}{}{equation.4.1}{}}", false)
            .unwrap();
        assert_eq!(label.value, "(4.1)");
    }

    #[test]
    fn test_hyperref_ams_equation_uses_companion_number() {
        let label = decoder()
            .decode(r"\newlabel{eq:named}{{{3.1}}{7}{}{AMS.12}{}}", false)
            .unwrap();
        assert_eq!(label.value, "(3.1)");
    }

    #[test]
    fn test_hyperref_aliascounter_is_stripped() {
        let label = decoder()
            .decode(
                r"\newlabel{thm:main}{{2.1}{8}{Main}{aliascounter:theorem.2.1}{}}",
                false,
            )
            .unwrap();
        assert_eq!(label.value, "theorem.2.1");
    }

    #[test]
    fn test_cleveref_equation() {
        let label = decoder()
            .decode(r"\newlabel{eq:a@cref}{{[equation][2][]4.2}{[9]}}", true)
            .unwrap();
        assert_eq!(label.key, "eq:a");
        assert_eq!(label.value, "(4.2)");
    }

    #[test]
    fn test_cleveref_theorem() {
        let label = decoder()
            .decode(r"\newlabel{thm:main@cref}{{[theorem][1][]2.1}{[5]}}", true)
            .unwrap();
        assert_eq!(label.value, "theorem.2.1");
    }

    #[test]
    fn test_cleveref_block_skips_plain_twin() {
        // Cleveref writes both records; only the @cref one yields a value
        assert!(decoder()
            .decode(r"\newlabel{eq:a}{{4.2}{9}}", true)
            .is_none());
    }

    #[test]
    fn test_block_detection() {
        let d = decoder();
        assert!(d.block_has_cleveref(
            "\\newlabel{eq:a}{{4.2}{9}}\n\\newlabel{eq:a@cref}{{[equation][2][]4.2}{[9]}}\n"
        ));
        assert!(!d.block_has_cleveref("\\newlabel{eq:a}{{4.2}{9}}\n"));
    }

    #[test]
    fn test_tocindent_never_surfaced() {
        let d = decoder();
        assert!(d.decode(r"\newlabel{tocindent-1}{{}{3}}", false).is_none());
        assert!(d.decode(r"\newlabel{tocindent12}{{}{3}}", false).is_none());
        assert!(d.decode(r"\newlabel{tocindent}{{}{3}}", false).is_none());
    }

    #[test]
    fn test_unrecognized_record_is_skipped() {
        let d = decoder();
        assert!(d.decode(r"\newlabel{odd:shape}{broken", false).is_none());
        assert!(d.decode(r"\relax", false).is_none());
        assert!(d.decode("", false).is_none());
    }

    #[test]
    fn test_braces_stripped_from_value() {
        let label = decoder()
            .decode(r"\newlabel{sec:bf}{{{\bfseries 3}.2}{11}}", false)
            .unwrap();
        assert_eq!(label.value, r"\bfseries 3.2");
    }

    #[test]
    fn test_leading_whitespace_tolerated() {
        let label = decoder()
            .decode("   \\newlabel{sec:intro}{{1}{1}}", false)
            .unwrap();
        assert_eq!(label.key, "sec:intro");
    }
}
