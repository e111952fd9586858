//! Section tree construction
//!
//! Recursive descent over the section-kind ladder: content is split on the
//! toc markers of the ladder's head kind, the stretch before the first
//! marker recurses with the tail at the same depth, and each section body
//! recurses with the tail one level deeper. Once the ladder is exhausted a
//! body can contain no further section markers and is scanned for labels.
//! Sections whose subtree yields no matching label are pruned.

use crate::models::{Filter, Outline, OutlineNode, SectionKind, LADDER};
use crate::parsers::{HeadingDecoder, LabelDecoder, ParserError};

pub struct TreeBuilder<'a> {
    filter: &'a Filter,
    labels: LabelDecoder,
    warnings: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(filter: &'a Filter) -> Result<Self, ParserError> {
        Ok(Self {
            filter,
            labels: LabelDecoder::new()?,
            warnings: Vec::new(),
        })
    }

    /// Build the pruned outline tree for fully resolved, comment-stripped
    /// content
    pub fn build(mut self, content: &str) -> Result<Outline, ParserError> {
        let nodes = self.walk(content, &LADDER, 1)?;
        Ok(Outline {
            nodes,
            warnings: self.warnings,
        })
    }

    fn walk(
        &mut self,
        content: &str,
        ladder: &[SectionKind],
        depth: usize,
    ) -> Result<Vec<OutlineNode>, ParserError> {
        let Some((&kind, finer)) = ladder.split_first() else {
            return Ok(self.extract_labels(content, depth));
        };

        let split = split_sections(content, kind);
        let mut nodes = self.walk(&split.preamble, finer, depth)?;

        if split.sections.is_empty() {
            return Ok(nodes);
        }
        let decoder = HeadingDecoder::new(kind)?;
        for (marker, body) in split.sections {
            let children = self.walk(&body, finer, depth + 1)?;
            if children.is_empty() {
                // no matching labels anywhere below, prune the section
                continue;
            }
            let (number, title) = match decoder.decode(&marker) {
                Some(heading) => (heading.number().to_string(), heading.title().to_string()),
                None => {
                    self.warnings
                        .push(format!("unrecognized heading format: {marker}"));
                    ("??".to_string(), "Unknown Name".to_string())
                }
            };
            nodes.push(OutlineNode::Section {
                kind,
                depth,
                number,
                title,
                children,
            });
        }
        Ok(nodes)
    }

    // Ladder exhausted: every remaining line is a candidate label record
    fn extract_labels(&self, content: &str, depth: usize) -> Vec<OutlineNode> {
        let cleveref = self.labels.block_has_cleveref(content);
        content
            .lines()
            .filter_map(|line| self.labels.decode(line, cleveref))
            .filter(|label| {
                self.filter.matches_key(&label.key) && self.filter.matches_value(&label.value)
            })
            .map(|label| OutlineNode::Label {
                key: label.key,
                value: label.value,
                depth,
            })
            .collect()
    }
}

struct Split {
    preamble: String,
    sections: Vec<(String, String)>,
}

// Partition content on the line-anchored toc markers of one section kind,
// keeping each marker line with the content that follows it.
fn split_sections(content: &str, kind: SectionKind) -> Split {
    let marker_prefix = format!(
        "\\@writefile{{toc}}{{\\contentsline {{{}}}",
        kind.as_str()
    );

    let mut preamble = String::new();
    let mut sections: Vec<(String, String)> = Vec::new();

    for line in content.lines() {
        if line.starts_with(&marker_prefix) {
            sections.push((line.to_string(), String::new()));
        } else if let Some((_, body)) = sections.last_mut() {
            body.push_str(line);
            body.push('\n');
        } else {
            preamble.push_str(line);
            preamble.push('\n');
        }
    }

    Split { preamble, sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::collect_labels;

    fn build(content: &str, filter: &Filter) -> Outline {
        TreeBuilder::new(filter).unwrap().build(content).unwrap()
    }

    #[test]
    fn test_labels_only_content() {
        let content = "\\newlabel{eq:a}{{1.1}{2}}\n\\newlabel{eq:b}{{1.2}{3}}\n";
        let outline = build(content, &Filter::default());

        assert_eq!(collect_labels(&outline.nodes).len(), 2);
        assert!(matches!(
            &outline.nodes[0],
            OutlineNode::Label { key, depth: 1, .. } if key == "eq:a"
        ));
    }

    #[test]
    fn test_single_section_nests_labels() {
        let content = "\\@writefile{toc}{\\contentsline {section}{\\numberline {1}Intro}{1}}\n\
                       \\newlabel{sec:intro}{{1}{1}}\n";
        let outline = build(content, &Filter::default());

        assert_eq!(outline.nodes.len(), 1);
        match &outline.nodes[0] {
            OutlineNode::Section {
                kind,
                depth,
                number,
                title,
                children,
            } => {
                assert_eq!(*kind, SectionKind::Section);
                assert_eq!(*depth, 1);
                assert_eq!(number, "1");
                assert_eq!(title, "Intro");
                assert!(
                    matches!(&children[0], OutlineNode::Label { depth: 2, .. }),
                    "labels sit one level below their section"
                );
            }
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn test_sections_without_labels_are_pruned() {
        let content = "\\@writefile{toc}{\\contentsline {section}{\\numberline {1}Empty}{1}}\n\
                       \\@writefile{toc}{\\contentsline {section}{\\numberline {2}Full}{5}}\n\
                       \\newlabel{sec:full}{{2}{5}}\n";
        let outline = build(content, &Filter::default());

        assert_eq!(outline.nodes.len(), 1);
        match &outline.nodes[0] {
            OutlineNode::Section { title, .. } => assert_eq!(title, "Full"),
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn test_pruning_respects_filter() {
        let content = "\\@writefile{toc}{\\contentsline {section}{\\numberline {1}Intro}{1}}\n\
                       \\newlabel{sec:intro}{{1}{1}}\n";
        let filter = Filter::classify("thm");
        let outline = build(content, &filter);
        assert!(outline.nodes.is_empty());
    }

    #[test]
    fn test_nested_section_depths() {
        let content = "\\@writefile{toc}{\\contentsline {section}{\\numberline {1}Outer}{1}}\n\
                       \\newlabel{sec:outer}{{1}{1}}\n\
                       \\@writefile{toc}{\\contentsline {subsection}{\\numberline {1.1}Inner}{2}}\n\
                       \\newlabel{sec:inner}{{1.1}{2}}\n";
        let outline = build(content, &Filter::default());

        let OutlineNode::Section {
            depth, children, ..
        } = &outline.nodes[0]
        else {
            panic!("expected outer section");
        };
        assert_eq!(*depth, 1);
        assert!(matches!(
            &children[0],
            OutlineNode::Label { depth: 2, .. }
        ));
        match &children[1] {
            OutlineNode::Section {
                depth, children, ..
            } => {
                assert_eq!(*depth, 2);
                assert!(matches!(&children[0], OutlineNode::Label { depth: 3, .. }));
            }
            other => panic!("expected nested subsection, got {other:?}"),
        }
    }

    #[test]
    fn test_preamble_labels_precede_sections() {
        let content = "\\newlabel{front}{{}{i}}\n\
                       \\@writefile{toc}{\\contentsline {section}{\\numberline {1}Intro}{1}}\n\
                       \\newlabel{sec:intro}{{1}{1}}\n";
        let filter = Filter::default();
        let outline = build(content, &filter);

        // front matter label has an empty value and is dropped; only the
        // section survives
        assert_eq!(outline.nodes.len(), 1);

        let content = "\\newlabel{front}{{0.1}{i}}\n\
                       \\@writefile{toc}{\\contentsline {section}{\\numberline {1}Intro}{1}}\n\
                       \\newlabel{sec:intro}{{1}{1}}\n";
        let outline = build(content, &filter);
        assert!(matches!(&outline.nodes[0], OutlineNode::Label { key, .. } if key == "front"));
        assert!(matches!(&outline.nodes[1], OutlineNode::Section { .. }));
    }

    #[test]
    fn test_unknown_heading_gets_placeholder_and_warning() {
        let content = "\\@writefile{toc}{\\contentsline {section}broken\n\
                       \\newlabel{sec:x}{{1}{1}}\n";
        let outline = build(content, &Filter::default());

        assert_eq!(outline.warnings.len(), 1);
        match &outline.nodes[0] {
            OutlineNode::Section { number, title, .. } => {
                assert_eq!(number, "??");
                assert_eq!(title, "Unknown Name");
            }
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn test_chapter_section_hierarchy() {
        let content = "\\@writefile{toc}{\\contentsline {chapter}{\\numberline {2}Theory}{10}}\n\
                       \\@writefile{toc}{\\contentsline {section}{\\numberline {2.1}Basics}{11}}\n\
                       \\newlabel{sec:basics}{{2.1}{11}}\n";
        let outline = build(content, &Filter::default());

        let OutlineNode::Section {
            kind,
            depth,
            children,
            ..
        } = &outline.nodes[0]
        else {
            panic!("expected chapter");
        };
        assert_eq!(*kind, SectionKind::Chapter);
        assert_eq!(*depth, 1);
        let OutlineNode::Section { kind, depth, .. } = &children[0] else {
            panic!("expected nested section");
        };
        assert_eq!(*kind, SectionKind::Section);
        assert_eq!(*depth, 2);
    }
}
