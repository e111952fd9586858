use serde::{Deserialize, Serialize};

/// Structural category of a document division, coarsest to finest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Part,
    Chapter,
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    Subparagraph,
}

/// The fixed nesting ladder. Tree building recurses through this in order,
/// so recursion depth is bounded by its length.
pub const LADDER: [SectionKind; 7] = [
    SectionKind::Part,
    SectionKind::Chapter,
    SectionKind::Section,
    SectionKind::Subsection,
    SectionKind::Subsubsection,
    SectionKind::Paragraph,
    SectionKind::Subparagraph,
];

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Part => "part",
            SectionKind::Chapter => "chapter",
            SectionKind::Section => "section",
            SectionKind::Subsection => "subsection",
            SectionKind::Subsubsection => "subsubsection",
            SectionKind::Paragraph => "paragraph",
            SectionKind::Subparagraph => "subparagraph",
        }
    }
}

/// A decoded `\newlabel` record: the cross-reference key and the
/// human-readable value it resolves to ("3.2", "(4.1)", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    pub value: String,
}

/// One node of the extracted outline tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutlineNode {
    /// A section heading with the matching labels nested beneath it
    Section {
        kind: SectionKind,
        /// Nesting depth, 1-based. Drives both indentation and the
        /// fold-level suffix on heading lines.
        depth: usize,
        /// Displayed number, empty for unnumbered headings
        number: String,
        title: String,
        children: Vec<OutlineNode>,
    },
    /// A label that matched the query filters
    Label { key: String, value: String, depth: usize },
}

/// Tree building result: the pruned outline plus any diagnostics raised
/// for unrecognized heading records along the way
#[derive(Debug, Clone, Default)]
pub struct Outline {
    pub nodes: Vec<OutlineNode>,
    pub warnings: Vec<String>,
}

/// Collect all label (key, value) pairs in document order
pub fn collect_labels(nodes: &[OutlineNode]) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    visit_labels(nodes, &mut out);
    out
}

fn visit_labels<'a>(nodes: &'a [OutlineNode], out: &mut Vec<(&'a str, &'a str)>) {
    for node in nodes {
        match node {
            OutlineNode::Label { key, value, .. } => out.push((key, value)),
            OutlineNode::Section { children, .. } => visit_labels(children, out),
        }
    }
}

/// Classified query filter. Exactly one of the two prefixes is non-empty
/// unless the raw filter was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Prefix the label key must start with
    pub label_prefix: String,
    /// Prefix the rendered value must start with
    pub value_prefix: String,
}

impl Filter {
    /// Classify a raw filter string by shape: something that looks like a
    /// displayed value (leading parenthesis, or a word followed by a dot)
    /// filters on values, anything else filters on label keys.
    pub fn classify(raw: &str) -> Self {
        if looks_like_value(raw) {
            Filter {
                label_prefix: String::new(),
                value_prefix: raw.to_string(),
            }
        } else {
            Filter {
                label_prefix: raw.to_string(),
                value_prefix: String::new(),
            }
        }
    }

    pub fn matches_key(&self, key: &str) -> bool {
        key.starts_with(&self.label_prefix)
    }

    pub fn matches_value(&self, value: &str) -> bool {
        value.starts_with(&self.value_prefix)
    }
}

// Value-like shapes: "(4.1", "(", "3.2", "eq.intro". A dot preceded only
// by word characters marks a counter.number value; a bare word or a
// colon-separated key ("sec:intro") is a label prefix.
fn looks_like_value(raw: &str) -> bool {
    if raw.starts_with('(') {
        return true;
    }
    match raw.split_once('.') {
        Some((head, _)) => head.chars().all(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

/// Result of one outline query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The pruned outline tree; empty when nothing matched
    pub outline: Vec<OutlineNode>,
    /// Set when the query collapsed to a single unambiguous label key
    pub unique: Option<String>,
    /// Diagnostics for heading records that matched no known grammar
    pub warnings: Vec<String>,
}

impl QueryResult {
    /// Number of labels that matched the filters
    pub fn match_count(&self) -> usize {
        collect_labels(&self.outline).len()
    }
}
