//! Structural splitting at heading and paragraph boundaries.

use std::sync::LazyLock;

use regex::Regex;

static H2_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## .+").unwrap());
static H3_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### .+").unwrap());
static H4_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#### .+").unwrap());

/// Markdown section-header depths used as structural split points.
///
/// Top-level (`#`) headings are document titles, not section boundaries,
/// so refinement starts at level two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// The next finer level, or `None` once heading structure is exhausted
    /// and only paragraph boundaries remain.
    pub fn finer(self) -> Option<HeadingLevel> {
        match self {
            HeadingLevel::H2 => Some(HeadingLevel::H3),
            HeadingLevel::H3 => Some(HeadingLevel::H4),
            HeadingLevel::H4 => None,
        }
    }

    fn boundary(self) -> &'static Regex {
        match self {
            HeadingLevel::H2 => &H2_BOUNDARY,
            HeadingLevel::H3 => &H3_BOUNDARY,
            HeadingLevel::H4 => &H4_BOUNDARY,
        }
    }
}

/// A contiguous slice of the source produced by one structural split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Fragment body. When `heading` is set it starts with the heading line.
    pub text: String,
    /// Whether this fragment opens a new section at the split level.
    pub heading: bool,
}

impl Fragment {
    fn new(text: impl Into<String>, heading: bool) -> Self {
        Self {
            text: text.into(),
            heading,
        }
    }
}

/// Splits `text` into fragments at headings of the given level.
///
/// Each heading starts a fragment carrying the heading line and everything
/// up to the next heading of the same level, so grouping can never separate
/// a heading from its section body. Text before the first heading forms its
/// own leading fragment; text with no headings at this level comes back as
/// a single fragment.
pub fn split_at_level(text: &str, level: HeadingLevel) -> Vec<Fragment> {
    let mut boundaries: Vec<usize> = level.boundary().find_iter(text).map(|m| m.start()).collect();
    if boundaries.is_empty() {
        return vec![Fragment::new(text, false)];
    }

    let mut fragments = Vec::with_capacity(boundaries.len() + 1);
    if boundaries[0] > 0 {
        fragments.push(Fragment::new(&text[..boundaries[0]], false));
    }
    boundaries.push(text.len());
    for bounds in boundaries.windows(2) {
        fragments.push(Fragment::new(&text[bounds[0]..bounds[1]], true));
    }
    fragments
}

/// Splits `text` into blank-line-separated paragraph fragments.
///
/// Paragraphs carry no heading semantics, so grouping them never triggers
/// the new-section flush rule. Whitespace-only blocks are dropped.
pub fn split_paragraphs(text: &str) -> Vec<Fragment> {
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| Fragment::new(block, false))
        .collect()
}
