//! Heading-aware chunking of markdown documents.
//!
//! The submodules provide three core capabilities:
//!
//! * [`config`] — word-count thresholds with file and environment layering.
//! * [`splitter`] — structural splitting at heading and paragraph boundaries.
//! * [`budget`] — grouping fragments into word-budgeted chunks, with
//!   recursive refinement of oversized ones.

pub mod budget;
pub mod config;
pub mod splitter;

pub use budget::BudgetedChunker;
pub use config::{ChunkPolicy, ConfigError, PolicyBuilder};
pub use splitter::{Fragment, HeadingLevel, split_at_level, split_paragraphs};

/// Number of whitespace-separated words in `text`.
///
/// The chunker's budget checks, the ledger's per-source totals, and the run
/// statistics all count words through this one function, so sizes agree
/// everywhere they are reported.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Strips a leading `---`-delimited frontmatter block from `markdown`.
///
/// Returns the body after the closing delimiter, trimmed. Input without an
/// opening delimiter at the very start, or with an unterminated block, is
/// returned unchanged.
pub fn strip_frontmatter(markdown: &str) -> &str {
    let Some(rest) = markdown.strip_prefix("---") else {
        return markdown;
    };
    match rest.find("---") {
        Some(end) => rest[end + 3..].trim(),
        None => markdown,
    }
}
