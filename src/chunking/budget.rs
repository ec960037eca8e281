//! Word-budgeted grouping of structural fragments into chunks.

use super::config::ChunkPolicy;
use super::splitter::{Fragment, HeadingLevel, split_at_level, split_paragraphs};
use super::word_count;

/// Groups heading-split fragments into chunks bounded by a [`ChunkPolicy`].
///
/// Splitting starts at level-2 headings. Any chunk still wider than the
/// policy's `max_words` is re-split at the next finer level, down through
/// level-4 headings and finally paragraph boundaries. Paragraphs are the
/// finest structure, so their grouping is accepted as-is; a single
/// paragraph wider than the budget stays whole.
#[derive(Clone, Debug)]
pub struct BudgetedChunker {
    policy: ChunkPolicy,
}

impl BudgetedChunker {
    pub fn new(policy: ChunkPolicy) -> Self {
        Self { policy }
    }

    /// Thresholds steering the grouping walk.
    pub fn policy(&self) -> &ChunkPolicy {
        &self.policy
    }

    /// Splits a markdown body into bounded chunks, in document order.
    ///
    /// Empty or whitespace-only input produces no chunks.
    pub fn chunk(&self, markdown: &str) -> Vec<String> {
        if markdown.trim().is_empty() {
            return Vec::new();
        }
        self.chunk_at(markdown, Some(HeadingLevel::H2))
    }

    fn chunk_at(&self, text: &str, level: Option<HeadingLevel>) -> Vec<String> {
        let fragments = match level {
            Some(level) => split_at_level(text, level),
            None => split_paragraphs(text),
        };
        let grouped = self.group(fragments);

        let Some(level) = level else {
            return grouped;
        };
        let mut chunks = Vec::with_capacity(grouped.len());
        for chunk in grouped {
            if word_count(&chunk) > self.policy.max_words {
                chunks.extend(self.chunk_at(&chunk, level.finer()));
            } else {
                chunks.push(chunk);
            }
        }
        chunks
    }

    /// The grouping walk over one level's fragments.
    ///
    /// A fragment opening a new section closes the current chunk once it
    /// holds `min_words`; so does a fragment that would push it past
    /// `max_words`. A trailing remainder thinner than `min_final_words`
    /// merges into the previous chunk instead of standing alone, which is
    /// the one place a chunk may end up wider than the budget.
    fn group(&self, fragments: Vec<Fragment>) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_words = 0usize;

        for fragment in fragments {
            let fragment_words = word_count(&fragment.text);
            let section_flush = fragment.heading && current_words >= self.policy.min_words;
            let budget_flush = current_words + fragment_words > self.policy.max_words
                && current_words >= self.policy.min_words;

            if section_flush || budget_flush {
                chunks.push(current.trim().to_string());
                current = fragment.text;
                current_words = fragment_words;
            } else {
                if !current.is_empty() {
                    current.push('\n');
                }
                current.push_str(&fragment.text);
                current_words += fragment_words;
            }
        }

        let tail = current.trim();
        if !tail.is_empty() {
            match chunks.last_mut() {
                Some(last) if current_words < self.policy.min_final_words => {
                    last.push('\n');
                    last.push_str(tail);
                }
                _ => chunks.push(tail.to_string()),
            }
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `n` filler words.
    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    /// A level-2 section of `total` words including the two heading tokens.
    fn section(title: &str, total: usize) -> String {
        format!("## {title}\n{}\n", words(total - 2))
    }

    fn chunker() -> BudgetedChunker {
        BudgetedChunker::new(ChunkPolicy::default())
    }

    #[test]
    fn sections_accumulate_until_budget_is_met() {
        let doc = format!(
            "{}{}{}",
            section("One", 350),
            section("Two", 180),
            section("Three", 120)
        );
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(word_count(&chunks[0]), 350);
        assert_eq!(word_count(&chunks[1]), 300);
        assert!(chunks[1].contains("## Two"));
        assert!(chunks[1].contains("## Three"));
    }

    #[test]
    fn oversized_section_is_refined_at_finer_level() {
        let doc = format!(
            "## Alpha\n{}\n### Beta\n{}\n",
            words(323),
            words(323)
        );
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(word_count(&chunks[0]), 325);
        assert_eq!(word_count(&chunks[1]), 325);
        assert!(chunks[0].starts_with("## Alpha"));
        assert!(chunks[1].starts_with("### Beta"));
    }

    #[test]
    fn thin_tail_merges_into_previous_chunk() {
        let doc = format!("{}{}", section("One", 350), section("Two", 180));
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 1);
        assert_eq!(word_count(&chunks[0]), 530);
        assert!(chunks[0].contains("## Two"));
    }

    #[test]
    fn tail_at_threshold_stands_alone() {
        let doc = format!("{}{}", section("One", 350), section("Two", 200));
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(word_count(&chunks[1]), 200);
    }

    #[test]
    fn short_document_is_one_chunk() {
        let doc = format!("{}{}", section("One", 80), section("Two", 60));
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 1);
        assert_eq!(word_count(&chunks[0]), 140);
    }

    #[test]
    fn no_heading_document_within_budget_is_one_chunk() {
        let doc = words(400);
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], doc);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(chunker().chunk("").is_empty());
        assert!(chunker().chunk("  \n\n \t").is_empty());
    }

    #[test]
    fn headingless_overflow_falls_back_to_paragraphs() {
        let doc = format!("{}\n\n{}\n\n{}", words(320), words(310), words(150));
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(word_count(&chunks[0]), 320);
        assert_eq!(word_count(&chunks[1]), 460);
    }

    #[test]
    fn indivisible_paragraph_is_accepted_oversized() {
        let doc = words(620);
        let chunks = chunker().chunk(&doc);
        assert_eq!(chunks.len(), 1);
        assert_eq!(word_count(&chunks[0]), 620);
    }

    #[test]
    fn words_are_never_lost() {
        let doc = format!(
            "preamble text here\n{}{}\n\n{}",
            section("One", 340),
            section("Two", 260),
            words(90)
        );
        let chunks = chunker().chunk(&doc);
        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        assert_eq!(total, word_count(&doc));
    }
}
