#[macro_use]
extern crate proptest;

use chunkmill::chunking::{BudgetedChunker, ChunkPolicy, word_count};
use proptest::prelude::{Strategy, prop};

fn prose(n: usize) -> String {
    (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

/// A level-2 section of `total` words including the two heading tokens.
fn section(title: &str, total: usize) -> String {
    format!("## {title}\n\n{}\n\n", prose(total - 2))
}

fn default_chunker() -> BudgetedChunker {
    BudgetedChunker::new(ChunkPolicy::default())
}

// ── Document-shaped scenarios ────────────────────────────────────────────

#[test]
fn guide_with_intro_and_three_sections_chunks_in_order() {
    let doc = format!(
        "# Device OS\n\n{}\n\n{}{}{}",
        prose(20),
        section("Installation", 332),
        section("Configuration", 202),
        section("Troubleshooting", 82)
    );

    let chunks = default_chunker().chunk(&doc);
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].starts_with("# Device OS"));
    assert!(chunks[0].contains("## Installation"));
    assert_eq!(word_count(&chunks[0]), 355);
    assert!(chunks[1].starts_with("## Configuration"));
    assert!(chunks[1].contains("## Troubleshooting"));
    assert_eq!(word_count(&chunks[1]), 284);
}

#[test]
fn oversized_section_splits_along_its_subsections() {
    let doc = format!(
        "## Kernel\n\n{}\n\n### Modules\n\n{}\n\n### Parameters\n\n{}\n\n",
        prose(100),
        prose(300),
        prose(250)
    );
    assert!(word_count(&doc) > 500);

    let chunks = default_chunker().chunk(&doc);
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].starts_with("## Kernel"));
    assert!(chunks[0].contains("### Modules"));
    assert_eq!(word_count(&chunks[0]), 404);
    assert!(chunks[1].starts_with("### Parameters"));
    assert_eq!(word_count(&chunks[1]), 252);
}

#[test]
fn every_chunk_of_a_long_document_stays_within_budget() {
    let doc: String = (0..12).map(|i| section(&format!("S{i}"), 250)).collect();

    let chunks = default_chunker().chunk(&doc);
    assert!(chunks.len() > 1);
    // Only the final chunk may dip below min_words, down to min_final_words.
    let (tail, flushed) = chunks.split_last().unwrap();
    for chunk in flushed {
        let words = word_count(chunk);
        assert!(words >= 300, "flushed chunk of {words} words is below min_words");
        assert!(words <= 500, "chunk of {words} words is over max_words");
    }
    let tail_words = word_count(tail);
    assert!(tail_words >= 200, "tail chunk of {tail_words} words is below min_final_words");
    assert!(tail_words <= 500, "tail chunk of {tail_words} words is over max_words");
}

#[test]
fn code_fences_do_not_break_word_accounting() {
    let doc = format!(
        "{}```sh\nsudo apt update\nsudo apt full-upgrade\n```\n\n{}",
        section("Update", 320),
        prose(210)
    );

    let chunks = default_chunker().chunk(&doc);
    let total: usize = chunks.iter().map(|c| word_count(c)).sum();
    assert_eq!(total, word_count(&doc));
}

// ── Universal properties ─────────────────────────────────────────────────

/// Policy small enough to keep generated documents cheap.
fn small_policy() -> ChunkPolicy {
    ChunkPolicy {
        min_words: 12,
        max_words: 20,
        min_final_words: 8,
    }
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

fn prose_strategy(min_words: usize, max_words: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), min_words..=max_words).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn prop_headingless_doc_within_budget_is_one_chunk(doc in prose_strategy(8, 20)) {
        let chunks = BudgetedChunker::new(small_policy()).chunk(&doc);
        prop_assert_eq!(chunks.len(), 1);

        let original: Vec<&str> = doc.split_whitespace().collect();
        let produced: Vec<&str> = chunks[0].split_whitespace().collect();
        prop_assert_eq!(original, produced);
    }

    #[test]
    fn prop_doc_under_min_final_is_one_chunk_despite_headings(
        bodies in prop::collection::vec(prose_strategy(1, 4), 1..4),
    ) {
        let policy = ChunkPolicy {
            min_words: 40,
            max_words: 50,
            min_final_words: 30,
        };
        let doc: String = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| format!("## S{i}\n{body}\n"))
            .collect();
        prop_assert!(word_count(&doc) < policy.min_final_words);

        let chunks = BudgetedChunker::new(policy).chunk(&doc);
        prop_assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn prop_no_words_are_lost_or_invented(
        paragraphs in prop::collection::vec(prose_strategy(1, 30), 1..8),
        heading_every in 1usize..4,
    ) {
        let mut doc = String::new();
        for (i, para) in paragraphs.iter().enumerate() {
            if i % heading_every == 0 {
                doc.push_str(&format!("## Section{i}\n"));
            }
            doc.push_str(para);
            doc.push_str("\n\n");
        }

        let chunks = BudgetedChunker::new(small_policy()).chunk(&doc);
        prop_assert!(!chunks.is_empty());
        let total: usize = chunks.iter().map(|c| word_count(c)).sum();
        prop_assert_eq!(total, word_count(&doc));
    }
}
