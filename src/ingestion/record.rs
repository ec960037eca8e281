//! Identity and metadata attachment for finished chunks.

use uuid::Uuid;

use crate::stores::ChunkRecord;

/// Builds the chunk records of one source document.
///
/// Title, URL, and the normalized keyword string are fixed at construction
/// and shared by every record; each [`build`](Self::build) call mints a
/// fresh v4 id with no uniqueness check against existing records.
#[derive(Clone, Debug)]
pub struct ChunkRecordBuilder {
    title: String,
    url: String,
    keywords: String,
}

impl ChunkRecordBuilder {
    /// Creates a builder for one source, normalizing its keywords.
    ///
    /// Keywords are joined with `", "`, lowercased, and trimmed at the
    /// ends. Producer order and duplicates are preserved; deduplication is
    /// the keyword producer's concern, not this builder's.
    pub fn new(title: impl Into<String>, url: impl Into<String>, keywords: &[String]) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            keywords: normalize_keywords(keywords),
        }
    }

    /// The normalized keyword string shared by every record built.
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Builds the record for one chunk body.
    pub fn build(&self, content: impl Into<String>) -> ChunkRecord {
        ChunkRecord {
            title: self.title.clone(),
            url: self.url.clone(),
            id: Uuid::new_v4().to_string(),
            keywords: self.keywords.clone(),
            content: content.into(),
        }
    }
}

fn normalize_keywords(keywords: &[String]) -> String {
    keywords.join(", ").to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_lowercased_not_deduplicated() {
        let keywords = vec![
            "ARM".to_string(),
            "arm".to_string(),
            "Install".to_string(),
        ];
        let builder = ChunkRecordBuilder::new("Guide", "https://a", &keywords);
        assert_eq!(builder.keywords(), "arm, arm, install");
    }

    #[test]
    fn empty_keywords_yield_an_empty_string() {
        let builder = ChunkRecordBuilder::new("Guide", "https://a", &[]);
        assert_eq!(builder.keywords(), "");
    }

    #[test]
    fn records_share_metadata_but_not_ids() {
        let keywords = vec!["Setup".to_string()];
        let builder = ChunkRecordBuilder::new("Guide", "https://a", &keywords);

        let one = builder.build("first chunk body");
        let two = builder.build("second chunk body");

        assert_eq!(one.title, two.title);
        assert_eq!(one.url, two.url);
        assert_eq!(one.keywords, two.keywords);
        assert_ne!(one.id, two.id);
        assert_eq!(uuid::Uuid::parse_str(&one.id).unwrap().get_version_num(), 4);
    }
}
