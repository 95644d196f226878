use serde::{Deserialize, Serialize};

/// A row of the `articles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Article {
    pub id: i64,
    pub date: String,
    pub headline: String,
    pub short_description: String,
    pub category: String,
    pub authors: String,
    pub link: String,
}

/// A row of the `ngrams` table. `article_id` points at `Article::id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ngram {
    pub id: i64,
    pub article_id: i64,
    pub ngram_type: String,
    pub ngram_text: String,
}

/// An ngram joined with the article it was extracted from, as served by `/ngrams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NgramView {
    pub id: i64,
    pub article_id: i64,
    pub ngram_type: String,
    pub ngram_text: String,
    pub date: String,
    pub headline: String,
    pub short_description: String,
    pub category: String,
}
