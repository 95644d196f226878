use tracing::debug;

use crate::projection::project;
use crate::storage::RecordStore;
use crate::types::{Param, Record};
use crate::Result;

/// Row cap applied to `/ngrams` unless configured otherwise.
pub const DEFAULT_NGRAM_LIMIT: u32 = 500_000;

const ARTICLES_SQL: &str = r#"
    SELECT id, date, headline, short_description, category, authors, link
    FROM articles
"#;

const NGRAMS_SQL: &str = r#"
    SELECT ngrams.id, ngrams.article_id, ngrams.ngram_type, ngrams.ngram_text,
           articles.date, articles.headline, articles.short_description, articles.category
    FROM ngrams
    JOIN articles ON ngrams.article_id = articles.id
    LIMIT ?
"#;

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: &'static str,
    pub params: Vec<Param>,
}

impl Query {
    /// Every article, uncapped.
    pub fn articles() -> Self {
        Self {
            sql: ARTICLES_SQL,
            params: Vec::new(),
        }
    }

    /// Ngrams joined with their article, at most `limit` rows.
    /// Ngrams whose article is missing are dropped by the join.
    pub fn ngrams(limit: u32) -> Self {
        Self {
            sql: NGRAMS_SQL,
            params: vec![Param::Integer(i64::from(limit))],
        }
    }
}

/// Execute `query` against `store` and project the rows into records.
pub async fn fetch_records(store: &dyn RecordStore, query: &Query) -> Result<Vec<Record>> {
    let result = store.fetch(query.sql, &query.params).await?;
    debug!("Fetched {} rows with {} columns", result.len(), result.columns.len());
    Ok(project(result))
}
