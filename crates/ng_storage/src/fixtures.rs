//! Helpers that build throwaway databases for tests.
//!
//! The service itself never writes; these open the file read-write and create
//! it when missing.

use ng_core::{Article, Error, Ngram, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY,
        date TEXT,
        headline TEXT,
        short_description TEXT,
        category TEXT,
        authors TEXT,
        link TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ngrams (
        id INTEGER PRIMARY KEY,
        article_id INTEGER,
        ngram_type TEXT,
        ngram_text TEXT
    )
    "#,
];

async fn open_writable(db_path: &Path) -> Result<SqliteConnection> {
    SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .connect()
        .await
        .map_err(|e| Error::StoreUnavailable(format!("Failed to create database: {}", e)))
}

fn write_error(e: sqlx::Error) -> Error {
    Error::Query(format!("Failed to seed database: {}", e))
}

/// Create the `articles` and `ngrams` tables at `db_path` and insert the given rows.
pub async fn create_database(db_path: &Path, articles: &[Article], ngrams: &[Ngram]) -> Result<()> {
    let mut conn = open_writable(db_path).await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut conn).await.map_err(write_error)?;
    }

    for article in articles {
        sqlx::query(
            r#"
            INSERT INTO articles (id, date, headline, short_description, category, authors, link)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.id)
        .bind(&article.date)
        .bind(&article.headline)
        .bind(&article.short_description)
        .bind(&article.category)
        .bind(&article.authors)
        .bind(&article.link)
        .execute(&mut conn)
        .await
        .map_err(write_error)?;
    }

    for ngram in ngrams {
        sqlx::query("INSERT INTO ngrams (id, article_id, ngram_type, ngram_text) VALUES (?, ?, ?, ?)")
            .bind(ngram.id)
            .bind(ngram.article_id)
            .bind(&ngram.ngram_type)
            .bind(&ngram.ngram_text)
            .execute(&mut conn)
            .await
            .map_err(write_error)?;
    }

    conn.close().await.map_err(write_error)
}

/// Run arbitrary SQL against the database at `db_path`.
pub async fn execute(db_path: &Path, sql: &str) -> Result<()> {
    let mut conn = open_writable(db_path).await?;
    sqlx::query(sql).execute(&mut conn).await.map_err(write_error)?;
    conn.close().await.map_err(write_error)
}

pub fn article(id: i64, date: &str, headline: &str, category: &str) -> Article {
    Article {
        id,
        date: date.to_string(),
        headline: headline.to_string(),
        short_description: format!("About {}", headline.to_lowercase()),
        category: category.to_string(),
        authors: "Staff".to_string(),
        link: format!("https://news.example.com/{}", id),
    }
}

pub fn sample_articles() -> Vec<Article> {
    vec![
        article(1, "2020-01-01", "Markets rally", "BUSINESS"),
        article(2, "2020-02-15", "Storm hits coast", "WEATHER"),
    ]
}
