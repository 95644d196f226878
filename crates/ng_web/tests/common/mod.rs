// Shared helpers for the HTTP tests: seeded temporary databases and a one-shot request runner.

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use ng_core::{Article, Ngram};
use ng_storage::{fixtures, SqliteStore};
use ng_web::{create_app, AppState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub db_path: PathBuf,
    _temp_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn allow_origin(&self) -> Option<&str> {
        self.headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok())
    }
}

pub async fn seeded_app(articles: &[Article], ngrams: &[Ngram], ngram_limit: u32) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("articles_data.db");
    fixtures::create_database(&db_path, articles, ngrams).await.unwrap();
    TestApp {
        app: app_for(&db_path, ngram_limit),
        db_path,
        _temp_dir: temp_dir,
    }
}

/// An app pointed at a path where no database exists.
pub fn unavailable_app() -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("missing.db");
    TestApp {
        app: app_for(&db_path, ng_core::DEFAULT_NGRAM_LIMIT),
        db_path,
        _temp_dir: temp_dir,
    }
}

fn app_for(db_path: &Path, ngram_limit: u32) -> Router {
    let store = Arc::new(SqliteStore::new(db_path));
    create_app(AppState::new(store).with_ngram_limit(ngram_limit))
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .header("origin", "http://127.0.0.1:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse { status, headers, body }
}

pub fn ngram(id: i64, article_id: i64, ngram_type: &str, ngram_text: &str) -> Ngram {
    Ngram {
        id,
        article_id,
        ngram_type: ngram_type.to_string(),
        ngram_text: ngram_text.to_string(),
    }
}
