use axum::{extract::State, Json};
use ng_core::{fetch_records, Query, Record};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let articles = fetch_records(state.store.as_ref(), &Query::articles()).await?;
    Ok(Json(articles))
}

pub async fn list_ngrams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let ngrams = fetch_records(state.store.as_ref(), &Query::ngrams(state.ngram_limit)).await?;
    Ok(Json(ngrams))
}
