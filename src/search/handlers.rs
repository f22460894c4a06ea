use super::engine::{search_dictionary, search_words};
use super::types::SearchParams;
use crate::dictionary::embedded::Dictionary;
use crate::dictionary::types::DictionaryEntries;
use crate::entities::repository::Repository;
use crate::entities::types::PopulatedWord;
use crate::error::ApiError;

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search_words(
    Query(params): Query<SearchParams>,
    Extension(repo): Extension<Arc<Repository>>,
) -> Result<Json<Vec<PopulatedWord>>, ApiError> {
    let keyword = params.keyword.unwrap_or_default();
    let words = search_words(&repo, &keyword).await?;
    Ok(Json(words))
}

pub async fn handle_search_dictionary(
    Query(params): Query<SearchParams>,
    Extension(dictionary): Extension<Arc<Dictionary>>,
) -> Result<Json<DictionaryEntries>, ApiError> {
    let entries = search_dictionary(&dictionary, params.keyword.as_deref())?;
    Ok(Json(entries))
}
