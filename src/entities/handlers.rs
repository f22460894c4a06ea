use super::creation::{create_phrase, create_word};
use super::payload::{CreatePhrase, NewWord};
use super::repository::Repository;
use super::types::{Example, Phrase, PopulatedPhrase, PopulatedWord, Word};
use crate::error::ApiError;
use crate::storage::DocumentId;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_create_word(
    Extension(repo): Extension<Arc<Repository>>,
    Json(payload): Json<NewWord>,
) -> Result<(StatusCode, Json<Word>), ApiError> {
    payload.validate().map_err(ApiError::InvalidPayload)?;

    let word = create_word(&repo, payload).await?;
    tracing::info!("Created word '{}' ({})", word.word, word.id);
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn handle_create_phrase(
    Extension(repo): Extension<Arc<Repository>>,
    Json(payload): Json<CreatePhrase>,
) -> Result<(StatusCode, Json<Phrase>), ApiError> {
    payload.validate().map_err(ApiError::InvalidPayload)?;

    let phrase = create_phrase(&repo, payload).await?;
    tracing::info!("Created phrase '{}' ({})", phrase.phrase, phrase.id);
    Ok((StatusCode::CREATED, Json(phrase)))
}

pub async fn handle_get_word(
    Extension(repo): Extension<Arc<Repository>>,
    Path(id): Path<String>,
) -> Result<Json<PopulatedWord>, ApiError> {
    repo.find_word(&DocumentId(id.clone()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("word {id}")))
}

pub async fn handle_get_phrase(
    Extension(repo): Extension<Arc<Repository>>,
    Path(id): Path<String>,
) -> Result<Json<PopulatedPhrase>, ApiError> {
    repo.find_phrase(&DocumentId(id.clone()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("phrase {id}")))
}

pub async fn handle_get_example(
    Extension(repo): Extension<Arc<Repository>>,
    Path(id): Path<String>,
) -> Result<Json<Example>, ApiError> {
    repo.find_example(&DocumentId(id.clone()))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("example {id}")))
}
