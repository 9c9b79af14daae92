//! Handlers for post, tag, and category translations.
//!
//! All writes are upserts keyed by (owner, language); re-submitting a
//! language replaces the previous translation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use mindscribe_core::content::{validate_content, validate_name, validate_title};
use mindscribe_core::error::CoreError;
use mindscribe_core::translation::validate_language;
use mindscribe_core::types::DbId;
use mindscribe_db::models::translation::{
    NameTranslation, PostTranslation, UpsertNameTranslation, UpsertPostTranslation,
};
use mindscribe_db::repositories::{CategoryRepo, TagRepo, TranslationRepo};

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuthor;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/posts/{post_id}/translations
///
/// Upsert a translation of the post into one language. A translation in
/// the post's own language is rejected.
pub async fn upsert_post_translation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<UpsertPostTranslation>,
) -> AppResult<Json<DataResponse<PostTranslation>>> {
    validate_language(&input.language)?;
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    if post.language == input.language {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Post is already written in '{}'",
            input.language
        ))));
    }

    let translation = TranslationRepo::upsert_post(
        &state.pool,
        post_id,
        &input.language,
        &input.title,
        &input.content,
    )
    .await?;

    Ok(Json(DataResponse { data: translation }))
}

/// GET /api/v1/posts/{post_id}/translations
pub async fn list_post_translations(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PostTranslation>>>> {
    fetch_post(&state, post_id).await?;
    let translations = TranslationRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: translations }))
}

/// GET /api/v1/posts/{post_id}/translations/{language}
pub async fn get_post_translation(
    State(state): State<AppState>,
    Path((post_id, language)): Path<(DbId, String)>,
) -> AppResult<Json<DataResponse<PostTranslation>>> {
    validate_language(&language)?;
    fetch_post(&state, post_id).await?;

    let translation = TranslationRepo::get_post(&state.pool, post_id, &language)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No '{language}' translation for post {post_id}"))
        })?;
    Ok(Json(DataResponse { data: translation }))
}

/// DELETE /api/v1/posts/{post_id}/translations/{language}
pub async fn delete_post_translation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((post_id, language)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let removed = TranslationRepo::delete_post(&state.pool, post_id, &language).await?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "No '{language}' translation for post {post_id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/tags/{tag_id}/translations
pub async fn upsert_tag_translation(
    State(state): State<AppState>,
    RequireAuthor(_user): RequireAuthor,
    Path(tag_id): Path<DbId>,
    Json(input): Json<UpsertNameTranslation>,
) -> AppResult<Json<DataResponse<NameTranslation>>> {
    validate_language(&input.language)?;
    validate_name(&input.name)?;

    TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "tag",
            id: tag_id,
        }))?;

    let translation =
        TranslationRepo::upsert_tag(&state.pool, tag_id, &input.language, &input.name).await?;
    Ok(Json(DataResponse { data: translation }))
}

/// GET /api/v1/tags/{tag_id}/translations
pub async fn list_tag_translations(
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<NameTranslation>>>> {
    TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "tag",
            id: tag_id,
        }))?;

    let translations = TranslationRepo::list_for_tag(&state.pool, tag_id).await?;
    Ok(Json(DataResponse { data: translations }))
}

/// PUT /api/v1/categories/{category_id}/translations
pub async fn upsert_category_translation(
    State(state): State<AppState>,
    RequireAuthor(_user): RequireAuthor,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpsertNameTranslation>,
) -> AppResult<Json<DataResponse<NameTranslation>>> {
    validate_language(&input.language)?;
    validate_name(&input.name)?;

    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id: category_id,
        }))?;

    let translation =
        TranslationRepo::upsert_category(&state.pool, category_id, &input.language, &input.name)
            .await?;
    Ok(Json(DataResponse { data: translation }))
}

/// GET /api/v1/categories/{category_id}/translations
pub async fn list_category_translations(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<NameTranslation>>>> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id: category_id,
        }))?;

    let translations = TranslationRepo::list_for_category(&state.pool, category_id).await?;
    Ok(Json(DataResponse { data: translations }))
}
