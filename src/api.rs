use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::errors::ApiError;
use crate::security::CurrentTenant;
use crate::service::{TranslationListResponse, TranslationResponse};
use crate::AppState;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationRequest {
    #[validate(
        custom(function = "not_blank", message = "category is required"),
        length(max = 100, message = "category must be at most 100 characters")
    )]
    pub category: String,

    #[validate(
        custom(function = "not_blank", message = "locale is required"),
        length(max = 10, message = "locale must be at most 10 characters")
    )]
    pub locale: String,

    #[validate(
        custom(function = "not_blank", message = "key is required"),
        length(max = 200, message = "key must be at most 200 characters")
    )]
    pub key: String,

    #[validate(custom(function = "not_blank", message = "value is required"))]
    pub value: String,

    #[validate(range(min = 0, max = 1024, message = "maxLength must be between 0 and 1024"))]
    pub max_length: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTranslationRequest {
    #[validate(custom(function = "not_blank", message = "category is required"))]
    pub category: String,

    #[validate(custom(function = "not_blank", message = "locale is required"))]
    pub locale: String,

    #[validate(custom(function = "not_blank", message = "key is required"))]
    pub key: String,

    #[validate(custom(function = "not_blank", message = "value is required"))]
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTranslationParams {
    pub category: String,
    pub locale: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTranslationParams {
    pub category: String,
    pub locale: String,
    pub key: String,
    #[serde(default)]
    pub initial_value: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryParams {
    pub category: String,
    pub locale: String,
    #[serde(default)]
    pub initial_value: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleParams {
    pub locale: String,
    #[serde(default)]
    pub initial_value: bool,
}

pub async fn create_translation(
    State(state): State<AppState>,
    CurrentTenant(principal): CurrentTenant,
    Json(request): Json<CreateTranslationRequest>,
) -> Result<(StatusCode, Json<TranslationResponse>), ApiError> {
    request.validate()?;

    tracing::info!(
        tenant_id = %principal.tenant_id,
        category = %request.category,
        locale = %request.locale,
        key = %request.key,
        "Creating translation"
    );

    let response = state
        .service
        .create(
            &request.category,
            &request.locale,
            &request.key,
            &request.value,
            request.max_length,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_translation(
    State(state): State<AppState>,
    CurrentTenant(principal): CurrentTenant,
    Json(request): Json<UpdateTranslationRequest>,
) -> Result<Json<TranslationResponse>, ApiError> {
    request.validate()?;

    tracing::info!(
        tenant_id = %principal.tenant_id,
        category = %request.category,
        locale = %request.locale,
        key = %request.key,
        "Updating translation"
    );

    let response = state
        .service
        .update(&request.category, &request.locale, &request.key, &request.value)
        .await?;

    Ok(Json(response))
}

pub async fn delete_translation(
    State(state): State<AppState>,
    CurrentTenant(principal): CurrentTenant,
    Query(params): Query<DeleteTranslationParams>,
) -> Result<StatusCode, ApiError> {
    tracing::info!(
        tenant_id = %principal.tenant_id,
        category = %params.category,
        locale = %params.locale,
        key = %params.key,
        "Deleting translation"
    );

    state
        .service
        .delete(&params.category, &params.locale, &params.key)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_translation(
    State(state): State<AppState>,
    Query(params): Query<SingleTranslationParams>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let response = state
        .service
        .find(
            &params.category,
            &params.locale,
            &params.key,
            params.initial_value,
        )
        .await?;

    Ok(Json(response))
}

pub async fn get_translations_by_category_and_locale(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<TranslationListResponse>, ApiError> {
    let response = state
        .service
        .find_all_by_category_and_locale(&params.category, &params.locale, params.initial_value)
        .await?;

    Ok(Json(response))
}

pub async fn get_translations_by_locale(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> Result<Json<TranslationListResponse>, ApiError> {
    let response = state
        .service
        .find_all_by_locale(&params.locale, params.initial_value)
        .await?;

    Ok(Json(response))
}
