use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::errors::{internal_error, ApiError};
use crate::store::{NewTranslation, StoreError, Translation, TranslationStore};

/// Upper bound for `maxLength`; out-of-range inputs normalize to it.
pub const MAX_LENGTH_LIMIT: i64 = 1024;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub id: i64,
    pub category: String,
    pub locale: String,
    pub key: String,
    pub value: String,
    pub initial_value: String,
    pub max_length: i64,
    pub created_at: String,
    pub updated_at: String,
    pub is_customizable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationListResponse {
    pub translations: Vec<TranslationResponse>,
    pub count: usize,
}

/// Business rules over the translation store: existence checks, maxLength
/// normalization, and current-vs-initial value selection.
#[derive(Clone)]
pub struct TranslationService {
    store: TranslationStore,
}

impl TranslationService {
    pub fn new(store: TranslationStore) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        category: &str,
        locale: &str,
        key: &str,
        value: &str,
        max_length: i64,
    ) -> Result<TranslationResponse, ApiError> {
        // Friendly pre-check for the sequential case; the unique index is
        // what actually guards against concurrent duplicate creates.
        if self
            .store
            .exists_by_triple(category, locale, key)
            .await
            .map_err(|err| storage_error("existence check", &err))?
        {
            return Err(ApiError::already_exists(category, locale, key));
        }

        let now = Local::now().naive_local();
        let record = NewTranslation {
            category,
            locale,
            key,
            value,
            initial_value: value,
            max_length: limit_length(max_length),
            created_at: now,
            updated_at: now,
        };

        match self.store.insert(record).await {
            Ok(saved) => Ok(map_to_response(&saved, false)),
            Err(StoreError::Duplicate) => Err(ApiError::already_exists(category, locale, key)),
            Err(err) => Err(storage_error("insert", &err)),
        }
    }

    pub async fn update(
        &self,
        category: &str,
        locale: &str,
        key: &str,
        value: &str,
    ) -> Result<TranslationResponse, ApiError> {
        let updated = self
            .store
            .update_value(category, locale, key, value, Local::now().naive_local())
            .await
            .map_err(|err| storage_error("update", &err))?
            .ok_or_else(|| ApiError::not_found(category, locale, key))?;

        Ok(map_to_response(&updated, false))
    }

    pub async fn delete(&self, category: &str, locale: &str, key: &str) -> Result<(), ApiError> {
        let deleted = self
            .store
            .delete_by_triple(category, locale, key)
            .await
            .map_err(|err| storage_error("delete", &err))?;

        if !deleted {
            return Err(ApiError::not_found(category, locale, key));
        }

        Ok(())
    }

    pub async fn find(
        &self,
        category: &str,
        locale: &str,
        key: &str,
        use_initial_value: bool,
    ) -> Result<TranslationResponse, ApiError> {
        let translation = self
            .store
            .find_by_triple(category, locale, key)
            .await
            .map_err(|err| storage_error("lookup", &err))?
            .ok_or_else(|| ApiError::not_found(category, locale, key))?;

        Ok(map_to_response(&translation, use_initial_value))
    }

    pub async fn find_all_by_category_and_locale(
        &self,
        category: &str,
        locale: &str,
        use_initial_value: bool,
    ) -> Result<TranslationListResponse, ApiError> {
        let translations = self
            .store
            .find_by_category_and_locale(category, locale)
            .await
            .map_err(|err| storage_error("category listing", &err))?;

        Ok(map_to_list_response(&translations, use_initial_value))
    }

    pub async fn find_all_by_locale(
        &self,
        locale: &str,
        use_initial_value: bool,
    ) -> Result<TranslationListResponse, ApiError> {
        let translations = self
            .store
            .find_by_locale(locale)
            .await
            .map_err(|err| storage_error("locale listing", &err))?;

        Ok(map_to_list_response(&translations, use_initial_value))
    }
}

fn storage_error(operation: &str, err: &StoreError) -> ApiError {
    internal_error(&format!("translation {operation} failed: {err}"))
}

/// Normalize maxLength into (0, 1024]; out-of-range values fall back to the
/// limit instead of failing.
fn limit_length(value: i64) -> i64 {
    if value <= 0 || value >= MAX_LENGTH_LIMIT {
        MAX_LENGTH_LIMIT
    } else {
        value
    }
}

fn map_to_response(translation: &Translation, use_initial_value: bool) -> TranslationResponse {
    let value = if use_initial_value {
        translation.initial_value.clone()
    } else {
        translation.value.clone()
    };

    TranslationResponse {
        id: translation.id,
        category: translation.category.clone(),
        locale: translation.locale.clone(),
        key: translation.key.clone(),
        value,
        initial_value: translation.initial_value.clone(),
        max_length: translation.max_length,
        created_at: format_timestamp(translation.created_at),
        updated_at: format_timestamp(translation.updated_at),
        is_customizable: true,
    }
}

fn map_to_list_response(
    translations: &[Translation],
    use_initial_value: bool,
) -> TranslationListResponse {
    let responses: Vec<TranslationResponse> = translations
        .iter()
        .map(|translation| map_to_response(translation, use_initial_value))
        .collect();
    let count = responses.len();

    TranslationListResponse {
        translations: responses,
        count,
    }
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}
