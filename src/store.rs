use chrono::NaiveDateTime;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Translation already exists")]
    Duplicate,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Database(err),
        }
    }
}

/// A persisted translation record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Translation {
    pub id: i64,
    pub category: String,
    pub locale: String,
    #[sqlx(rename = "key_name")]
    pub key: String,
    #[sqlx(rename = "translation")]
    pub value: String,
    #[sqlx(rename = "initial_translation")]
    pub initial_value: String,
    pub max_length: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields for a record that has not been persisted yet.
#[derive(Debug, Clone, Copy)]
pub struct NewTranslation<'a> {
    pub category: &'a str,
    pub locale: &'a str,
    pub key: &'a str,
    pub value: &'a str,
    pub initial_value: &'a str,
    pub max_length: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Persistence for translation records, keyed by (category, locale, key).
///
/// The UNIQUE index on that triple is the authoritative guard against
/// concurrent duplicate inserts; [`StoreError::Duplicate`] surfaces the
/// violation to the caller.
#[derive(Clone)]
pub struct TranslationStore {
    pool: SqlitePool,
}

impl TranslationStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn find_by_triple(
        &self,
        category: &str,
        locale: &str,
        key: &str,
    ) -> Result<Option<Translation>, StoreError> {
        let translation = sqlx::query_as::<_, Translation>(
            r#"
            SELECT * FROM translations
            WHERE category = ? AND locale = ? AND key_name = ?
            "#,
        )
        .bind(category)
        .bind(locale)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(translation)
    }

    pub async fn exists_by_triple(
        &self,
        category: &str,
        locale: &str,
        key: &str,
    ) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM translations
                WHERE category = ? AND locale = ? AND key_name = ?
            )
            "#,
        )
        .bind(category)
        .bind(locale)
        .bind(key)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn find_by_category_and_locale(
        &self,
        category: &str,
        locale: &str,
    ) -> Result<Vec<Translation>, StoreError> {
        let translations = sqlx::query_as::<_, Translation>(
            r#"
            SELECT * FROM translations WHERE category = ? AND locale = ?
            "#,
        )
        .bind(category)
        .bind(locale)
        .fetch_all(&self.pool)
        .await?;

        Ok(translations)
    }

    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Translation>, StoreError> {
        let translations = sqlx::query_as::<_, Translation>(
            r#"
            SELECT * FROM translations WHERE category = ?
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(translations)
    }

    pub async fn find_by_locale(&self, locale: &str) -> Result<Vec<Translation>, StoreError> {
        let translations = sqlx::query_as::<_, Translation>(
            r#"
            SELECT * FROM translations WHERE locale = ?
            "#,
        )
        .bind(locale)
        .fetch_all(&self.pool)
        .await?;

        Ok(translations)
    }

    pub async fn find_all(&self) -> Result<Vec<Translation>, StoreError> {
        let translations = sqlx::query_as::<_, Translation>("SELECT * FROM translations")
            .fetch_all(&self.pool)
            .await?;

        Ok(translations)
    }

    pub async fn insert(&self, record: NewTranslation<'_>) -> Result<Translation, StoreError> {
        let translation = sqlx::query_as::<_, Translation>(
            r#"
            INSERT INTO translations
                (category, locale, key_name, translation, initial_translation,
                 max_length, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(record.category)
        .bind(record.locale)
        .bind(record.key)
        .bind(record.value)
        .bind(record.initial_value)
        .bind(record.max_length)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(translation)
    }

    /// Replace the current value of an existing record; everything else stays
    /// untouched. Returns `None` when the triple does not exist.
    pub async fn update_value(
        &self,
        category: &str,
        locale: &str,
        key: &str,
        value: &str,
        updated_at: NaiveDateTime,
    ) -> Result<Option<Translation>, StoreError> {
        let translation = sqlx::query_as::<_, Translation>(
            r#"
            UPDATE translations
            SET translation = ?, updated_at = ?
            WHERE category = ? AND locale = ? AND key_name = ?
            RETURNING *
            "#,
        )
        .bind(value)
        .bind(updated_at)
        .bind(category)
        .bind(locale)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(translation)
    }

    /// Returns `false` when the triple does not exist.
    pub async fn delete_by_triple(
        &self,
        category: &str,
        locale: &str,
        key: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM translations
            WHERE category = ? AND locale = ? AND key_name = ?
            "#,
        )
        .bind(category)
        .bind(locale)
        .bind(key)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn setup_store() -> TranslationStore {
        TranslationStore::new("sqlite::memory:").await.unwrap()
    }

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn record<'a>(category: &'a str, locale: &'a str, key: &'a str) -> NewTranslation<'a> {
        NewTranslation {
            category,
            locale,
            key,
            value: "Hello",
            initial_value: "Hello",
            max_length: 1024,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_triple() {
        let store = setup_store().await;

        let created = store.insert(record("app", "en", "greeting")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.key, "greeting");
        assert_eq!(created.value, "Hello");

        let found = store
            .find_by_triple("app", "en", "greeting")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.initial_value, "Hello");
        assert_eq!(found.created_at, timestamp());
    }

    #[tokio::test]
    async fn exists_by_triple_reflects_inserts() {
        let store = setup_store().await;
        assert!(!store.exists_by_triple("app", "en", "greeting").await.unwrap());

        store.insert(record("app", "en", "greeting")).await.unwrap();
        assert!(store.exists_by_triple("app", "en", "greeting").await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_triple_is_rejected_by_unique_index() {
        let store = setup_store().await;
        store.insert(record("app", "en", "greeting")).await.unwrap();

        let err = store.insert(record("app", "en", "greeting")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn same_key_in_other_locale_is_allowed() {
        let store = setup_store().await;
        store.insert(record("app", "en", "greeting")).await.unwrap();
        store.insert(record("app", "de", "greeting")).await.unwrap();

        assert_eq!(store.find_by_category("app").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_value_touches_only_value_and_updated_at() {
        let store = setup_store().await;
        let created = store.insert(record("app", "en", "greeting")).await.unwrap();

        let later = timestamp() + chrono::Duration::seconds(90);
        let updated = store
            .update_value("app", "en", "greeting", "Hi", later)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.value, "Hi");
        assert_eq!(updated.initial_value, "Hello");
        assert_eq!(updated.max_length, 1024);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[tokio::test]
    async fn update_value_of_missing_triple_returns_none() {
        let store = setup_store().await;
        let updated = store
            .update_value("app", "en", "missing", "Hi", timestamp())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_by_triple_removes_the_record() {
        let store = setup_store().await;
        store.insert(record("app", "en", "greeting")).await.unwrap();

        assert!(store.delete_by_triple("app", "en", "greeting").await.unwrap());
        assert!(!store.exists_by_triple("app", "en", "greeting").await.unwrap());
        assert!(!store.delete_by_triple("app", "en", "greeting").await.unwrap());
    }

    #[tokio::test]
    async fn filters_by_category_locale_and_locale() {
        let store = setup_store().await;
        store.insert(record("app", "en", "greeting")).await.unwrap();
        store.insert(record("app", "de", "greeting")).await.unwrap();
        store.insert(record("mail", "en", "subject")).await.unwrap();

        let app_en = store.find_by_category_and_locale("app", "en").await.unwrap();
        assert_eq!(app_en.len(), 1);
        assert_eq!(app_en[0].key, "greeting");

        let en = store.find_by_locale("en").await.unwrap();
        assert_eq!(en.len(), 2);

        assert_eq!(store.find_all().await.unwrap().len(), 3);
        assert!(store.find_by_category_and_locale("app", "fr").await.unwrap().is_empty());
    }
}
