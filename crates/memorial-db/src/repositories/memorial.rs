//! PostgreSQL implementation of MemorialRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use memorial_core::entities::{Comment, MemorialRecord, UserSnapshot};
use memorial_core::error::DomainError;
use memorial_core::search::{SearchField, SearchQuery};
use memorial_core::traits::{MemorialRepository, RepoResult};
use memorial_core::value_objects::{RecordId, UserId};

use crate::mappers::MemorialInsert;
use crate::models::MemorialModel;

use super::error::{map_db_error, map_unique_violation, record_not_found};

/// `SELECT <all model columns> FROM memorials` followed by `$tail`
macro_rules! select_memorials {
    ($tail:literal) => {
        concat!(
            r"
            SELECT id, legacy_id, name, plaque, death_date, birth_date, age, block, mother, father,
                   cemetery, street, nationality, burial_type, epitaph, latitude, longitude,
                   images, comments, available, owner, adopter, created_at, updated_at
            FROM memorials
            ",
            $tail
        )
    };
}

/// Raw and folded column behind an autocomplete field
fn field_columns(field: SearchField) -> (&'static str, &'static str) {
    match field {
        SearchField::Name => ("name", "name_search"),
        SearchField::Street => ("street", "street_search"),
        SearchField::Block => ("block", "block_search"),
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// PostgreSQL implementation of MemorialRepository
#[derive(Clone)]
pub struct PgMemorialRepository {
    pool: PgPool,
}

impl PgMemorialRepository {
    /// Create a new PgMemorialRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemorialRepository for PgMemorialRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<MemorialRecord>> {
        let result = sqlx::query_as::<_, MemorialModel>(select_memorials!("WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(MemorialRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_legacy_id(&self, legacy_id: &str) -> RepoResult<Option<MemorialRecord>> {
        let result = sqlx::query_as::<_, MemorialModel>(select_memorials!("WHERE legacy_id = $1"))
            .bind(legacy_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(MemorialRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_latest(&self, limit: i64) -> RepoResult<Vec<MemorialRecord>> {
        let rows = sqlx::query_as::<_, MemorialModel>(select_memorials!(
            "ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemorialRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<MemorialRecord>> {
        let rows = sqlx::query_as::<_, MemorialModel>(select_memorials!(
            "WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemorialRecord::from).collect())
    }

    #[instrument(skip(self, query), fields(q = query.normalized()))]
    async fn search(&self, query: &SearchQuery, limit: usize) -> RepoResult<Vec<MemorialRecord>> {
        // A row qualifies unless some term is absent from all four folded columns
        let rows = sqlx::query_as::<_, MemorialModel>(select_memorials!(
            r#"
            WHERE NOT EXISTS (
                SELECT 1 FROM unnest($2::text[]) AS t(term)
                WHERE strpos(name_search, t.term) = 0
                  AND strpos(street_search, t.term) = 0
                  AND strpos(block_search, t.term) = 0
                  AND strpos(plaque_search, t.term) = 0
            )
            ORDER BY
                CASE
                    WHEN starts_with(name_search, $1) THEN 3
                    WHEN strpos(name_search, $1) > 0 THEN 2
                    ELSE 1
                END DESC,
                name_search COLLATE "C",
                name COLLATE "C"
            LIMIT $3
            "#
        ))
        .bind(query.normalized())
        .bind(query.terms())
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemorialRecord::from).collect())
    }

    #[instrument(skip(self, query), fields(q = query.normalized()))]
    async fn suggest_by_name(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<MemorialRecord>> {
        let rows = sqlx::query_as::<_, MemorialModel>(select_memorials!(
            r#"
            WHERE strpos(name_search, $1) > 0
            ORDER BY starts_with(name_search, $1) DESC, name_search COLLATE "C", name COLLATE "C"
            LIMIT $2
            "#
        ))
        .bind(query.normalized())
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(MemorialRecord::from).collect())
    }

    #[instrument(skip(self, query), fields(q = query.normalized()))]
    async fn distinct_values(
        &self,
        field: SearchField,
        query: &SearchQuery,
        limit: usize,
    ) -> RepoResult<Vec<String>> {
        let (column, folded) = field_columns(field);
        // Column names come from a fixed table, never from input
        let sql = format!(
            r#"
            SELECT btrim({column}) AS value
            FROM memorials
            WHERE strpos({folded}, $1) > 0 AND btrim(coalesce({column}, '')) <> ''
            GROUP BY btrim({column})
            ORDER BY min({folded}) COLLATE "C", btrim({column}) COLLATE "C"
            LIMIT $2
            "#
        );

        sqlx::query_scalar::<_, String>(&sql)
            .bind(query.normalized())
            .bind(sql_limit(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn create(&self, record: &MemorialRecord) -> RepoResult<()> {
        let row = MemorialInsert::new(record);

        sqlx::query(
            r"
            INSERT INTO memorials (
                id, legacy_id, name, plaque, death_date, birth_date, age, block, mother, father,
                cemetery, street, nationality, burial_type, epitaph, latitude, longitude,
                images, comments, available, owner_id, owner, adopter,
                name_search, street_search, block_search, plaque_search,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23,
                $24, $25, $26, $27,
                $28, $29
            )
            ",
        )
        .bind(row.id)
        .bind(&record.legacy_id)
        .bind(&record.name)
        .bind(&record.plaque)
        .bind(&record.death_date)
        .bind(&record.birth_date)
        .bind(&record.age)
        .bind(&record.block)
        .bind(&record.mother)
        .bind(&record.father)
        .bind(&record.cemetery)
        .bind(&record.street)
        .bind(&record.nationality)
        .bind(row.burial_type)
        .bind(&record.epitaph)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(&record.images)
        .bind(Json(&record.comments))
        .bind(record.available)
        .bind(row.owner_id)
        .bind(Json(record.owner()))
        .bind(record.adopter.as_ref().map(Json))
        .bind(&row.search.name)
        .bind(&row.search.street)
        .bind(&row.search.block)
        .bind(&row.search.plaque)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Only the legacy id carries a unique index besides the key
            map_unique_violation(e, || {
                DomainError::ValidationError("Legacy id already in use".to_string())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, record), fields(record_id = %record.id))]
    async fn update_details(&self, record: &MemorialRecord) -> RepoResult<()> {
        let row = MemorialInsert::new(record);

        let result = sqlx::query(
            r"
            UPDATE memorials
            SET name = $2, plaque = $3, death_date = $4, birth_date = $5, age = $6,
                block = $7, mother = $8, father = $9,
                cemetery = $10, street = $11, nationality = $12, burial_type = $13,
                epitaph = $14, latitude = $15, longitude = $16, images = $17,
                name_search = $18, street_search = $19, block_search = $20, plaque_search = $21,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(&record.name)
        .bind(&record.plaque)
        .bind(&record.death_date)
        .bind(&record.birth_date)
        .bind(&record.age)
        .bind(&record.block)
        .bind(&record.mother)
        .bind(&record.father)
        .bind(&record.cemetery)
        .bind(&record.street)
        .bind(&record.nationality)
        .bind(row.burial_type)
        .bind(&record.epitaph)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(&record.images)
        .bind(&row.search.name)
        .bind(&row.search.street)
        .bind(&row.search.block)
        .bind(&row.search.plaque)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(record_not_found(record.id));
        }

        Ok(())
    }

    #[instrument(skip(self, adopter), fields(adopter_id = %adopter.id))]
    async fn set_adopter(&self, id: RecordId, adopter: &UserSnapshot) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE memorials
            SET adopter = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(Json(adopter))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(record_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_available(&self, id: RecordId, available: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE memorials
            SET available = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(available)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(record_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn add_comment(&self, id: RecordId, comment: &Comment) -> RepoResult<Vec<Comment>> {
        // Appending in SQL keeps concurrent comments from overwriting each other
        let result = sqlx::query_scalar::<_, Json<Vec<Comment>>>(
            r"
            UPDATE memorials
            SET comments = comments || jsonb_build_array($2::jsonb), updated_at = NOW()
            WHERE id = $1
            RETURNING comments
            ",
        )
        .bind(id.into_inner())
        .bind(Json(comment))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(|json| json.0)
            .ok_or_else(|| record_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM memorials WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(record_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMemorialRepository>();
    }

    #[test]
    fn test_select_macro_appends_clause() {
        let sql = select_memorials!("WHERE id = $1");
        assert!(sql.contains("FROM memorials"));
        assert!(sql.trim_end().ends_with("WHERE id = $1"));
    }
}
