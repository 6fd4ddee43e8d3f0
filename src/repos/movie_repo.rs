/*
 * Responsibility
 * - movies テーブル向け SQLx 操作
 * - title は unique (大文字小文字は呼び出し側で正規化済み)、重複は RepoError::Conflict
 * - release_date 未指定なら CURRENT_DATE
 */
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}

#[async_trait]
pub trait MovieRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<MovieRow>, RepoError>;

    async fn create(
        &self,
        title: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<MovieRow, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<MovieRow>, RepoError>;

    /// `None` fields are left untouched. Returns `None` if the movie does not exist.
    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        release_date: Option<NaiveDate>,
    ) -> Result<Option<MovieRow>, RepoError>;

    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgMovieRepo {
    db: PgPool,
}

impl PgMovieRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MovieRepo for PgMovieRepo {
    async fn list(&self) -> Result<Vec<MovieRow>, RepoError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn create(
        &self,
        title: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<MovieRow, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movies (title, release_date)
            VALUES ($1, COALESCE($2, CURRENT_DATE))
            RETURNING id, title, release_date
            "#,
        )
        .bind(title)
        .bind(release_date)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<MovieRow>, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        release_date: Option<NaiveDate>,
    ) -> Result<Option<MovieRow>, RepoError> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            UPDATE movies
            SET
                title = COALESCE($2, title),
                release_date = COALESCE($3, release_date)
            WHERE id = $1
            RETURNING id, title, release_date
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(release_date)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
