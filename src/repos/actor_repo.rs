/*
 * Responsibility
 * - actors テーブル向け SQLx 操作
 * - age / gender は nullable、PATCH は送られた項目だけ上書き
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ActorRow {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

/// Field set for inserts and partial updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActorFields<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub gender: Option<&'a str>,
}

#[async_trait]
pub trait ActorRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<ActorRow>, RepoError>;

    async fn create(
        &self,
        name: &str,
        age: Option<i32>,
        gender: Option<&str>,
    ) -> Result<ActorRow, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<ActorRow>, RepoError>;

    async fn update(&self, id: i64, fields: ActorFields<'_>)
    -> Result<Option<ActorRow>, RepoError>;

    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgActorRepo {
    db: PgPool,
}

impl PgActorRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActorRepo for PgActorRepo {
    async fn list(&self) -> Result<Vec<ActorRow>, RepoError> {
        let rows = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    async fn create(
        &self,
        name: &str,
        age: Option<i32>,
        gender: Option<&str>,
    ) -> Result<ActorRow, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            INSERT INTO actors (name, age, gender)
            VALUES ($1, $2, $3)
            RETURNING id, name, age, gender
            "#,
        )
        .bind(name)
        .bind(age)
        .bind(gender)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<ActorRow>, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
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
        fields: ActorFields<'_>,
    ) -> Result<Option<ActorRow>, RepoError> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            UPDATE actors
            SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                gender = COALESCE($4, gender)
            WHERE id = $1
            RETURNING id, name, age, gender
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.age)
        .bind(fields.gender)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        // performances rows go with the actor (ON DELETE CASCADE)
        let result = sqlx::query(
            r#"
            DELETE FROM actors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
