//! In-memory repositories for router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::repos::actor_repo::{ActorFields, ActorRepo, ActorRow};
use crate::repos::error::RepoError;
use crate::repos::movie_repo::{MovieRepo, MovieRow};

struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryMovieRepo {
    table: Mutex<Table<MovieRow>>,
}

impl MemoryMovieRepo {
    pub fn with_titles(titles: &[&str]) -> Self {
        let repo = Self::default();
        {
            let mut table = repo.table.lock().expect("lock");
            for title in titles {
                let id = table.next_id();
                table.rows.push(MovieRow {
                    id,
                    title: title.to_string(),
                    release_date: NaiveDate::from_ymd_opt(2020, 12, 25).expect("date"),
                });
            }
        }
        repo
    }
}

#[async_trait]
impl MovieRepo for MemoryMovieRepo {
    async fn list(&self) -> Result<Vec<MovieRow>, RepoError> {
        Ok(self.table.lock().expect("lock").rows.clone())
    }

    async fn create(
        &self,
        title: &str,
        release_date: Option<NaiveDate>,
    ) -> Result<MovieRow, RepoError> {
        let mut table = self.table.lock().expect("lock");
        if table.rows.iter().any(|m| m.title == title) {
            return Err(RepoError::Conflict);
        }
        let row = MovieRow {
            id: table.next_id(),
            title: title.to_string(),
            release_date: release_date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<MovieRow>, RepoError> {
        let table = self.table.lock().expect("lock");
        Ok(table.rows.iter().find(|m| m.id == id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        release_date: Option<NaiveDate>,
    ) -> Result<Option<MovieRow>, RepoError> {
        let mut table = self.table.lock().expect("lock");
        if let Some(title) = title
            && table.rows.iter().any(|m| m.id != id && m.title == title)
        {
            return Err(RepoError::Conflict);
        }
        let Some(row) = table.rows.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            row.title = title.to_string();
        }
        if let Some(date) = release_date {
            row.release_date = date;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let mut table = self.table.lock().expect("lock");
        let before = table.rows.len();
        table.rows.retain(|m| m.id != id);
        Ok(table.rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryActorRepo {
    table: Mutex<Table<ActorRow>>,
}

impl MemoryActorRepo {
    pub fn with_names(names: &[&str]) -> Self {
        let repo = Self::default();
        {
            let mut table = repo.table.lock().expect("lock");
            for name in names {
                let id = table.next_id();
                table.rows.push(ActorRow {
                    id,
                    name: name.to_string(),
                    age: Some(20),
                    gender: Some("male".to_string()),
                });
            }
        }
        repo
    }
}

#[async_trait]
impl ActorRepo for MemoryActorRepo {
    async fn list(&self) -> Result<Vec<ActorRow>, RepoError> {
        Ok(self.table.lock().expect("lock").rows.clone())
    }

    async fn create(
        &self,
        name: &str,
        age: Option<i32>,
        gender: Option<&str>,
    ) -> Result<ActorRow, RepoError> {
        let mut table = self.table.lock().expect("lock");
        let row = ActorRow {
            id: table.next_id(),
            name: name.to_string(),
            age,
            gender: gender.map(str::to_string),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<ActorRow>, RepoError> {
        let table = self.table.lock().expect("lock");
        Ok(table.rows.iter().find(|a| a.id == id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        fields: ActorFields<'_>,
    ) -> Result<Option<ActorRow>, RepoError> {
        let mut table = self.table.lock().expect("lock");
        let Some(row) = table.rows.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(name) = fields.name {
            row.name = name.to_string();
        }
        if let Some(age) = fields.age {
            row.age = Some(age);
        }
        if let Some(gender) = fields.gender {
            row.gender = Some(gender.to_string());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let mut table = self.table.lock().expect("lock");
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);
        Ok(table.rows.len() < before)
    }
}
