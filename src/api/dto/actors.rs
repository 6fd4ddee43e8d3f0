/*
 * Responsibility
 * - actors の request/response DTO
 * - age は数値でも数値文字列 ("25") でも受け付ける
 */
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::repos::actor_repo::{ActorFields, ActorRow};

const TEXT_MAX_CHARS: usize = 32;

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl CreateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err("name is required");
        }
        check_fields(Some(name), self.age, self.gender.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateActorRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl UpdateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        check_fields(self.name.as_deref(), self.age, self.gender.as_deref())
    }

    /// Blank strings are treated as "not sent".
    pub fn fields(&self) -> ActorFields<'_> {
        ActorFields {
            name: non_blank(self.name.as_deref()),
            age: self.age,
            gender: non_blank(self.gender.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_fields(name: Option<&str>, age: Option<i32>, gender: Option<&str>) -> Result<(), &'static str> {
    if let Some(name) = name
        && name.trim().chars().count() > TEXT_MAX_CHARS
    {
        return Err("name must be <= 32 chars");
    }
    if let Some(age) = age
        && age < 0
    {
        return Err("age must be >= 0");
    }
    if let Some(gender) = gender
        && gender.trim().chars().count() > TEXT_MAX_CHARS
    {
        return Err("gender must be <= 32 chars");
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeRepr {
    Number(i32),
    Text(String),
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AgeRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AgeRepr::Number(n)) => Ok(Some(n)),
        Some(AgeRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(AgeRepr::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom("age must be an integer")),
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub actors: Vec<ActorResponse>,
}
