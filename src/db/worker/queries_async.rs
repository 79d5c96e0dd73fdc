use super::{
    queries,
    schema::{Role, Worker},
};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

pub async fn insert(
    name: impl Into<String>,
    password: impl Into<String>,
    role: Role,
    pool: &Pool,
) -> Result<Worker> {
    let name = name.into();
    let password = password.into();
    pool.get()
        .await?
        .interact(move |conn| queries::insert(&name, &password, role, conn))
        .await?
}

pub async fn select_all(include_deleted: bool, pool: &Pool) -> Result<Vec<Worker>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_all(include_deleted, conn))
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Worker> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_id(id, conn))
        .await?
}

pub async fn select_by_name(name: impl Into<String>, pool: &Pool) -> Result<Worker> {
    let name = name.into();
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_name(&name, conn))
        .await?
}

pub async fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<Worker>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_updated_since(updated_since, limit, conn))
        .await?
}

pub async fn set_password(id: i64, password: impl Into<String>, pool: &Pool) -> Result<()> {
    let password = password.into();
    pool.get()
        .await?
        .interact(move |conn| queries::set_password(id, password, conn))
        .await?
}

pub async fn set_current_building(
    id: i64,
    building_id: Option<i64>,
    pool: &Pool,
) -> Result<Worker> {
    pool.get()
        .await?
        .interact(move |conn| queries::set_current_building(id, building_id, conn))
        .await?
}

pub async fn set_skills(id: i64, skills: Vec<String>, pool: &Pool) -> Result<Worker> {
    pool.get()
        .await?
        .interact(move |conn| queries::set_skills(id, &skills, conn))
        .await?
}
