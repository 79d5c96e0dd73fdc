use super::{queries, schema::Building};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

pub async fn insert(
    id: i64,
    name: impl Into<String>,
    lat: f64,
    lon: f64,
    address: impl Into<String>,
    image_name: impl Into<String>,
    pool: &Pool,
) -> Result<Building> {
    let name = name.into();
    let address = address.into();
    let image_name = image_name.into();
    pool.get()
        .await?
        .interact(move |conn| queries::insert(id, name, lat, lon, address, image_name, conn))
        .await?
}

pub async fn select_all(include_deleted: bool, pool: &Pool) -> Result<Vec<Building>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_all(include_deleted, conn))
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Building> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_id(id, conn))
        .await?
}

pub async fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<Building>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_updated_since(updated_since, limit, conn))
        .await?
}

pub async fn set_deleted_at(
    id: i64,
    deleted_at: Option<OffsetDateTime>,
    pool: &Pool,
) -> Result<Building> {
    pool.get()
        .await?
        .interact(move |conn| queries::set_deleted_at(id, deleted_at, conn))
        .await?
}

#[cfg(test)]
pub async fn set_updated_at(
    id: i64,
    updated_at: OffsetDateTime,
    pool: &Pool,
) -> Result<Building> {
    pool.get()
        .await?
        .interact(move |conn| queries::set_updated_at(id, updated_at, conn))
        .await?
}
