use super::{queries, schema::Assignment};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn insert(worker_id: i64, building_id: i64, pool: &Pool) -> Result<Assignment> {
    pool.get()
        .await?
        .interact(move |conn| queries::insert(worker_id, building_id, conn))
        .await?
}

pub async fn delete(worker_id: i64, building_id: i64, pool: &Pool) -> Result<Assignment> {
    pool.get()
        .await?
        .interact(move |conn| queries::delete(worker_id, building_id, conn))
        .await?
}

pub async fn select_by_worker(worker_id: i64, pool: &Pool) -> Result<Vec<Assignment>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_worker(worker_id, conn))
        .await?
}

pub async fn select_by_building(building_id: i64, pool: &Pool) -> Result<Vec<Assignment>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_building(building_id, conn))
        .await?
}
