use super::{
    queries,
    schema::{Category, Task, Urgency},
};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    building_id: i64,
    worker_id: Option<i64>,
    title: impl Into<String>,
    description: impl Into<String>,
    category: Category,
    urgency: Urgency,
    due_at: Option<OffsetDateTime>,
    pool: &Pool,
) -> Result<Task> {
    let title = title.into();
    let description = description.into();
    pool.get()
        .await?
        .interact(move |conn| {
            queries::insert(
                building_id,
                worker_id,
                &title,
                &description,
                category,
                urgency,
                due_at,
                conn,
            )
        })
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Task> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_id(id, conn))
        .await?
}

pub async fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<Task>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_updated_since(updated_since, limit, conn))
        .await?
}

pub async fn select_by_worker(
    worker_id: i64,
    period_start: OffsetDateTime,
    period_end: OffsetDateTime,
    pool: &Pool,
) -> Result<Vec<Task>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_worker(worker_id, period_start, period_end, conn))
        .await?
}

pub async fn select_by_building(
    building_id: i64,
    period_start: OffsetDateTime,
    period_end: OffsetDateTime,
    pool: &Pool,
) -> Result<Vec<Task>> {
    pool.get()
        .await?
        .interact(move |conn| {
            queries::select_by_building(building_id, period_start, period_end, conn)
        })
        .await?
}

pub async fn start(id: i64, pool: &Pool) -> Result<Task> {
    pool.get()
        .await?
        .interact(move |conn| queries::start(id, conn))
        .await?
}

pub async fn complete(id: i64, pool: &Pool) -> Result<Task> {
    pool.get()
        .await?
        .interact(move |conn| queries::complete(id, conn))
        .await?
}

pub async fn reopen(id: i64, pool: &Pool) -> Result<Task> {
    pool.get()
        .await?
        .interact(move |conn| queries::reopen(id, conn))
        .await?
}
