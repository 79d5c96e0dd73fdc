use super::{queries, schema::Report};
use crate::Result;
use deadpool_sqlite::Pool;
use time::{Date, OffsetDateTime};

pub async fn upsert_for_date(
    building_id: i64,
    date: Date,
    total_tasks: i64,
    completed_tasks: i64,
    overdue_tasks: i64,
    pool: &Pool,
) -> Result<Report> {
    pool.get()
        .await?
        .interact(move |conn| {
            queries::upsert_for_date(
                building_id,
                date,
                total_tasks,
                completed_tasks,
                overdue_tasks,
                conn,
            )
        })
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Report> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_id(id, conn))
        .await?
}

pub async fn select_by_building(
    building_id: i64,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<Report>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_building(building_id, limit, conn))
        .await?
}

pub async fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<Report>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_updated_since(updated_since, limit, conn))
        .await?
}

pub async fn select_latest_by_building(building_id: i64, pool: &Pool) -> Result<Option<Report>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_latest_by_building(building_id, conn))
        .await?
}
