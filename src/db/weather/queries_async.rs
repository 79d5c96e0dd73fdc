use super::{queries, schema::WeatherObservation};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

pub async fn insert(
    building_id: i64,
    condition: impl Into<String>,
    temperature: f64,
    humidity: i64,
    wind_speed: f64,
    pool: &Pool,
) -> Result<WeatherObservation> {
    let condition = condition.into();
    pool.get()
        .await?
        .interact(move |conn| {
            queries::insert(building_id, &condition, temperature, humidity, wind_speed, conn)
        })
        .await?
}

pub async fn select_latest_by_building(
    building_id: i64,
    pool: &Pool,
) -> Result<Option<WeatherObservation>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_latest_by_building(building_id, conn))
        .await?
}

pub async fn select_by_building(
    building_id: i64,
    limit: Option<i64>,
    pool: &Pool,
) -> Result<Vec<WeatherObservation>> {
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_building(building_id, limit, conn))
        .await?
}

pub async fn delete_older_than(created_before: OffsetDateTime, pool: &Pool) -> Result<usize> {
    pool.get()
        .await?
        .interact(move |conn| queries::delete_older_than(created_before, conn))
        .await?
}
