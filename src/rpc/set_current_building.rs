use crate::db::worker::schema::Worker;
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub building_id: Option<i64>,
}

#[derive(Serialize)]
pub struct Res {
    pub worker_id: i64,
    pub building_id: Option<i64>,
}

/// Clocks the caller into a building, or out of all of them when
/// `building_id` is null.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    if let Some(building_id) = params.building_id {
        let building = db::building::queries_async::select_by_id(building_id, pool).await?;
        if building.deleted_at.is_some() {
            return Err(Error::not_found(format!(
                "Building {building_id} does not exist",
            )));
        }
    }
    let worker =
        db::worker::queries_async::set_current_building(caller.id, params.building_id, pool)
            .await?;
    match worker.current_building_id {
        Some(building_id) => info!(worker.name, building_id, "Worker clocked in"),
        None => info!(worker.name, "Worker clocked out"),
    }
    Ok(Res {
        worker_id: worker.id,
        building_id: worker.current_building_id,
    })
}
