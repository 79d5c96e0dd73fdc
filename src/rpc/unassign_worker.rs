use crate::db::worker::schema::Worker;
use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub worker_id: i64,
    pub building_id: i64,
}

#[derive(Serialize)]
pub struct Res {
    pub worker_id: i64,
    pub building_id: i64,
}

/// Clears the worker's clock-in as well when they were clocked into the
/// building they just lost, otherwise dashboards keep counting them on site.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let assignment =
        db::assignment::queries_async::delete(params.worker_id, params.building_id, pool).await?;
    let worker = db::worker::queries_async::select_by_id(params.worker_id, pool).await?;
    if worker.current_building_id == Some(params.building_id) {
        db::worker::queries_async::set_current_building(worker.id, None, pool).await?;
    }
    info!(
        caller.name,
        assignment.worker_id, assignment.building_id, "Unassigned a worker from a building",
    );
    Ok(Res {
        worker_id: assignment.worker_id,
        building_id: assignment.building_id,
    })
}
