use crate::db::worker::schema::Worker;
use crate::{db, Error, Result};
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

pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let worker = db::worker::queries_async::select_by_id(params.worker_id, pool).await?;
    if worker.deleted_at.is_some() {
        return Err(Error::not_found(format!(
            "Worker {} does not exist",
            params.worker_id,
        )));
    }
    let building = db::building::queries_async::select_by_id(params.building_id, pool).await?;
    if building.deleted_at.is_some() {
        return Err(Error::not_found(format!(
            "Building {} does not exist",
            params.building_id,
        )));
    }
    let assignment = db::assignment::queries_async::insert(worker.id, building.id, pool).await?;
    info!(
        caller.name,
        assignment.worker_id, assignment.building_id, "Assigned a worker to a building",
    );
    Ok(Res {
        worker_id: assignment.worker_id,
        building_id: assignment.building_id,
    })
}
