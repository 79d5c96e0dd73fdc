use crate::db::worker::schema::Worker;
use crate::{service, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

#[derive(Serialize)]
pub struct Res {
    pub buildings_total: i64,
    pub buildings_synced: i64,
    pub buildings_failed: i64,
    pub observations_pruned: i64,
    pub time_s: f64,
}

pub async fn run(caller: &Worker, pool: &Pool) -> Result<Res> {
    let started_at = OffsetDateTime::now_utc();
    let res = service::weather::sync_all(pool).await?;
    info!(caller.name, res.buildings_synced, "Requested a weather sync");
    Ok(Res {
        buildings_total: res.buildings_total,
        buildings_synced: res.buildings_synced,
        buildings_failed: res.buildings_failed,
        observations_pruned: res.observations_pruned,
        time_s: (OffsetDateTime::now_utc() - started_at).as_seconds_f64(),
    })
}
