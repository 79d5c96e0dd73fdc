use crate::db::building::schema::Building;
use crate::db::task::schema::Task;
use crate::db::weather::schema::WeatherObservation;
use crate::db::worker::schema::Worker;
use crate::service::stats::{self, TaskProgress};
use crate::{db, Result};
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

/// Everything a worker's home screen needs: who they are, where they can
/// work, what is on their plate today and how far along they are.
pub struct WorkerContext {
    pub worker: Worker,
    pub buildings: Vec<Building>,
    pub tasks: Vec<Task>,
    pub progress: TaskProgress,
    pub weather: Option<WeatherObservation>,
}

pub async fn worker_context(
    worker_id: i64,
    now: OffsetDateTime,
    pool: &Pool,
) -> Result<WorkerContext> {
    let worker = db::worker::queries_async::select_by_id(worker_id, pool).await?;
    let assignments = db::assignment::queries_async::select_by_worker(worker.id, pool).await?;
    let mut buildings: Vec<Building> = Vec::new();
    for assignment in &assignments {
        let building =
            db::building::queries_async::select_by_id(assignment.building_id, pool).await?;
        if building.deleted_at.is_none() {
            buildings.push(building);
        }
    }
    let (period_start, period_end) = stats::day_bounds(now.date());
    let tasks =
        db::task::queries_async::select_by_worker(worker.id, period_start, period_end, pool)
            .await?;
    let conf = db::conf::queries_async::select(pool).await?;
    let progress = stats::progress(&tasks, conf.task_overdue_grace_mins, now);
    let weather = match worker.current_building_id {
        Some(building_id) => {
            db::weather::queries_async::select_latest_by_building(building_id, pool).await?
        }
        None => None,
    };
    Ok(WorkerContext {
        worker,
        buildings,
        tasks,
        progress,
        weather,
    })
}
