use crate::db::task::schema::{Status, Task};
use crate::db::worker::schema::{Role, Worker};
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub id: i64,
}

#[derive(Serialize)]
pub struct Res {
    pub id: i64,
    pub building_id: i64,
    pub worker_id: Option<i64>,
    pub title: String,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl From<Task> for Res {
    fn from(val: Task) -> Self {
        Res {
            id: val.id,
            building_id: val.building_id,
            worker_id: val.worker_id,
            title: val.title,
            status: val.status,
            due_at: val.due_at,
            completed_at: val.completed_at,
        }
    }
}

/// Workers can only start tasks assigned to them, supervisors can start
/// anything. Keeps one worker from grabbing another's checklist by accident.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let task = db::task::queries_async::select_by_id(params.id, pool).await?;
    if caller.role == Role::Worker && task.worker_id != Some(caller.id) {
        return Err(Error::Unauthorized(format!(
            "Task {} is not assigned to you",
            params.id,
        )));
    }
    let task = db::task::queries_async::start(params.id, pool).await?;
    info!(caller.name, task.id, "Started a task");
    Ok(task.into())
}
