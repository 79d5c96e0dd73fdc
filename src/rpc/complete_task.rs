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

pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let task = db::task::queries_async::select_by_id(params.id, pool).await?;
    if caller.role == Role::Worker && task.worker_id != Some(caller.id) {
        return Err(Error::Unauthorized(format!(
            "Task {} is not assigned to you",
            params.id,
        )));
    }
    let task = db::task::queries_async::complete(params.id, pool).await?;
    info!(caller.name, task.id, "Completed a task");
    Ok(task.into())
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Status, Urgency};
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Error, Result};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let task = db::task::queries_async::insert(
            14,
            Some(kevin.id),
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            None,
            &pool,
        )
        .await?;
        let res = super::run(super::Params { id: task.id }, &kevin, &pool).await?;
        assert_eq!(Status::Completed, res.status);
        assert!(res.completed_at.is_some());
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_double_completion() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let task = db::task::queries_async::insert(
            14,
            Some(kevin.id),
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            None,
            &pool,
        )
        .await?;
        super::run(super::Params { id: task.id }, &kevin, &pool).await?;
        let res = super::run(super::Params { id: task.id }, &kevin, &pool).await;
        assert!(matches!(res, Err(Error::Conflict(_))));
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_other_workers_task() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let maria = db::worker::queries_async::insert("maria", "", Role::Worker, &pool).await?;
        let task = db::task::queries_async::insert(
            14,
            Some(kevin.id),
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            None,
            &pool,
        )
        .await?;
        let res = super::run(super::Params { id: task.id }, &maria, &pool).await;
        assert!(matches!(res, Err(Error::Unauthorized(_))));
        Ok(())
    }
}
