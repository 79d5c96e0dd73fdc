use crate::db::task::schema::{Category, Status, Task, Urgency};
use crate::db::worker::schema::Worker;
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub building_id: i64,
    pub worker_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub urgency: Urgency,
    #[serde(default)]
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
}

#[derive(Serialize)]
pub struct Res {
    pub id: i64,
    pub building_id: i64,
    pub worker_id: Option<i64>,
    pub title: String,
    pub category: Category,
    pub urgency: Urgency,
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
            category: val.category,
            urgency: val.urgency,
            status: val.status,
            due_at: val.due_at,
            completed_at: val.completed_at,
        }
    }
}

pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    if params.title.trim().is_empty() {
        return Err(Error::invalid_input("Task title cannot be empty"));
    }
    let building = db::building::queries_async::select_by_id(params.building_id, pool).await?;
    if building.deleted_at.is_some() {
        return Err(Error::not_found(format!(
            "Building {} does not exist",
            params.building_id,
        )));
    }
    if let Some(worker_id) = params.worker_id {
        let worker = db::worker::queries_async::select_by_id(worker_id, pool).await?;
        if worker.deleted_at.is_some() {
            return Err(Error::not_found(format!(
                "Worker {worker_id} does not exist",
            )));
        }
    }
    let task = db::task::queries_async::insert(
        params.building_id,
        params.worker_id,
        params.title,
        params.description.unwrap_or_default(),
        params.category,
        params.urgency,
        params.due_at,
        pool,
    )
    .await?;
    info!(
        caller.name,
        task.id,
        task.building_id,
        title = task.title,
        "Added a task",
    );
    Ok(task.into())
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Status, Urgency};
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Error, Result};
    use time::macros::datetime;

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let supervisor =
            db::worker::queries_async::insert("sam", "", Role::Supervisor, &pool).await?;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let res = super::run(
            super::Params {
                building_id: 14,
                worker_id: Some(kevin.id),
                title: "Mop lobby".into(),
                description: None,
                category: Category::Cleaning,
                urgency: Urgency::Medium,
                due_at: Some(datetime!(2025-06-14 09:00 UTC)),
            },
            &supervisor,
            &pool,
        )
        .await?;
        assert_eq!(Status::Pending, res.status);
        assert_eq!(Some(kevin.id), res.worker_id);
        assert_eq!(Some(datetime!(2025-06-14 09:00 UTC)), res.due_at);
        Ok(())
    }

    #[actix_web::test]
    async fn run_requires_existing_building() -> Result<()> {
        let pool = mock_pool().await;
        let supervisor =
            db::worker::queries_async::insert("sam", "", Role::Supervisor, &pool).await?;
        let res = super::run(
            super::Params {
                building_id: 999,
                worker_id: None,
                title: "Mop lobby".into(),
                description: None,
                category: Category::Cleaning,
                urgency: Urgency::Medium,
                due_at: None,
            },
            &supervisor,
            &pool,
        )
        .await;
        assert!(res.is_err());
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_empty_title() -> Result<()> {
        let pool = mock_pool().await;
        let supervisor =
            db::worker::queries_async::insert("sam", "", Role::Supervisor, &pool).await?;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let res = super::run(
            super::Params {
                building_id: 14,
                worker_id: None,
                title: " ".into(),
                description: None,
                category: Category::Cleaning,
                urgency: Urgency::Medium,
                due_at: None,
            },
            &supervisor,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        Ok(())
    }
}
