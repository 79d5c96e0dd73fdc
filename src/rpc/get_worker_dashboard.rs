use crate::db::building::schema::Building;
use crate::db::task::schema::{Category, Status, Task, Urgency};
use crate::db::weather::schema::WeatherObservation;
use crate::db::worker::schema::{Role, Worker};
use crate::service::stats::TaskProgress;
use crate::{service, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Deserialize)]
pub struct Params {
    pub worker_id: Option<i64>,
}

#[derive(Serialize)]
pub struct Res {
    pub worker: WorkerView,
    pub buildings: Vec<BuildingView>,
    pub tasks: Vec<TaskView>,
    pub progress: TaskProgress,
    pub streak_days: i64,
    pub weather: Option<WeatherView>,
}

#[derive(Serialize)]
pub struct WorkerView {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub current_building_id: Option<i64>,
}

impl From<Worker> for WorkerView {
    fn from(val: Worker) -> Self {
        WorkerView {
            id: val.id,
            name: val.name,
            role: val.role,
            skills: val.skills,
            current_building_id: val.current_building_id,
        }
    }
}

#[derive(Serialize)]
pub struct BuildingView {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub image_name: String,
}

impl From<Building> for BuildingView {
    fn from(val: Building) -> Self {
        BuildingView {
            id: val.id,
            name: val.name,
            lat: val.lat,
            lon: val.lon,
            address: val.address,
            image_name: val.image_name,
        }
    }
}

#[derive(Serialize)]
pub struct TaskView {
    pub id: i64,
    pub building_id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub urgency: Urgency,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
}

impl From<Task> for TaskView {
    fn from(val: Task) -> Self {
        TaskView {
            id: val.id,
            building_id: val.building_id,
            title: val.title,
            description: val.description,
            category: val.category,
            urgency: val.urgency,
            status: val.status,
            due_at: val.due_at,
            completed_at: val.completed_at,
        }
    }
}

#[derive(Serialize)]
pub struct WeatherView {
    pub condition: String,
    pub temperature: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<WeatherObservation> for WeatherView {
    fn from(val: WeatherObservation) -> Self {
        WeatherView {
            condition: val.condition,
            temperature: val.temperature,
            humidity: val.humidity,
            wind_speed: val.wind_speed,
            created_at: val.created_at,
        }
    }
}

/// Defaults to the caller's own dashboard. Peeking at somebody else's
/// requires supervisor rights. The streak belongs to the building the worker
/// is clocked into, a clocked-out worker sees zero.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let worker_id = params.worker_id.unwrap_or(caller.id);
    if worker_id != caller.id && caller.role < Role::Supervisor {
        return Err(Error::Unauthorized(
            "You can only view your own dashboard".into(),
        ));
    }
    let now = OffsetDateTime::now_utc();
    let context = service::context::worker_context(worker_id, now, pool).await?;
    let streak_days = match context.worker.current_building_id {
        Some(building_id) => service::stats::building_streak(building_id, now.date(), pool).await?,
        None => 0,
    };
    Ok(Res {
        worker: context.worker.into(),
        buildings: context.buildings.into_iter().map(Into::into).collect(),
        tasks: context.tasks.into_iter().map(Into::into).collect(),
        progress: context.progress,
        streak_days,
        weather: context.weather.map(Into::into),
    })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Error, Result};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        db::assignment::queries_async::insert(kevin.id, 14, &pool).await?;
        let res = super::run(super::Params { worker_id: None }, &kevin, &pool).await?;
        assert_eq!(kevin.id, res.worker.id);
        assert_eq!(1, res.buildings.len());
        assert_eq!(0, res.progress.total);
        Ok(())
    }

    #[actix_web::test]
    async fn run_hides_other_workers_from_workers() -> Result<()> {
        let pool = mock_pool().await;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let maria = db::worker::queries_async::insert("maria", "", Role::Worker, &pool).await?;
        let res = super::run(
            super::Params {
                worker_id: Some(maria.id),
            },
            &kevin,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::Unauthorized(_))));
        Ok(())
    }

    #[actix_web::test]
    async fn run_allows_supervisor_to_view_others() -> Result<()> {
        let pool = mock_pool().await;
        let sam = db::worker::queries_async::insert("sam", "", Role::Supervisor, &pool).await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let res = super::run(
            super::Params {
                worker_id: Some(kevin.id),
            },
            &sam,
            &pool,
        )
        .await?;
        assert_eq!(kevin.id, res.worker.id);
        Ok(())
    }
}
