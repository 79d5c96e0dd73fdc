use crate::db::building::schema::Building;
use crate::db::report::schema::Report;
use crate::db::task::schema::{Category, Status, Task, Urgency};
use crate::db::weather::schema::WeatherObservation;
use crate::db::worker::schema::Role;
use crate::service::stats::{self, BuildingStatistics};
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// Enough report history for a month of compliance charts
static REPORT_HISTORY_LIMIT: i64 = 30;

#[derive(Deserialize)]
pub struct Params {
    pub building_id: i64,
}

#[derive(Serialize)]
pub struct Res {
    pub building: BuildingView,
    pub statistics: BuildingStatistics,
    pub streak_days: i64,
    pub tasks: Vec<TaskView>,
    pub workers: Vec<WorkerRow>,
    pub reports: Vec<ReportView>,
    pub weather: Option<WeatherView>,
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

impl From<Task> for TaskView {
    fn from(val: Task) -> Self {
        TaskView {
            id: val.id,
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

#[derive(Serialize)]
pub struct WorkerRow {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub on_site: bool,
}

#[derive(Serialize)]
pub struct ReportView {
    pub date: Date,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
}

impl From<Report> for ReportView {
    fn from(val: Report) -> Self {
        ReportView {
            date: val.date,
            total_tasks: val.total_tasks,
            completed_tasks: val.completed_tasks,
            overdue_tasks: val.overdue_tasks,
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

/// The building-keeper view: today's tasks, completion stats, the assigned
/// crew, the reporting streak, recent report history and the latest weather
/// snapshot for one building.
pub async fn run(params: Params, pool: &Pool) -> Result<Res> {
    let building = db::building::queries_async::select_by_id(params.building_id, pool).await?;
    if building.deleted_at.is_some() {
        return Err(Error::not_found(format!(
            "Building {} does not exist",
            params.building_id,
        )));
    }
    let now = OffsetDateTime::now_utc();
    let statistics = stats::building_statistics(building.id, now.date(), pool).await?;
    let streak_days = stats::building_streak(building.id, now.date(), pool).await?;
    let (period_start, period_end) = stats::day_bounds(now.date());
    let tasks =
        db::task::queries_async::select_by_building(building.id, period_start, period_end, pool)
            .await?;
    let assignments = db::assignment::queries_async::select_by_building(building.id, pool).await?;
    let mut workers = Vec::new();
    for assignment in assignments {
        let worker = db::worker::queries_async::select_by_id(assignment.worker_id, pool).await?;
        if worker.deleted_at.is_some() {
            continue;
        }
        workers.push(WorkerRow {
            id: worker.id,
            name: worker.name,
            role: worker.role,
            on_site: worker.current_building_id == Some(building.id),
        });
    }
    let reports =
        db::report::queries_async::select_by_building(building.id, Some(REPORT_HISTORY_LIMIT), pool)
            .await?;
    let weather = db::weather::queries_async::select_latest_by_building(building.id, pool).await?;
    Ok(Res {
        building: building.into(),
        statistics,
        streak_days,
        tasks: tasks.into_iter().map(Into::into).collect(),
        workers,
        reports: reports.into_iter().map(Into::into).collect(),
        weather: weather.map(Into::into),
    })
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Urgency};
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Result};
    use time::macros::date;
    use time::OffsetDateTime;

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        db::assignment::queries_async::insert(kevin.id, 14, &pool).await?;
        db::worker::queries_async::set_current_building(kevin.id, Some(14), &pool).await?;
        let task = db::task::queries_async::insert(
            14,
            Some(kevin.id),
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            Some(OffsetDateTime::now_utc()),
            &pool,
        )
        .await?;
        db::task::queries_async::complete(task.id, &pool).await?;
        db::report::queries_async::upsert_for_date(14, date!(2025 - 06 - 14), 3, 2, 1, &pool)
            .await?;
        db::weather::queries_async::insert(14, "cloudy", 18.5, 60, 12.0, &pool).await?;
        let res = super::run(super::Params { building_id: 14 }, &pool).await?;
        assert_eq!(14, res.building.id);
        assert_eq!(1, res.statistics.total_tasks);
        assert_eq!(1, res.statistics.completed_tasks);
        assert_eq!(1, res.workers.len());
        assert!(res.workers.first().unwrap().on_site);
        assert_eq!(1, res.reports.len());
        assert_eq!(3, res.reports.first().unwrap().total_tasks);
        assert_eq!("cloudy", res.weather.unwrap().condition);
        Ok(())
    }

    #[actix_web::test]
    async fn run_requires_existing_building() -> Result<()> {
        let pool = mock_pool().await;
        let res = super::run(super::Params { building_id: 999 }, &pool).await;
        assert!(res.is_err());
        Ok(())
    }
}
