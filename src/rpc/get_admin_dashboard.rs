use crate::service::stats;
use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct Res {
    pub buildings: Vec<BuildingRow>,
    pub workers_total: i64,
    pub workers_on_site: i64,
    pub tasks_total: i64,
    pub tasks_completed: i64,
    pub tasks_overdue: i64,
}

#[derive(Serialize)]
pub struct BuildingRow {
    pub id: i64,
    pub name: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    pub completion_rate: f64,
    pub workers_on_site: i64,
    pub streak_days: i64,
}

/// The whole-portfolio rollup, one row per live building plus today's totals.
pub async fn run(pool: &Pool) -> Result<Res> {
    let today = OffsetDateTime::now_utc().date();
    let buildings = db::building::queries_async::select_all(false, pool).await?;
    let mut rows: Vec<BuildingRow> = Vec::new();
    for building in buildings {
        let statistics = stats::building_statistics(building.id, today, pool).await?;
        let streak_days = stats::building_streak(building.id, today, pool).await?;
        rows.push(BuildingRow {
            id: building.id,
            name: building.name,
            total_tasks: statistics.total_tasks,
            completed_tasks: statistics.completed_tasks,
            overdue_tasks: statistics.overdue_tasks,
            completion_rate: statistics.completion_rate,
            workers_on_site: statistics.workers_on_site,
            streak_days,
        });
    }
    let workers = db::worker::queries_async::select_all(false, pool).await?;
    Ok(Res {
        workers_total: workers.len() as i64,
        workers_on_site: workers
            .iter()
            .filter(|it| it.current_building_id.is_some())
            .count() as i64,
        tasks_total: rows.iter().map(|it| it.total_tasks).sum(),
        tasks_completed: rows.iter().map(|it| it.completed_tasks).sum(),
        tasks_overdue: rows.iter().map(|it| it.overdue_tasks).sum(),
        buildings: rows,
    })
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Urgency};
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Result};
    use time::OffsetDateTime;

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        db::building::queries_async::insert(15, "Annex", 40.75, -73.98, "", "", &pool).await?;
        let kevin = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
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
        let res = super::run(&pool).await?;
        assert_eq!(2, res.buildings.len());
        assert_eq!(1, res.workers_total);
        assert_eq!(1, res.workers_on_site);
        assert_eq!(1, res.tasks_total);
        assert_eq!(1, res.tasks_completed);
        let museum = res.buildings.iter().find(|it| it.id == 14).unwrap();
        assert_eq!(1, museum.workers_on_site);
        Ok(())
    }
}
