use crate::service::stats;
use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use time::{Date, OffsetDateTime};
use tracing::info;

#[derive(Serialize)]
pub struct GenerateResult {
    pub date: Date,
    pub buildings_total: i64,
    pub reports_written: i64,
}

/// Rolls up every live building's tasks for the date into a daily report.
/// Buildings without tasks that day are skipped, and rerunning a date
/// rewrites the counts in place.
pub async fn generate(date: Date, pool: &Pool) -> Result<GenerateResult> {
    let conf = db::conf::queries_async::select(pool).await?;
    let buildings = db::building::queries_async::select_all(false, pool).await?;
    let (period_start, period_end) = stats::day_bounds(date);
    let now = OffsetDateTime::now_utc();
    let mut written = 0;
    for building in &buildings {
        let tasks = db::task::queries_async::select_by_building(
            building.id,
            period_start,
            period_end,
            pool,
        )
        .await?;
        if tasks.is_empty() {
            continue;
        }
        let progress = stats::progress(&tasks, conf.task_overdue_grace_mins, now);
        let report = db::report::queries_async::upsert_for_date(
            building.id,
            date,
            progress.total,
            progress.completed,
            progress.overdue,
            pool,
        )
        .await?;
        info!(
            building.id,
            report.id,
            date = date.to_string(),
            total_tasks = progress.total,
            "Generated report",
        );
        written += 1;
    }
    Ok(GenerateResult {
        date,
        buildings_total: buildings.len() as i64,
        reports_written: written,
    })
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Urgency};
    use crate::test::mock_pool;
    use crate::{db, Result};
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    #[actix_web::test]
    async fn generate() -> Result<()> {
        let pool = mock_pool().await;
        let museum =
            db::building::queries_async::insert(14, "Rubin Museum", 40.7, -74.0, "", "", &pool)
                .await?;
        let idle =
            db::building::queries_async::insert(15, "Annex", 40.8, -74.1, "", "", &pool).await?;
        let done = db::task::queries_async::insert(
            museum.id,
            None,
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            Some(datetime!(2025-06-14 09:00 UTC)),
            &pool,
        )
        .await?;
        db::task::queries_async::complete(done.id, &pool).await?;
        db::task::queries_async::insert(
            museum.id,
            None,
            "Check boiler",
            "",
            Category::Maintenance,
            Urgency::High,
            Some(datetime!(2025-06-14 08:00 UTC)),
            &pool,
        )
        .await?;
        let res = super::generate(date!(2025 - 06 - 14), &pool).await?;
        assert_eq!(2, res.buildings_total);
        assert_eq!(1, res.reports_written);
        let report = db::report::queries_async::select_latest_by_building(museum.id, &pool)
            .await?
            .unwrap();
        assert_eq!(2, report.total_tasks);
        assert_eq!(1, report.completed_tasks);
        assert_eq!(1, report.overdue_tasks);
        assert!(
            db::report::queries_async::select_latest_by_building(idle.id, &pool)
                .await?
                .is_none()
        );
        Ok(())
    }

    #[actix_web::test]
    async fn generate_is_idempotent() -> Result<()> {
        let pool = mock_pool().await;
        let museum =
            db::building::queries_async::insert(14, "Rubin Museum", 40.7, -74.0, "", "", &pool)
                .await?;
        db::task::queries_async::insert(
            museum.id,
            None,
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            Some(datetime!(2025-06-14 09:00 UTC)),
            &pool,
        )
        .await?;
        super::generate(date!(2025 - 06 - 14), &pool).await?;
        let first = db::report::queries_async::select_latest_by_building(museum.id, &pool)
            .await?
            .unwrap();
        super::generate(date!(2025 - 06 - 14), &pool).await?;
        let second = db::report::queries_async::select_latest_by_building(museum.id, &pool)
            .await?
            .unwrap();
        assert_eq!(first.id, second.id);
        let all = db::report::queries_async::select_by_building(museum.id, None, &pool).await?;
        assert_eq!(1, all.len());
        Ok(())
    }

    #[actix_web::test]
    async fn generate_skips_deleted_buildings() -> Result<()> {
        let pool = mock_pool().await;
        let museum =
            db::building::queries_async::insert(14, "Rubin Museum", 40.7, -74.0, "", "", &pool)
                .await?;
        db::task::queries_async::insert(
            museum.id,
            None,
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            Some(datetime!(2025-06-14 09:00 UTC)),
            &pool,
        )
        .await?;
        db::building::queries_async::set_deleted_at(
            museum.id,
            Some(OffsetDateTime::now_utc()),
            &pool,
        )
        .await?;
        let res = super::generate(date!(2025 - 06 - 14), &pool).await?;
        assert_eq!(0, res.buildings_total);
        assert_eq!(0, res.reports_written);
        Ok(())
    }
}
