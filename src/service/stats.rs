use crate::db::report::schema::Report;
use crate::db::task::schema::{Status, Task};
use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use time::{Date, Duration, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskProgress {
    pub total: i64,
    pub completed: i64,
    pub remaining: i64,
    pub overdue: i64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct BuildingStatistics {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    pub completion_rate: f64,
    pub workers_on_site: i64,
}

/// UTC day window, start is inclusive and end is exclusive.
pub fn day_bounds(date: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_utc();
    (start, start + Duration::days(1))
}

pub fn progress(tasks: &[Task], grace_mins: i64, now: OffsetDateTime) -> TaskProgress {
    let total = tasks.len() as i64;
    let completed = tasks
        .iter()
        .filter(|it| it.status == Status::Completed)
        .count() as i64;
    let overdue = tasks
        .iter()
        .filter(|it| it.is_overdue(grace_mins, now))
        .count() as i64;
    let percentage = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    TaskProgress {
        total,
        completed,
        remaining: total - completed,
        overdue,
        percentage,
    }
}

/// Counts consecutive fully completed days ending today. Reports must be
/// sorted newest first. Today's rollup may not be generated yet, so a chain
/// ending yesterday still counts.
pub fn completion_streak(reports: &[Report], today: Date) -> i64 {
    let mut streak = 0;
    let mut expected = today;
    for report in reports {
        if report.date > expected {
            continue;
        }
        if report.date != expected {
            if streak == 0 && report.date.next_day() == Some(expected) {
                expected = report.date;
            } else {
                break;
            }
        }
        if report.total_tasks == 0 || report.completed_tasks < report.total_tasks {
            break;
        }
        streak += 1;
        expected = match expected.previous_day() {
            Some(day) => day,
            None => break,
        };
    }
    streak
}

pub async fn building_statistics(
    building_id: i64,
    date: Date,
    pool: &Pool,
) -> Result<BuildingStatistics> {
    let conf = db::conf::queries_async::select(pool).await?;
    let (period_start, period_end) = day_bounds(date);
    let tasks =
        db::task::queries_async::select_by_building(building_id, period_start, period_end, pool)
            .await?;
    let progress = progress(
        &tasks,
        conf.task_overdue_grace_mins,
        OffsetDateTime::now_utc(),
    );
    let workers = db::worker::queries_async::select_all(false, pool).await?;
    let workers_on_site = workers
        .iter()
        .filter(|it| it.current_building_id == Some(building_id))
        .count() as i64;
    let completion_rate = if progress.total == 0 {
        0.0
    } else {
        progress.completed as f64 / progress.total as f64
    };
    Ok(BuildingStatistics {
        total_tasks: progress.total,
        completed_tasks: progress.completed,
        overdue_tasks: progress.overdue,
        completion_rate,
        workers_on_site,
    })
}

pub async fn building_streak(building_id: i64, today: Date, pool: &Pool) -> Result<i64> {
    let reports = db::report::queries_async::select_by_building(building_id, None, pool).await?;
    Ok(completion_streak(&reports, today))
}
