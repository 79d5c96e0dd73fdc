use crate::db::worker::schema::Role;
use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;

static EXPECTED_TABLES: &[&str] = &[
    "building",
    "worker",
    "task",
    "assignment",
    "weather_observation",
    "report",
    "conf",
    "token",
];

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

impl CheckResult {
    fn passed(name: &str, details: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            details: details.into(),
        }
    }

    fn failed(name: &str, details: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            details: details.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResult {
    pub passed: bool,
    pub checks: Vec<CheckResult>,
}

/// Fixed diagnostic suite over the live database. Every check runs even if
/// an earlier one fails, the summary flag is the AND of them all.
pub async fn run(pool: &Pool) -> Result<VerifyResult> {
    let checks = vec![
        tables_exist(pool).await?,
        conf_present(pool).await?,
        orphaned_tasks(pool).await?,
        workers_without_assignments(pool).await?,
    ];
    Ok(VerifyResult {
        passed: checks.iter().all(|it| it.passed),
        checks,
    })
}

async fn tables_exist(pool: &Pool) -> Result<CheckResult> {
    let tables: Vec<String> = pool
        .get()
        .await?
        .interact(|conn| -> Result<Vec<String>> {
            let mut stmt =
                conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
            let tables = stmt
                .query_map((), |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(tables)
        })
        .await??;
    let missing: Vec<&str> = EXPECTED_TABLES
        .iter()
        .filter(|it| !tables.iter().any(|table| table == *it))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(CheckResult::passed(
            "tables_exist",
            format!("All {} tables are present", EXPECTED_TABLES.len()),
        ))
    } else {
        Ok(CheckResult::failed(
            "tables_exist",
            format!("Missing tables: {}", missing.join(", ")),
        ))
    }
}

async fn conf_present(pool: &Pool) -> Result<CheckResult> {
    match db::conf::queries_async::select(pool).await {
        Ok(conf) if !conf.weather_api_url.is_empty() => Ok(CheckResult::passed(
            "conf_present",
            "Conf row is present and the weather provider is set",
        )),
        Ok(_) => Ok(CheckResult::failed(
            "conf_present",
            "Conf row is present but the weather provider is empty",
        )),
        Err(e) => Ok(CheckResult::failed(
            "conf_present",
            format!("Conf row is missing: {e}"),
        )),
    }
}

/// Foreign keys are declared but SQLite does not enforce them by default,
/// so a buggy import can leave tasks pointing nowhere.
async fn orphaned_tasks(pool: &Pool) -> Result<CheckResult> {
    let orphans: i64 = pool
        .get()
        .await?
        .interact(|conn| -> Result<i64> {
            let sql = r#"
                SELECT count(1)
                FROM task
                WHERE building_id NOT IN (SELECT id FROM building)
                OR (worker_id IS NOT NULL AND worker_id NOT IN (SELECT id FROM worker))
            "#;
            conn.query_row(sql, (), |row| row.get(0)).map_err(Into::into)
        })
        .await??;
    if orphans == 0 {
        Ok(CheckResult::passed(
            "orphaned_tasks",
            "Every task points at an existing building and worker",
        ))
    } else {
        Ok(CheckResult::failed(
            "orphaned_tasks",
            format!("{orphans} tasks reference a missing building or worker"),
        ))
    }
}

async fn workers_without_assignments(pool: &Pool) -> Result<CheckResult> {
    let workers = db::worker::queries_async::select_all(false, pool).await?;
    let mut unassigned: Vec<String> = Vec::new();
    for worker in &workers {
        if worker.role != Role::Worker {
            continue;
        }
        let assignments =
            db::assignment::queries_async::select_by_worker(worker.id, pool).await?;
        if assignments.is_empty() {
            unassigned.push(worker.name.clone());
        }
    }
    if unassigned.is_empty() {
        Ok(CheckResult::passed(
            "workers_without_assignments",
            "Every live worker covers at least one building",
        ))
    } else {
        Ok(CheckResult::failed(
            "workers_without_assignments",
            format!("Workers without a building: {}", unassigned.join(", ")),
        ))
    }
}
