use crate::db::worker::schema::Worker;
use crate::{service, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub date: Option<Date>,
}

#[derive(Serialize)]
pub struct Res {
    pub date: Date,
    pub buildings_total: i64,
    pub reports_written: i64,
    pub time_s: f64,
}

pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let started_at = OffsetDateTime::now_utc();
    let date = params.date.unwrap_or(started_at.date());
    let res = service::report::generate(date, pool).await?;
    info!(
        caller.name,
        date = date.to_string(),
        res.reports_written,
        "Requested report generation",
    );
    Ok(Res {
        date: res.date,
        buildings_total: res.buildings_total,
        reports_written: res.reports_written,
        time_s: (OffsetDateTime::now_utc() - started_at).as_seconds_f64(),
    })
}

#[cfg(test)]
mod test {
    use crate::db::task::schema::{Category, Urgency};
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Result};
    use time::macros::{date, datetime};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let admin = db::worker::queries_async::insert("admin", "", Role::Admin, &pool).await?;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        db::task::queries_async::insert(
            14,
            None,
            "Mop lobby",
            "",
            Category::Cleaning,
            Urgency::Medium,
            Some(datetime!(2025-06-14 09:00 UTC)),
            &pool,
        )
        .await?;
        let res = super::run(
            super::Params {
                date: Some(date!(2025 - 06 - 14)),
            },
            &admin,
            &pool,
        )
        .await?;
        assert_eq!(date!(2025 - 06 - 14), res.date);
        assert_eq!(1, res.reports_written);
        Ok(())
    }
}
