use crate::db::worker::schema::Worker;
use crate::service::verifier::{self, CheckResult};
use crate::Result;
use deadpool_sqlite::Pool;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
pub struct Res {
    pub passed: bool,
    pub checks: Vec<CheckResult>,
}

pub async fn run(caller: &Worker, pool: &Pool) -> Result<Res> {
    let res = verifier::run(pool).await?;
    info!(caller.name, res.passed, "Requested a schema verification");
    Ok(Res {
        passed: res.passed,
        checks: res.checks,
    })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Result};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let admin = db::worker::queries_async::insert("admin", "", Role::Admin, &pool).await?;
        let res = super::run(&admin, &pool).await?;
        assert!(res.passed);
        assert_eq!(4, res.checks.len());
        Ok(())
    }
}
