use crate::{db, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
pub struct Res {
    pub worker_id: i64,
}

/// Revokes the token that authorized this call. The row stays on record but
/// no longer authenticates.
pub async fn run(secret: impl Into<String>, pool: &Pool) -> Result<Res> {
    let token = db::token::queries_async::delete_by_secret(secret.into(), pool).await?;
    info!(token.worker_id, token.label, "Worker logged out");
    Ok(Res {
        worker_id: token.worker_id,
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
        let worker = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        db::token::queries_async::insert(worker.id, "login", "qwerty", &pool).await?;
        let res = super::run("qwerty", &pool).await?;
        assert_eq!(worker.id, res.worker_id);
        assert!(
            db::token::queries_async::select_by_secret("qwerty", &pool)
                .await
                .is_err()
        );
        assert!(super::run("qwerty", &pool).await.is_err());
        Ok(())
    }
}
