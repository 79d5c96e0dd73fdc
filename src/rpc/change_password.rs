use crate::db::worker::schema::Worker;
use crate::{db, service, Error, Result};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct Res {
    pub worker_id: i64,
}

pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    let parsed_hash = PasswordHash::new(&caller.password)
        .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
    Argon2::default()
        .verify_password(params.old_password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
    if params.new_password.is_empty() {
        return Err(Error::invalid_input("New password cannot be empty"));
    }
    let password = service::auth::hash_password(&params.new_password)?;
    db::worker::queries_async::set_password(caller.id, password, pool).await?;
    info!(caller.id, caller.name, "Worker changed their password");
    Ok(Res {
        worker_id: caller.id,
    })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, service, Result};
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let password = service::auth::hash_password("hunter2")?;
        let worker =
            db::worker::queries_async::insert("kevin", password, Role::Worker, &pool).await?;
        let worker = db::worker::queries_async::select_by_id(worker.id, &pool).await?;
        super::run(
            super::Params {
                old_password: "hunter2".into(),
                new_password: "hunter3".into(),
            },
            &worker,
            &pool,
        )
        .await?;
        let updated = db::worker::queries_async::select_by_id(worker.id, &pool).await?;
        let parsed = PasswordHash::new(&updated.password).unwrap();
        assert!(Argon2::default()
            .verify_password("hunter3".as_bytes(), &parsed)
            .is_ok());
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_wrong_old_password() -> Result<()> {
        let pool = mock_pool().await;
        let password = service::auth::hash_password("hunter2")?;
        let worker =
            db::worker::queries_async::insert("kevin", password, Role::Worker, &pool).await?;
        let worker = db::worker::queries_async::select_by_id(worker.id, &pool).await?;
        let res = super::run(
            super::Params {
                old_password: "wrong".into(),
                new_password: "hunter3".into(),
            },
            &worker,
            &pool,
        )
        .await;
        assert_eq!("Invalid credentials", res.err().unwrap().to_string());
        Ok(())
    }
}
