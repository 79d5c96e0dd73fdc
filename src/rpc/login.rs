use crate::db::worker::schema::Role;
use crate::{db, Error, Result};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub name: String,
    pub password: String,
    pub label: Option<String>,
}

#[derive(Serialize)]
pub struct Res {
    pub token: String,
    pub worker_id: i64,
    pub name: String,
    pub role: Role,
}

/// Trades a name and password for a bearer token. Unknown names, deleted
/// workers and wrong passwords all fail with the same message.
pub async fn run(params: Params, pool: &Pool) -> Result<Res> {
    let worker = db::worker::queries_async::select_by_name(params.name, pool)
        .await
        .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
    let parsed_hash = PasswordHash::new(&worker.password)
        .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
    Argon2::default()
        .verify_password(params.password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::Unauthorized("Invalid credentials".into()))?;
    let secret = uuid::Uuid::new_v4().to_string();
    let label = params.label.unwrap_or("login".into());
    db::token::queries_async::insert(worker.id, label, &secret, pool).await?;
    info!(worker.id, worker.name, "Worker logged in");
    Ok(Res {
        token: secret,
        worker_id: worker.id,
        name: worker.name,
        role: worker.role,
    })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, service, Result};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let password = service::auth::hash_password("hunter2")?;
        let worker =
            db::worker::queries_async::insert("kevin", password, Role::Worker, &pool).await?;
        let res = super::run(
            super::Params {
                name: "kevin".into(),
                password: "hunter2".into(),
                label: None,
            },
            &pool,
        )
        .await?;
        assert_eq!(worker.id, res.worker_id);
        let token = db::token::queries_async::select_by_secret(res.token, &pool).await?;
        assert_eq!(worker.id, token.worker_id);
        Ok(())
    }

    #[actix_web::test]
    async fn run_masks_failures() -> Result<()> {
        let pool = mock_pool().await;
        let password = service::auth::hash_password("hunter2")?;
        db::worker::queries_async::insert("kevin", password, Role::Worker, &pool).await?;
        let wrong_password = super::run(
            super::Params {
                name: "kevin".into(),
                password: "hunter3".into(),
                label: None,
            },
            &pool,
        )
        .await;
        let unknown_name = super::run(
            super::Params {
                name: "mallory".into(),
                password: "hunter2".into(),
                label: None,
            },
            &pool,
        )
        .await;
        assert_eq!(
            "Invalid credentials",
            wrong_password.err().unwrap().to_string(),
        );
        assert_eq!(
            "Invalid credentials",
            unknown_name.err().unwrap().to_string(),
        );
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_passwordless_worker() -> Result<()> {
        let pool = mock_pool().await;
        db::worker::queries_async::insert("kiosk", "", Role::Client, &pool).await?;
        let res = super::run(
            super::Params {
                name: "kiosk".into(),
                password: "".into(),
                label: None,
            },
            &pool,
        )
        .await;
        assert!(res.is_err());
        Ok(())
    }
}
