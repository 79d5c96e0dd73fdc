use crate::db::worker::schema::{Role, Worker};
use crate::db::{token, worker};
use crate::rpc::handler::RpcMethod;
use crate::{db, Error, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher};
use deadpool_sqlite::Pool;
use tracing::warn;

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| e.to_string())?
        .to_string())
}

/// Early deployments stored worker passwords as plain text. Those rows are
/// hashed on boot, so a database predating the hashing code heals itself.
pub async fn upgrade_plaintext_passwords(pool: &Pool) -> Result<()> {
    let workers = worker::queries_async::select_all(true, pool).await?;
    for worker in workers {
        if worker.password.is_empty() {
            continue;
        }
        if PasswordHash::new(&worker.password).is_ok() {
            continue;
        }
        warn!(worker.id, worker.name, "Found plaintext password, upgrading");
        let password = hash_password(&worker.password)?;
        worker::queries_async::set_password(worker.id, password, pool).await?;
    }
    Ok(())
}

/// Resolves a bearer secret into a worker and checks that the worker's role
/// is high enough for the method. All failures look the same to the caller.
pub async fn check_rpc(
    secret: impl Into<String>,
    method: &RpcMethod,
    pool: &Pool,
) -> Result<Worker> {
    let token = token::queries_async::select_by_secret(secret.into(), pool)
        .await
        .map_err(|_| Error::Unauthorized("Invalid token".into()))?;
    let worker = db::worker::queries_async::select_by_id(token.worker_id, pool).await?;
    if worker.deleted_at.is_some() {
        return Err(Error::Unauthorized("Invalid token".into()));
    }
    if !is_allowed(method, worker.role) {
        warn!(
            worker.id,
            worker.name,
            method = %method,
            "Worker tried to call a method above their role",
        );
        return Err(Error::unauthorized(method));
    }
    Ok(worker)
}

pub fn is_allowed(method: &RpcMethod, role: Role) -> bool {
    use RpcMethod::*;
    let min_role = match method {
        Login | Logout | Whoami | ChangePassword | GetBuildingDashboard => Role::Client,
        GetWorkerDashboard | GetAssistantSuggestions | SetCurrentBuilding | StartTask
        | CompleteTask => Role::Worker,
        AddTask | ReopenTask | AssignWorker | UnassignWorker | GetAdminDashboard | SyncWeather => {
            Role::Supervisor
        }
        AddBuilding | AddWorker | GenerateReports | VerifySchema => Role::Admin,
    };
    role >= min_role
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::rpc::handler::RpcMethod;
    use crate::test::mock_pool;
    use crate::{db, Result};
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    #[actix_web::test]
    async fn check_rpc() -> Result<()> {
        let pool = mock_pool().await;
        let worker = db::worker::queries_async::insert("wendy", "", Role::Worker, &pool).await?;
        db::token::queries_async::insert(worker.id, "test", "qwerty", &pool).await?;
        assert!(super::check_rpc("qwerty", &RpcMethod::StartTask, &pool)
            .await
            .is_ok());
        assert!(super::check_rpc("qwerty", &RpcMethod::AddBuilding, &pool)
            .await
            .is_err());
        assert!(super::check_rpc("wrong-secret", &RpcMethod::StartTask, &pool)
            .await
            .is_err());
        Ok(())
    }

    #[actix_web::test]
    async fn check_rpc_rejects_deleted_worker() -> Result<()> {
        let pool = mock_pool().await;
        let worker = db::worker::queries_async::insert("wendy", "", Role::Admin, &pool).await?;
        db::token::queries_async::insert(worker.id, "test", "qwerty", &pool).await?;
        pool.get()
            .await?
            .interact(move |conn| {
                db::worker::queries::set_deleted_at(
                    worker.id,
                    Some(time::OffsetDateTime::now_utc()),
                    conn,
                )
            })
            .await??;
        assert!(super::check_rpc("qwerty", &RpcMethod::Whoami, &pool)
            .await
            .is_err());
        Ok(())
    }

    #[test]
    fn is_allowed() {
        assert!(super::is_allowed(&RpcMethod::Whoami, Role::Client));
        assert!(!super::is_allowed(&RpcMethod::StartTask, Role::Client));
        assert!(super::is_allowed(&RpcMethod::StartTask, Role::Worker));
        assert!(!super::is_allowed(&RpcMethod::AddTask, Role::Worker));
        assert!(super::is_allowed(&RpcMethod::AddTask, Role::Supervisor));
        assert!(!super::is_allowed(&RpcMethod::AddWorker, Role::Supervisor));
        assert!(super::is_allowed(&RpcMethod::AddWorker, Role::Admin));
        assert!(super::is_allowed(&RpcMethod::StartTask, Role::Admin));
    }

    #[test]
    fn hash_password() -> Result<()> {
        let hash = super::hash_password("hunter2")?;
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password("hunter2".as_bytes(), &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password("hunter3".as_bytes(), &parsed)
            .is_err());
        Ok(())
    }

    #[actix_web::test]
    async fn upgrade_plaintext_passwords() -> Result<()> {
        let pool = mock_pool().await;
        let plaintext =
            db::worker::queries_async::insert("wendy", "hunter2", Role::Worker, &pool).await?;
        let empty = db::worker::queries_async::insert("kiosk", "", Role::Client, &pool).await?;
        super::upgrade_plaintext_passwords(&pool).await?;
        let plaintext = db::worker::queries_async::select_by_id(plaintext.id, &pool).await?;
        let parsed = PasswordHash::new(&plaintext.password).unwrap();
        assert!(Argon2::default()
            .verify_password("hunter2".as_bytes(), &parsed)
            .is_ok());
        let empty = db::worker::queries_async::select_by_id(empty.id, &pool).await?;
        assert!(empty.password.is_empty());
        Ok(())
    }
}
