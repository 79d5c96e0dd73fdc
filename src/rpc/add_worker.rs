use crate::db::worker::schema::{Role, Worker};
use crate::{db, service, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub name: String,
    pub password: String,
    pub role: Role,
    pub skills: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct Res {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub skills: Vec<String>,
}

/// A worker created with an empty password cannot log in until an admin
/// sets one, which suits shared kiosk accounts.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    if params.name.trim().is_empty() {
        return Err(Error::invalid_input("Worker name cannot be empty"));
    }
    if db::worker::queries_async::select_by_name(params.name.clone(), pool)
        .await
        .is_ok()
    {
        return Err(Error::conflict(format!(
            "Worker {} already exists",
            params.name,
        )));
    }
    let password = if params.password.is_empty() {
        "".into()
    } else {
        service::auth::hash_password(&params.password)?
    };
    let worker = db::worker::queries_async::insert(params.name, password, params.role, pool).await?;
    let worker = match params.skills {
        Some(skills) if !skills.is_empty() => {
            db::worker::queries_async::set_skills(worker.id, skills, pool).await?
        }
        _ => worker,
    };
    info!(
        caller.name,
        worker.id,
        worker.name,
        role = %worker.role,
        "Added a worker",
    );
    Ok(Res {
        id: worker.id,
        name: worker.name,
        role: worker.role,
        skills: worker.skills,
    })
}
