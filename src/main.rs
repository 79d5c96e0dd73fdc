use crate::db::worker::schema::Role;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod db;
mod db_utils;
mod error;
mod log;
mod rest;
mod rpc;
mod server;
mod service;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[actix_web::main]
async fn main() -> Result<()> {
    init_logging();
    let mut conn = db_utils::open_connection()?;
    db::migration::run(&mut conn)?;
    drop(conn);
    let pool = db_utils::pool()?;
    service::auth::upgrade_plaintext_passwords(&pool).await?;
    let args: Vec<String> = env::args().collect();
    let command = match args.get(1) {
        Some(command) => command,
        None => Err(Error::Generic("No command passed".into()))?,
    };
    match command.as_str() {
        "server" => server::run(pool).await?,
        "add-worker" => add_worker(&args[2..], &pool).await?,
        "sync-weather" => sync_weather(&pool).await?,
        "generate-reports" => generate_reports(args.get(2), &pool).await?,
        "verify-schema" => verify_schema(&pool).await?,
        other => Err(Error::Generic(format!("Unknown command: {other}")))?,
    }
    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cfg!(debug_assertions) {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    }
}

/// The first admin has to come from somewhere. RPC worker creation needs an
/// admin token, this command needs shell access to the host instead.
async fn add_worker(args: &[String], pool: &deadpool_sqlite::Pool) -> Result<()> {
    let [name, password, role] = args else {
        return Err(Error::Generic(
            "Usage: add-worker <name> <password> <role>".into(),
        ));
    };
    let role: Role = role
        .parse()
        .map_err(|_| Error::Generic(format!("Unknown role: {role}")))?;
    let password = service::auth::hash_password(password)?;
    let worker = db::worker::queries_async::insert(name, password, role, pool).await?;
    info!(worker.id, worker.name, "Added a worker");
    Ok(())
}

async fn sync_weather(pool: &deadpool_sqlite::Pool) -> Result<()> {
    let res = service::weather::sync_all(pool).await?;
    info!(
        res.buildings_synced,
        res.buildings_failed, res.observations_pruned, "Weather sync finished",
    );
    Ok(())
}

async fn generate_reports(date: Option<&String>, pool: &deadpool_sqlite::Pool) -> Result<()> {
    let date = match date {
        Some(date) => time::Date::parse(
            date,
            &time::macros::format_description!("[year]-[month]-[day]"),
        )?,
        None => time::OffsetDateTime::now_utc().date(),
    };
    let res = service::report::generate(date, pool).await?;
    info!(
        date = date.to_string(),
        res.reports_written, "Report generation finished",
    );
    Ok(())
}

async fn verify_schema(pool: &deadpool_sqlite::Pool) -> Result<()> {
    let res = service::verifier::run(pool).await?;
    for check in &res.checks {
        if check.passed {
            info!(check.name, "Check passed");
        } else {
            error!(check.name, check.details, "Check failed");
        }
    }
    if !res.passed {
        return Err(Error::Generic("Schema verification failed".into()));
    }
    Ok(())
}
