use crate::Result;
use deadpool_sqlite::{Config, Pool, Runtime};
use rusqlite::Connection;
use std::{fs::create_dir_all, path::PathBuf};

pub fn data_dir_file(file_name: &str) -> Result<PathBuf> {
    #[allow(deprecated)]
    let data_dir = std::env::home_dir()
        .ok_or("Home directory does not exist")?
        .join(".local/share/fieldops");
    if !data_dir.exists() {
        create_dir_all(&data_dir)?;
    }
    Ok(data_dir.join(file_name))
}

pub fn open_connection() -> Result<Connection> {
    let conn = Connection::open(data_dir_file("fieldops.db")?)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

// All server workers share a single pool of blocking connections
pub fn pool() -> Result<Pool> {
    Ok(Config::new(data_dir_file("fieldops.db")?)
        .builder(Runtime::Tokio1)?
        .build()?)
}
