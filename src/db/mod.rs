pub mod assignment;
pub mod building;
pub mod conf;
pub mod migration;
pub mod report;
pub mod task;
pub mod token;
pub mod weather;
pub mod worker;

#[cfg(test)]
mod test {
    pub(super) fn conn() -> rusqlite::Connection {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        super::migration::run(&mut conn).unwrap();
        conn
    }
}
