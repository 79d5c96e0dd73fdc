use rusqlite::Row;
use std::sync::OnceLock;

pub const TABLE_NAME: &str = "conf";

pub enum Columns {
    WeatherApiUrl,
    WeatherStaleAfterMins,
    TaskOverdueGraceMins,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::WeatherApiUrl => "weather_api_url",
            Columns::WeatherStaleAfterMins => "weather_stale_after_mins",
            Columns::TaskOverdueGraceMins => "task_overdue_grace_mins",
        }
    }
}

/// Single-row runtime settings, seeded by migration and edited straight in
/// the database.
#[derive(Clone)]
pub struct Conf {
    pub weather_api_url: String,
    pub weather_stale_after_mins: i64,
    pub task_overdue_grace_mins: i64,
}

impl Conf {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::WeatherApiUrl,
                Columns::WeatherStaleAfterMins,
                Columns::TaskOverdueGraceMins,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Self> {
        |row| {
            Ok(Self {
                weather_api_url: row.get(Columns::WeatherApiUrl.as_str())?,
                weather_stale_after_mins: row.get(Columns::WeatherStaleAfterMins.as_str())?,
                task_overdue_grace_mins: row.get(Columns::TaskOverdueGraceMins.as_str())?,
            })
        }
    }

    #[cfg(test)]
    pub fn mock() -> Conf {
        Conf {
            weather_api_url: "".to_string(),
            weather_stale_after_mins: 120,
            task_overdue_grace_mins: 30,
        }
    }
}
