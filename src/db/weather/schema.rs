use rusqlite::Row;
use std::sync::OnceLock;
use time::{Duration, OffsetDateTime};

pub const TABLE_NAME: &str = "weather_observation";

pub enum Columns {
    Id,
    BuildingId,
    Condition,
    Temperature,
    Humidity,
    WindSpeed,
    CreatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::BuildingId => "building_id",
            Columns::Condition => "condition",
            Columns::Temperature => "temperature",
            Columns::Humidity => "humidity",
            Columns::WindSpeed => "wind_speed",
            Columns::CreatedAt => "created_at",
        }
    }
}

/// Append-only provider snapshot. Temperature is in celsius, wind speed in
/// km/h, humidity in percent.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherObservation {
    pub id: i64,
    pub building_id: i64,
    pub condition: String,
    pub temperature: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub created_at: OffsetDateTime,
}

impl WeatherObservation {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::BuildingId,
                Columns::Condition,
                Columns::Temperature,
                Columns::Humidity,
                Columns::WindSpeed,
                Columns::CreatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<WeatherObservation> {
        |row| {
            Ok(WeatherObservation {
                id: row.get(Columns::Id.as_str())?,
                building_id: row.get(Columns::BuildingId.as_str())?,
                condition: row.get(Columns::Condition.as_str())?,
                temperature: row.get(Columns::Temperature.as_str())?,
                humidity: row.get(Columns::Humidity.as_str())?,
                wind_speed: row.get(Columns::WindSpeed.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
            })
        }
    }

    pub fn is_stale(&self, stale_after_mins: i64, now: OffsetDateTime) -> bool {
        self.created_at + Duration::minutes(stale_after_mins) < now
    }
}

#[cfg(test)]
mod test {
    use super::WeatherObservation;
    use time::{macros::datetime, Duration};

    #[test]
    fn is_stale() {
        let now = datetime!(2025-06-01 12:00 UTC);
        let observation = WeatherObservation {
            id: 1,
            building_id: 1,
            condition: "clear".into(),
            temperature: 21.0,
            humidity: 40,
            wind_speed: 5.0,
            created_at: now - Duration::minutes(90),
        };
        assert!(!observation.is_stale(120, now));
        assert!(observation.is_stale(60, now));
    }
}
