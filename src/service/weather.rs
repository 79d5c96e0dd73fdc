use crate::db::building::schema::Building;
use crate::db::weather::schema::WeatherObservation;
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{error, info};
use url::Url;

/// Observations older than this are useless for the dashboards and only
/// bloat the database.
static RETENTION_DAYS: i64 = 7;

static CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";

#[derive(Deserialize)]
struct ProviderResponse {
    current: CurrentConditions,
}

#[derive(Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub relative_humidity_2m: i64,
    pub wind_speed_10m: f64,
    pub weather_code: i64,
}

#[derive(Serialize)]
pub struct SyncResult {
    pub buildings_total: i64,
    pub buildings_synced: i64,
    pub buildings_failed: i64,
    pub observations_pruned: i64,
}

/// Pulls fresh conditions for every live building. A building failing does
/// not stop the run, the failure is logged and the loop moves on.
pub async fn sync_all(pool: &Pool) -> Result<SyncResult> {
    let conf = db::conf::queries_async::select(pool).await?;
    let buildings = db::building::queries_async::select_all(false, pool).await?;
    let mut synced = 0;
    let mut failed = 0;
    for building in &buildings {
        match sync_building(building, &conf.weather_api_url, pool).await {
            Ok(observation) => {
                info!(
                    building.id,
                    observation.condition,
                    observation.temperature,
                    "Synced weather",
                );
                synced += 1;
            }
            Err(e) => {
                error!(building.id, error = e.to_string(), "Failed to sync weather");
                failed += 1;
            }
        }
    }
    let created_before = OffsetDateTime::now_utc() - Duration::days(RETENTION_DAYS);
    let pruned = db::weather::queries_async::delete_older_than(created_before, pool).await?;
    info!(synced, failed, pruned, "Finished weather sync");
    Ok(SyncResult {
        buildings_total: buildings.len() as i64,
        buildings_synced: synced,
        buildings_failed: failed,
        observations_pruned: pruned as i64,
    })
}

async fn sync_building(
    building: &Building,
    api_url: &str,
    pool: &Pool,
) -> Result<WeatherObservation> {
    let current = fetch_current(building.lat, building.lon, api_url).await?;
    db::weather::queries_async::insert(
        building.id,
        condition(current.weather_code),
        current.temperature_2m,
        current.relative_humidity_2m,
        current.wind_speed_10m,
        pool,
    )
    .await
}

pub async fn fetch_current(lat: f64, lon: f64, api_url: &str) -> Result<CurrentConditions> {
    let mut url = Url::parse(api_url)?;
    url.query_pairs_mut()
        .append_pair("latitude", &lat.to_string())
        .append_pair("longitude", &lon.to_string())
        .append_pair("current", CURRENT_FIELDS);
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(Error::WeatherApi(format!(
            "Provider returned {}",
            response.status(),
        )));
    }
    let response: ProviderResponse = response.json().await?;
    Ok(response.current)
}

/// WMO interpretation codes, collapsed to the buckets the app can render.
pub fn condition(weather_code: i64) -> &'static str {
    match weather_code {
        0 => "clear",
        1..=3 => "partly_cloudy",
        45 | 48 => "fog",
        51..=57 => "drizzle",
        61..=67 | 80..=82 => "rain",
        71..=77 | 85 | 86 => "snow",
        95..=99 => "thunderstorm",
        _ => "unknown",
    }
}

#[cfg(test)]
mod test {
    use crate::test::mock_pool;
    use crate::{db, Result};

    #[test]
    fn condition() {
        assert_eq!("clear", super::condition(0));
        assert_eq!("partly_cloudy", super::condition(2));
        assert_eq!("fog", super::condition(45));
        assert_eq!("rain", super::condition(63));
        assert_eq!("rain", super::condition(81));
        assert_eq!("snow", super::condition(73));
        assert_eq!("thunderstorm", super::condition(95));
        assert_eq!("unknown", super::condition(42));
    }

    #[actix_web::test]
    async fn sync_all_without_buildings() -> Result<()> {
        let pool = mock_pool().await;
        let res = super::sync_all(&pool).await?;
        assert_eq!(0, res.buildings_total);
        assert_eq!(0, res.buildings_synced);
        assert_eq!(0, res.buildings_failed);
        Ok(())
    }

    #[actix_web::test]
    async fn sync_all_continues_past_failures() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.7, -74.0, "", "", &pool)
            .await?;
        db::building::queries_async::insert(15, "Annex", 40.8, -74.1, "", "", &pool).await?;
        pool.get()
            .await?
            .interact(|conn| db::conf::queries::set_weather_api_url("not a url", conn))
            .await??;
        let res = super::sync_all(&pool).await?;
        assert_eq!(2, res.buildings_total);
        assert_eq!(0, res.buildings_synced);
        assert_eq!(2, res.buildings_failed);
        Ok(())
    }
}
