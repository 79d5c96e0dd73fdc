use crate::db;
use crate::db::weather::schema::WeatherObservation;
use crate::log::RequestExtension;
use crate::rest::error::RestApiError;
use crate::rest::error::RestResult;
use actix_web::get;
use actix_web::web::Data;
use actix_web::web::Json;
use actix_web::web::Query;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use deadpool_sqlite::Pool;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Deserialize)]
pub struct GetArgs {
    building_id: i64,
    limit: Option<i64>,
}

#[derive(Serialize)]
pub struct Item {
    pub id: i64,
    pub building_id: i64,
    pub condition: String,
    pub temperature: f64,
    pub humidity: i64,
    pub wind_speed: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<WeatherObservation> for Item {
    fn from(val: WeatherObservation) -> Self {
        Item {
            id: val.id,
            building_id: val.building_id,
            condition: val.condition,
            temperature: val.temperature,
            humidity: val.humidity,
            wind_speed: val.wind_speed,
            created_at: val.created_at,
        }
    }
}

/// Observation history for one building, newest first. `building_id` is
/// required, the raw table grows too fast to serve unscoped.
#[get("")]
pub async fn get(req: HttpRequest, args: Query<GetArgs>, pool: Data<Pool>) -> RestResult<Vec<Item>> {
    let items = db::weather::queries_async::select_by_building(args.building_id, args.limit, &pool)
        .await
        .map_err(|_| RestApiError::database())?;
    req.extensions_mut()
        .insert(RequestExtension::new(items.len()));
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod test {
    use crate::test::mock_pool;
    use crate::{db, Result};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::web::{scope, Data};
    use actix_web::{test, App};
    use serde_json::{Map, Value};

    #[test]
    async fn get_scoped_to_building() -> Result<()> {
        let pool = mock_pool().await;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        db::building::queries_async::insert(15, "Annex", 40.75, -73.98, "", "", &pool).await?;
        db::weather::queries_async::insert(14, "cloudy", 18.5, 60, 12.0, &pool).await?;
        db::weather::queries_async::insert(15, "rain", 14.0, 90, 30.0, &pool).await?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/?building_id=14").to_request();
        let res: Vec<Map<String, Value>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(1, res.len());
        assert_eq!("cloudy", res.first().unwrap()["condition"].as_str().unwrap());
        Ok(())
    }

    #[test]
    async fn get_requires_building_id() -> Result<()> {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(mock_pool().await))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        Ok(())
    }
}
