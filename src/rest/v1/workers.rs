use crate::db;
use crate::db::worker::schema::{Role, Worker};
use crate::log::RequestExtension;
use crate::rest::error::RestApiError;
use crate::rest::error::RestResult;
use crate::Error;
use actix_web::get;
use actix_web::web::Data;
use actix_web::web::Json;
use actix_web::web::Path;
use actix_web::web::Query;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use deadpool_sqlite::Pool;
use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Deserialize)]
pub struct GetArgs {
    #[serde(default)]
    #[serde(with = "time::serde::rfc3339::option")]
    updated_since: Option<OffsetDateTime>,
    limit: Option<i64>,
}

/// Password hashes stay server-side, the feed never carries them.
#[derive(Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub current_building_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

impl From<Worker> for Item {
    fn from(val: Worker) -> Self {
        Item {
            id: val.id,
            name: val.name,
            role: val.role,
            skills: val.skills,
            current_building_id: val.current_building_id,
            created_at: val.created_at,
            updated_at: val.updated_at,
            deleted_at: val.deleted_at,
        }
    }
}

#[get("")]
pub async fn get(req: HttpRequest, args: Query<GetArgs>, pool: Data<Pool>) -> RestResult<Vec<Item>> {
    let updated_since = args.updated_since.unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let items = db::worker::queries_async::select_updated_since(updated_since, args.limit, &pool)
        .await
        .map_err(|_| RestApiError::database())?;
    req.extensions_mut()
        .insert(RequestExtension::new(items.len()));
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[get("{id}")]
pub async fn get_by_id(id: Path<i64>, pool: Data<Pool>) -> RestResult<Item> {
    db::worker::queries_async::select_by_id(id.into_inner(), &pool)
        .await
        .map(|it| Json(it.into()))
        .map_err(|e| match e {
            Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows) => RestApiError::not_found(),
            _ => RestApiError::database(),
        })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Result};
    use actix_web::test::TestRequest;
    use actix_web::web::{scope, Data};
    use actix_web::{test, App};
    use serde_json::{Map, Value};

    #[test]
    async fn get_empty_array() -> Result<()> {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(mock_pool().await))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/").to_request();
        let res: Vec<Map<String, Value>> = test::call_and_read_body_json(&app, req).await;
        assert!(res.is_empty());
        Ok(())
    }

    #[test]
    async fn get_hides_passwords() -> Result<()> {
        let pool = mock_pool().await;
        let worker =
            db::worker::queries_async::insert("kevin", "secret-hash", Role::Worker, &pool).await?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .service(scope("/").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/").to_request();
        let res: Vec<Map<String, Value>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(1, res.len());
        let item = res.first().unwrap();
        assert_eq!(worker.id, item["id"].as_i64().unwrap());
        assert!(!item.contains_key("password"));
        Ok(())
    }

    #[test]
    async fn get_by_id() -> Result<()> {
        let pool = mock_pool().await;
        let worker = db::worker::queries_async::insert("kevin", "", Role::Worker, &pool).await?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .service(super::get_by_id),
        )
        .await;
        let req = TestRequest::get().uri(&format!("/{}", worker.id)).to_request();
        let res: Map<String, Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(worker.name, res["name"].as_str().unwrap());
        assert!(!res.contains_key("password"));
        Ok(())
    }
}
