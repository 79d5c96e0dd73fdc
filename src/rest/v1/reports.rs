use crate::db;
use crate::db::report::schema::Report;
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
use time::{Date, OffsetDateTime};

#[derive(Deserialize)]
pub struct GetArgs {
    #[serde(default)]
    #[serde(with = "time::serde::rfc3339::option")]
    updated_since: Option<OffsetDateTime>,
    limit: Option<i64>,
    building_id: Option<i64>,
}

#[derive(Serialize)]
pub struct Item {
    pub id: i64,
    pub building_id: i64,
    pub date: Date,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Report> for Item {
    fn from(val: Report) -> Self {
        Item {
            id: val.id,
            building_id: val.building_id,
            date: val.date,
            total_tasks: val.total_tasks,
            completed_tasks: val.completed_tasks,
            overdue_tasks: val.overdue_tasks,
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[get("")]
pub async fn get(req: HttpRequest, args: Query<GetArgs>, pool: Data<Pool>) -> RestResult<Vec<Item>> {
    let updated_since = args.updated_since.unwrap_or(OffsetDateTime::UNIX_EPOCH);
    let items = db::report::queries_async::select_updated_since(updated_since, args.limit, &pool)
        .await
        .map_err(|_| RestApiError::database())?;
    let items: Vec<Report> = items
        .into_iter()
        .filter(|it| args.building_id.is_none_or(|id| it.building_id == id))
        .collect();
    req.extensions_mut()
        .insert(RequestExtension::new(items.len()));
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[get("{id}")]
pub async fn get_by_id(id: Path<i64>, pool: Data<Pool>) -> RestResult<Item> {
    db::report::queries_async::select_by_id(id.into_inner(), &pool)
        .await
        .map(|it| Json(it.into()))
        .map_err(|e| match e {
            Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows) => RestApiError::not_found(),
            _ => RestApiError::database(),
        })
}
