use crate::db::worker::schema::Worker;
use crate::service::assistant::{self, Suggestion};
use crate::{db, service, Result};
use deadpool_sqlite::Pool;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct Res {
    pub suggestions: Vec<Suggestion>,
}

pub async fn run(caller: &Worker, pool: &Pool) -> Result<Res> {
    let now = OffsetDateTime::now_utc();
    let context = service::context::worker_context(caller.id, now, pool).await?;
    let conf = db::conf::queries_async::select(pool).await?;
    Ok(Res {
        suggestions: assistant::suggestions(&context, &conf, now),
    })
}
