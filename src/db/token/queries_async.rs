use super::{queries, schema::Token};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn insert(
    worker_id: i64,
    label: impl Into<String>,
    secret: impl Into<String>,
    pool: &Pool,
) -> Result<Token> {
    let label = label.into();
    let secret = secret.into();
    pool.get()
        .await?
        .interact(move |conn| queries::insert(worker_id, &label, &secret, conn))
        .await?
}

pub async fn select_by_secret(secret: impl Into<String>, pool: &Pool) -> Result<Token> {
    let secret = secret.into();
    pool.get()
        .await?
        .interact(move |conn| queries::select_by_secret(&secret, conn))
        .await?
}

pub async fn delete_by_secret(secret: impl Into<String>, pool: &Pool) -> Result<Token> {
    let secret = secret.into();
    pool.get()
        .await?
        .interact(move |conn| queries::delete_by_secret(&secret, conn))
        .await?
}
