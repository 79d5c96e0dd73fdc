use crate::db::worker::schema::Worker;
use crate::{db, Error, Result};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

#[derive(Deserialize)]
pub struct Params {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub address: Option<String>,
    pub image_name: Option<String>,
}

#[derive(Serialize)]
pub struct Res {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub image_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Building ids come from the caller, they match the ids painted on the
/// physical keys and clipboards.
pub async fn run(params: Params, caller: &Worker, pool: &Pool) -> Result<Res> {
    if params.name.trim().is_empty() {
        return Err(Error::invalid_input("Building name cannot be empty"));
    }
    if !(-90.0..=90.0).contains(&params.lat) || !(-180.0..=180.0).contains(&params.lon) {
        return Err(Error::invalid_input("Coordinates are out of range"));
    }
    if db::building::queries_async::select_by_id(params.id, pool)
        .await
        .is_ok()
    {
        return Err(Error::conflict(format!(
            "Building {} already exists",
            params.id,
        )));
    }
    let building = db::building::queries_async::insert(
        params.id,
        params.name,
        params.lat,
        params.lon,
        params.address.unwrap_or_default(),
        params.image_name.unwrap_or_default(),
        pool,
    )
    .await?;
    info!(caller.name, building.id, building.name, "Added a building");
    Ok(Res {
        id: building.id,
        name: building.name,
        lat: building.lat,
        lon: building.lon,
        address: building.address,
        image_name: building.image_name,
        created_at: building.created_at,
    })
}

#[cfg(test)]
mod test {
    use crate::db::worker::schema::Role;
    use crate::test::mock_pool;
    use crate::{db, Error, Result};

    #[actix_web::test]
    async fn run() -> Result<()> {
        let pool = mock_pool().await;
        let admin = db::worker::queries_async::insert("boss", "", Role::Admin, &pool).await?;
        let res = super::run(
            super::Params {
                id: 14,
                name: "Rubin Museum".into(),
                lat: 40.74,
                lon: -73.99,
                address: Some("150 W 17th St".into()),
                image_name: None,
            },
            &admin,
            &pool,
        )
        .await?;
        assert_eq!(14, res.id);
        assert_eq!("Rubin Museum", res.name);
        let stored = db::building::queries_async::select_by_id(14, &pool).await?;
        assert_eq!("150 W 17th St", stored.address);
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_duplicate_id() -> Result<()> {
        let pool = mock_pool().await;
        let admin = db::worker::queries_async::insert("boss", "", Role::Admin, &pool).await?;
        db::building::queries_async::insert(14, "Rubin Museum", 40.74, -73.99, "", "", &pool)
            .await?;
        let res = super::run(
            super::Params {
                id: 14,
                name: "Duplicate".into(),
                lat: 40.74,
                lon: -73.99,
                address: None,
                image_name: None,
            },
            &admin,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::Conflict(_))));
        Ok(())
    }

    #[actix_web::test]
    async fn run_rejects_bad_input() -> Result<()> {
        let pool = mock_pool().await;
        let admin = db::worker::queries_async::insert("boss", "", Role::Admin, &pool).await?;
        let res = super::run(
            super::Params {
                id: 14,
                name: "  ".into(),
                lat: 40.74,
                lon: -73.99,
                address: None,
                image_name: None,
            },
            &admin,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        let res = super::run(
            super::Params {
                id: 14,
                name: "Rubin Museum".into(),
                lat: 95.0,
                lon: -73.99,
                address: None,
                image_name: None,
            },
            &admin,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        Ok(())
    }
}
