use super::schema::{self, Building, Columns};
use crate::Result;
use rusqlite::{named_params, params, Connection};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub fn insert(
    id: i64,
    name: impl Into<String>,
    lat: f64,
    lon: f64,
    address: impl Into<String>,
    image_name: impl Into<String>,
    conn: &Connection,
) -> Result<Building> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({id}, {name}, {lat}, {lon}, {address}, {image_name})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
        name = Columns::Name.as_str(),
        lat = Columns::Lat.as_str(),
        lon = Columns::Lon.as_str(),
        address = Columns::Address.as_str(),
        image_name = Columns::ImageName.as_str(),
        projection = Building::projection(),
    );
    conn.query_row(
        &sql,
        params![id, name.into(), lat, lon, address.into(), image_name.into()],
        Building::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_all(include_deleted: bool, conn: &Connection) -> Result<Vec<Building>> {
    let sql = if include_deleted {
        format!(
            r#"
                SELECT {projection}
                FROM {table}
                ORDER BY {id}
            "#,
            projection = Building::projection(),
            table = schema::TABLE_NAME,
            id = Columns::Id.as_str(),
        )
    } else {
        format!(
            r#"
                SELECT {projection}
                FROM {table}
                WHERE {deleted_at} IS NULL
                ORDER BY {id}
            "#,
            projection = Building::projection(),
            table = schema::TABLE_NAME,
            deleted_at = Columns::DeletedAt.as_str(),
            id = Columns::Id.as_str(),
        )
    };
    conn.prepare(&sql)?
        .query_map({}, Building::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Building> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Building::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Building::mapper())
        .map_err(Into::into)
}

pub fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<Building>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {updated_at} > :updated_since
            ORDER BY {updated_at}, {id}
            LIMIT :limit
        "#,
        projection = Building::projection(),
        table = schema::TABLE_NAME,
        updated_at = Columns::UpdatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            named_params! {
                ":updated_since": updated_since.format(&Rfc3339)?,
                ":limit": limit.unwrap_or(i64::MAX),
            },
            Building::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn set_deleted_at(
    id: i64,
    deleted_at: Option<OffsetDateTime>,
    conn: &Connection,
) -> Result<Building> {
    let sql = match deleted_at {
        Some(deleted_at) => {
            let sql = format!(
                r#"
                    UPDATE {table}
                    SET {deleted_at} = ?1
                    WHERE {id} = ?2
                    RETURNING {projection}
                "#,
                table = schema::TABLE_NAME,
                deleted_at = Columns::DeletedAt.as_str(),
                id = Columns::Id.as_str(),
                projection = Building::projection(),
            );
            return conn
                .query_row(&sql, params![deleted_at.format(&Rfc3339)?, id], {
                    Building::mapper()
                })
                .map_err(Into::into);
        }
        None => format!(
            r#"
                UPDATE {table}
                SET {deleted_at} = NULL
                WHERE {id} = ?1
                RETURNING {projection}
            "#,
            table = schema::TABLE_NAME,
            deleted_at = Columns::DeletedAt.as_str(),
            id = Columns::Id.as_str(),
            projection = Building::projection(),
        ),
    };
    conn.query_row(&sql, params![id], Building::mapper())
        .map_err(Into::into)
}

#[cfg(test)]
pub fn set_updated_at(
    id: i64,
    updated_at: OffsetDateTime,
    conn: &Connection,
) -> Result<Building> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {updated_at} = ?1
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        updated_at = Columns::UpdatedAt.as_str(),
        id = Columns::Id.as_str(),
        projection = Building::projection(),
    );
    conn.query_row(&sql, params![updated_at.format(&Rfc3339)?, id], {
        Building::mapper()
    })
    .map_err(Into::into)
}
