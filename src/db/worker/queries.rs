use super::schema::{self, Columns, Role, Worker};
use crate::Result;
use rusqlite::{named_params, params, Connection};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub fn insert(name: &str, password: &str, role: Role, conn: &Connection) -> Result<Worker> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({name}, {password}, {role})
            VALUES (?1, ?2, ?3)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
        password = Columns::Password.as_str(),
        role = Columns::Role.as_str(),
        projection = Worker::projection(),
    );
    conn.query_row(
        &sql,
        params![name, password, role.to_string()],
        Worker::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_all(include_deleted: bool, conn: &Connection) -> Result<Vec<Worker>> {
    let sql = if include_deleted {
        format!(
            r#"
                SELECT {projection}
                FROM {table}
                ORDER BY {id}
            "#,
            projection = Worker::projection(),
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
            projection = Worker::projection(),
            table = schema::TABLE_NAME,
            deleted_at = Columns::DeletedAt.as_str(),
            id = Columns::Id.as_str(),
        )
    };
    conn.prepare(&sql)?
        .query_map({}, Worker::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Worker> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Worker::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Worker::mapper())
        .map_err(Into::into)
}

pub fn select_by_name(name: &str, conn: &Connection) -> Result<Worker> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {name} = ?1 AND {deleted_at} IS NULL
        "#,
        projection = Worker::projection(),
        table = schema::TABLE_NAME,
        name = Columns::Name.as_str(),
        deleted_at = Columns::DeletedAt.as_str(),
    );
    conn.query_row(&sql, params![name], Worker::mapper())
        .map_err(Into::into)
}

pub fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<Worker>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {updated_at} > :updated_since
            ORDER BY {updated_at}, {id}
            LIMIT :limit
        "#,
        projection = Worker::projection(),
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
            Worker::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn set_password(id: i64, password: impl Into<String>, conn: &Connection) -> Result<()> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {password} = ?1
            WHERE {id} = ?2
        "#,
        table = schema::TABLE_NAME,
        password = Columns::Password.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.execute(&sql, params![password.into(), id])?;
    Ok(())
}

pub fn set_current_building(
    id: i64,
    building_id: Option<i64>,
    conn: &Connection,
) -> Result<Worker> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {current_building_id} = ?1
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        current_building_id = Columns::CurrentBuildingId.as_str(),
        id = Columns::Id.as_str(),
        projection = Worker::projection(),
    );
    conn.query_row(&sql, params![building_id, id], Worker::mapper())
        .map_err(Into::into)
}

pub fn set_skills(id: i64, skills: &[String], conn: &Connection) -> Result<Worker> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {skills} = json(?1)
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        skills = Columns::Skills.as_str(),
        id = Columns::Id.as_str(),
        projection = Worker::projection(),
    );
    conn.query_row(
        &sql,
        params![serde_json::to_string(skills)?, id],
        Worker::mapper(),
    )
    .map_err(Into::into)
}

#[cfg(test)]
pub fn set_deleted_at(
    id: i64,
    deleted_at: Option<OffsetDateTime>,
    conn: &Connection,
) -> Result<Worker> {
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
        projection = Worker::projection(),
    );
    conn.query_row(
        &sql,
        params![deleted_at.map(|it| it.format(&Rfc3339)).transpose()?, id],
        Worker::mapper(),
    )
    .map_err(Into::into)
}

#[cfg(test)]
pub fn set_updated_at(id: i64, updated_at: OffsetDateTime, conn: &Connection) -> Result<Worker> {
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
        projection = Worker::projection(),
    );
    conn.query_row(&sql, params![updated_at.format(&Rfc3339)?, id], {
        Worker::mapper()
    })
    .map_err(Into::into)
}
