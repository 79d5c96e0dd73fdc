use super::schema::{self, Columns, Report};
use crate::Result;
use rusqlite::{named_params, params, Connection, OptionalExtension};
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

pub fn upsert_for_date(
    building_id: i64,
    date: Date,
    total_tasks: i64,
    completed_tasks: i64,
    overdue_tasks: i64,
    conn: &Connection,
) -> Result<Report> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({building_id}, {date}, {total_tasks}, {completed_tasks}, {overdue_tasks})
            VALUES (:building_id, :date, :total_tasks, :completed_tasks, :overdue_tasks)
            ON CONFLICT ({building_id}, {date})
            DO UPDATE SET
                {total_tasks} = excluded.{total_tasks},
                {completed_tasks} = excluded.{completed_tasks},
                {overdue_tasks} = excluded.{overdue_tasks}
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        date = Columns::Date.as_str(),
        total_tasks = Columns::TotalTasks.as_str(),
        completed_tasks = Columns::CompletedTasks.as_str(),
        overdue_tasks = Columns::OverdueTasks.as_str(),
        projection = Report::projection(),
    );
    conn.query_row(
        &sql,
        named_params! {
            ":building_id": building_id,
            ":date": date.to_string(),
            ":total_tasks": total_tasks,
            ":completed_tasks": completed_tasks,
            ":overdue_tasks": overdue_tasks,
        },
        Report::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Report> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Report::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Report::mapper())
        .map_err(Into::into)
}

pub fn select_by_building(
    building_id: i64,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<Report>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = ?1
            ORDER BY {date} DESC, {id} DESC
            LIMIT ?2
        "#,
        projection = Report::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        date = Columns::Date.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            params![building_id, limit.unwrap_or(i64::MAX)],
            Report::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<Report>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {updated_at} > ?1
            ORDER BY {updated_at}, {id}
            LIMIT ?2
        "#,
        projection = Report::projection(),
        table = schema::TABLE_NAME,
        updated_at = Columns::UpdatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            params![updated_since.format(&Rfc3339)?, limit.unwrap_or(i64::MAX)],
            Report::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_latest_by_building(building_id: i64, conn: &Connection) -> Result<Option<Report>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = ?1
            ORDER BY {date} DESC, {id} DESC
            LIMIT 1
        "#,
        projection = Report::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        date = Columns::Date.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![building_id], Report::mapper())
        .optional()
        .map_err(Into::into)
}

#[cfg(test)]
pub fn set_updated_at(id: i64, updated_at: OffsetDateTime, conn: &Connection) -> Result<Report> {
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
        projection = Report::projection(),
    );
    conn.query_row(&sql, params![updated_at.format(&Rfc3339)?, id], {
        Report::mapper()
    })
    .map_err(Into::into)
}
