use super::schema::{self, Category, Columns, Status, Task, Urgency};
use crate::{Error, Result};
use rusqlite::{named_params, params, Connection};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[allow(clippy::too_many_arguments)]
pub fn insert(
    building_id: i64,
    worker_id: Option<i64>,
    title: &str,
    description: &str,
    category: Category,
    urgency: Urgency,
    due_at: Option<OffsetDateTime>,
    conn: &Connection,
) -> Result<Task> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({building_id}, {worker_id}, {title}, {description}, {category}, {urgency}, {due_at})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        worker_id = Columns::WorkerId.as_str(),
        title = Columns::Title.as_str(),
        description = Columns::Description.as_str(),
        category = Columns::Category.as_str(),
        urgency = Columns::Urgency.as_str(),
        due_at = Columns::DueAt.as_str(),
        projection = Task::projection(),
    );
    conn.query_row(
        &sql,
        params![
            building_id,
            worker_id,
            title,
            description,
            category.to_string(),
            urgency.to_string(),
            due_at.map(|it| it.format(&Rfc3339)).transpose()?,
        ],
        Task::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Task> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Task::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Task::mapper())
        .map_err(Into::into)
}

pub fn select_updated_since(
    updated_since: OffsetDateTime,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<Task>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {updated_at} > :updated_since
            ORDER BY {updated_at}, {id}
            LIMIT :limit
        "#,
        projection = Task::projection(),
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
            Task::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Tasks on a worker's plate for a time window. Undated tasks stay on the
/// plate until completed, so they are included regardless of the window.
pub fn select_by_worker(
    worker_id: i64,
    period_start: OffsetDateTime,
    period_end: OffsetDateTime,
    conn: &Connection,
) -> Result<Vec<Task>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {worker_id} = :worker_id AND (
                ({due_at} >= :period_start AND {due_at} < :period_end)
                OR ({due_at} IS NULL AND {status} != :completed)
            )
            ORDER BY {due_at} IS NULL, {due_at}, {id}
        "#,
        projection = Task::projection(),
        table = schema::TABLE_NAME,
        worker_id = Columns::WorkerId.as_str(),
        due_at = Columns::DueAt.as_str(),
        status = Columns::Status.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            named_params! {
                ":worker_id": worker_id,
                ":period_start": period_start.format(&Rfc3339)?,
                ":period_end": period_end.format(&Rfc3339)?,
                ":completed": Status::Completed.to_string(),
            },
            Task::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_building(
    building_id: i64,
    period_start: OffsetDateTime,
    period_end: OffsetDateTime,
    conn: &Connection,
) -> Result<Vec<Task>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = :building_id AND (
                ({due_at} >= :period_start AND {due_at} < :period_end)
                OR ({due_at} IS NULL AND {status} != :completed)
            )
            ORDER BY {due_at} IS NULL, {due_at}, {id}
        "#,
        projection = Task::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        due_at = Columns::DueAt.as_str(),
        status = Columns::Status.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            named_params! {
                ":building_id": building_id,
                ":period_start": period_start.format(&Rfc3339)?,
                ":period_end": period_end.format(&Rfc3339)?,
                ":completed": Status::Completed.to_string(),
            },
            Task::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn start(id: i64, conn: &Connection) -> Result<Task> {
    let task = select_by_id(id, conn)?;
    if task.status != Status::Pending {
        return Err(Error::conflict(format!(
            "Task {id} is {}, only pending tasks can be started",
            task.status,
        )));
    }
    let sql = format!(
        r#"
            UPDATE {table}
            SET {status} = ?1
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        status = Columns::Status.as_str(),
        id = Columns::Id.as_str(),
        projection = Task::projection(),
    );
    conn.query_row(
        &sql,
        params![Status::InProgress.to_string(), id],
        Task::mapper(),
    )
    .map_err(Into::into)
}

/// Status and completion time always move together, there is no way to end
/// up with a completed task lacking a completion time.
pub fn complete(id: i64, conn: &Connection) -> Result<Task> {
    let task = select_by_id(id, conn)?;
    if task.status == Status::Completed {
        return Err(Error::conflict(format!("Task {id} is already completed")));
    }
    let sql = format!(
        r#"
            UPDATE {table}
            SET {status} = ?1, {completed_at} = strftime('%Y-%m-%dT%H:%M:%fZ')
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        status = Columns::Status.as_str(),
        completed_at = Columns::CompletedAt.as_str(),
        id = Columns::Id.as_str(),
        projection = Task::projection(),
    );
    conn.query_row(
        &sql,
        params![Status::Completed.to_string(), id],
        Task::mapper(),
    )
    .map_err(Into::into)
}

pub fn reopen(id: i64, conn: &Connection) -> Result<Task> {
    let task = select_by_id(id, conn)?;
    if task.status != Status::Completed {
        return Err(Error::conflict(format!(
            "Task {id} is not completed, there is nothing to reopen",
        )));
    }
    let sql = format!(
        r#"
            UPDATE {table}
            SET {status} = ?1, {completed_at} = NULL
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        status = Columns::Status.as_str(),
        completed_at = Columns::CompletedAt.as_str(),
        id = Columns::Id.as_str(),
        projection = Task::projection(),
    );
    conn.query_row(&sql, params![Status::Pending.to_string(), id], Task::mapper())
        .map_err(Into::into)
}

#[cfg(test)]
pub fn set_updated_at(id: i64, updated_at: OffsetDateTime, conn: &Connection) -> Result<Task> {
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
        projection = Task::projection(),
    );
    conn.query_row(&sql, params![updated_at.format(&Rfc3339)?, id], {
        Task::mapper()
    })
    .map_err(Into::into)
}
