use super::schema::{self, Assignment, Columns};
use crate::{Error, Result};
use rusqlite::{params, Connection};

/// Inserts a live (worker, building) pair. A previously unassigned pair is
/// revived under its old id, a pair that is already live is a conflict.
pub fn insert(worker_id: i64, building_id: i64, conn: &Connection) -> Result<Assignment> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({worker_id}, {building_id})
            VALUES (?1, ?2)
            ON CONFLICT ({worker_id}, {building_id})
            DO UPDATE SET {deleted_at} = NULL WHERE {deleted_at} IS NOT NULL
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        worker_id = Columns::WorkerId.as_str(),
        building_id = Columns::BuildingId.as_str(),
        deleted_at = Columns::DeletedAt.as_str(),
        projection = Assignment::projection(),
    );
    conn.query_row(&sql, params![worker_id, building_id], Assignment::mapper())
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::conflict(format!(
                "Worker {worker_id} is already assigned to building {building_id}",
            )),
            _ => e.into(),
        })
}

pub fn delete(worker_id: i64, building_id: i64, conn: &Connection) -> Result<Assignment> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {deleted_at} = strftime('%Y-%m-%dT%H:%M:%fZ')
            WHERE {worker_id} = ?1 AND {building_id} = ?2 AND {deleted_at} IS NULL
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        deleted_at = Columns::DeletedAt.as_str(),
        worker_id = Columns::WorkerId.as_str(),
        building_id = Columns::BuildingId.as_str(),
        projection = Assignment::projection(),
    );
    conn.query_row(&sql, params![worker_id, building_id], Assignment::mapper())
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Error::not_found(format!(
                "Worker {worker_id} is not assigned to building {building_id}",
            )),
            _ => e.into(),
        })
}

pub fn select_by_worker(worker_id: i64, conn: &Connection) -> Result<Vec<Assignment>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {worker_id} = ?1 AND {deleted_at} IS NULL
            ORDER BY {building_id}
        "#,
        projection = Assignment::projection(),
        table = schema::TABLE_NAME,
        worker_id = Columns::WorkerId.as_str(),
        deleted_at = Columns::DeletedAt.as_str(),
        building_id = Columns::BuildingId.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(params![worker_id], Assignment::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_building(building_id: i64, conn: &Connection) -> Result<Vec<Assignment>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = ?1 AND {deleted_at} IS NULL
            ORDER BY {worker_id}
        "#,
        projection = Assignment::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        deleted_at = Columns::DeletedAt.as_str(),
        worker_id = Columns::WorkerId.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(params![building_id], Assignment::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

#[cfg(test)]
mod test {
    use crate::db::test::conn;
    use crate::db::worker::schema::Role;
    use crate::{Error, Result};
    use rusqlite::Connection;

    fn fixtures(conn: &Connection) -> Result<(i64, i64)> {
        let building =
            crate::db::building::queries::insert(14, "Rubin Museum", 40.740, -74.001, "", "", conn)?;
        let worker = crate::db::worker::queries::insert("kevin", "", Role::Worker, conn)?;
        Ok((worker.id, building.id))
    }

    #[test]
    fn insert() -> Result<()> {
        let conn = conn();
        let (worker_id, building_id) = fixtures(&conn)?;
        let assignment = super::insert(worker_id, building_id, &conn)?;
        assert_eq!(worker_id, assignment.worker_id);
        assert_eq!(building_id, assignment.building_id);
        assert!(assignment.deleted_at.is_none());
        Ok(())
    }

    #[test]
    fn insert_live_duplicate_conflicts() -> Result<()> {
        let conn = conn();
        let (worker_id, building_id) = fixtures(&conn)?;
        super::insert(worker_id, building_id, &conn)?;
        assert!(matches!(
            super::insert(worker_id, building_id, &conn),
            Err(Error::Conflict(_)),
        ));
        Ok(())
    }

    #[test]
    fn insert_revives_deleted_pair() -> Result<()> {
        let conn = conn();
        let (worker_id, building_id) = fixtures(&conn)?;
        let assignment = super::insert(worker_id, building_id, &conn)?;
        super::delete(worker_id, building_id, &conn)?;
        let revived = super::insert(worker_id, building_id, &conn)?;
        assert_eq!(assignment.id, revived.id);
        assert!(revived.deleted_at.is_none());
        Ok(())
    }

    #[test]
    fn delete() -> Result<()> {
        let conn = conn();
        let (worker_id, building_id) = fixtures(&conn)?;
        super::insert(worker_id, building_id, &conn)?;
        let assignment = super::delete(worker_id, building_id, &conn)?;
        assert!(assignment.deleted_at.is_some());
        assert!(matches!(
            super::delete(worker_id, building_id, &conn),
            Err(Error::NotFound(_)),
        ));
        Ok(())
    }

    #[test]
    fn select_live_only() -> Result<()> {
        let conn = conn();
        let (worker_id, building_id) = fixtures(&conn)?;
        let building_2 = crate::db::building::queries::insert(15, "Annex", 0.0, 0.0, "", "", &conn)?;
        super::insert(worker_id, building_id, &conn)?;
        super::insert(worker_id, building_2.id, &conn)?;
        super::delete(worker_id, building_2.id, &conn)?;
        let by_worker = super::select_by_worker(worker_id, &conn)?;
        assert_eq!(1, by_worker.len());
        assert_eq!(building_id, by_worker.first().unwrap().building_id);
        assert_eq!(1, super::select_by_building(building_id, &conn)?.len());
        assert!(super::select_by_building(building_2.id, &conn)?.is_empty());
        Ok(())
    }
}
