use super::schema::{self, Columns, WeatherObservation};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

pub fn insert(
    building_id: i64,
    condition: &str,
    temperature: f64,
    humidity: i64,
    wind_speed: f64,
    conn: &Connection,
) -> Result<WeatherObservation> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({building_id}, {condition}, {temperature}, {humidity}, {wind_speed})
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        condition = Columns::Condition.as_str(),
        temperature = Columns::Temperature.as_str(),
        humidity = Columns::Humidity.as_str(),
        wind_speed = Columns::WindSpeed.as_str(),
        projection = WeatherObservation::projection(),
    );
    conn.query_row(
        &sql,
        params![building_id, condition, temperature, humidity, wind_speed],
        WeatherObservation::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_latest_by_building(
    building_id: i64,
    conn: &Connection,
) -> Result<Option<WeatherObservation>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = ?1
            ORDER BY {created_at} DESC, {id} DESC
            LIMIT 1
        "#,
        projection = WeatherObservation::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![building_id], WeatherObservation::mapper())
        .optional()
        .map_err(Into::into)
}

pub fn select_by_building(
    building_id: i64,
    limit: Option<i64>,
    conn: &Connection,
) -> Result<Vec<WeatherObservation>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {building_id} = ?1
            ORDER BY {created_at} DESC, {id} DESC
            LIMIT ?2
        "#,
        projection = WeatherObservation::projection(),
        table = schema::TABLE_NAME,
        building_id = Columns::BuildingId.as_str(),
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            params![building_id, limit.unwrap_or(i64::MAX)],
            WeatherObservation::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn delete_older_than(created_before: OffsetDateTime, conn: &Connection) -> Result<usize> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {created_at} < ?1
        "#,
        table = schema::TABLE_NAME,
        created_at = Columns::CreatedAt.as_str(),
    );
    conn.execute(&sql, params![created_before.format(&Rfc3339)?])
        .map_err(Into::into)
}

#[cfg(test)]
pub fn set_created_at(
    id: i64,
    created_at: OffsetDateTime,
    conn: &Connection,
) -> Result<WeatherObservation> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {created_at} = ?1
            WHERE {id} = ?2
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
        projection = WeatherObservation::projection(),
    );
    conn.query_row(&sql, params![created_at.format(&Rfc3339)?, id], {
        WeatherObservation::mapper()
    })
    .map_err(Into::into)
}

#[cfg(test)]
mod test {
    use crate::db::test::conn;
    use crate::Result;
    use rusqlite::Connection;
    use time::macros::datetime;

    fn building(conn: &Connection) -> Result<i64> {
        Ok(crate::db::building::queries::insert(14, "Rubin Museum", 40.740, -74.001, "", "", conn)?.id)
    }

    #[test]
    fn insert() -> Result<()> {
        let conn = conn();
        let building_id = building(&conn)?;
        let observation = super::insert(building_id, "rain", 14.5, 80, 12.0, &conn)?;
        assert_eq!(building_id, observation.building_id);
        assert_eq!("rain", observation.condition);
        assert_eq!(80, observation.humidity);
        Ok(())
    }

    #[test]
    fn select_latest_by_building() -> Result<()> {
        let conn = conn();
        let building_id = building(&conn)?;
        assert!(super::select_latest_by_building(building_id, &conn)?.is_none());
        super::insert(building_id, "clear", 20.0, 40, 3.0, &conn)?;
        let second = super::insert(building_id, "rain", 15.0, 85, 10.0, &conn)?;
        let latest = super::select_latest_by_building(building_id, &conn)?.unwrap();
        assert_eq!(second.id, latest.id);
        Ok(())
    }

    #[test]
    fn select_by_building_limit() -> Result<()> {
        let conn = conn();
        let building_id = building(&conn)?;
        super::insert(building_id, "clear", 20.0, 40, 3.0, &conn)?;
        super::insert(building_id, "cloudy", 18.0, 50, 6.0, &conn)?;
        super::insert(building_id, "rain", 15.0, 85, 10.0, &conn)?;
        assert_eq!(3, super::select_by_building(building_id, None, &conn)?.len());
        let limited = super::select_by_building(building_id, Some(2), &conn)?;
        assert_eq!(2, limited.len());
        assert_eq!("rain", limited.first().unwrap().condition);
        Ok(())
    }

    #[test]
    fn delete_older_than() -> Result<()> {
        let conn = conn();
        let building_id = building(&conn)?;
        let old = super::insert(building_id, "clear", 20.0, 40, 3.0, &conn)?;
        super::set_created_at(old.id, datetime!(2025-01-01 00:00 UTC), &conn)?;
        super::insert(building_id, "rain", 15.0, 85, 10.0, &conn)?;
        let deleted = super::delete_older_than(datetime!(2025-02-01 00:00 UTC), &conn)?;
        assert_eq!(1, deleted);
        assert_eq!(1, super::select_by_building(building_id, None, &conn)?.len());
        Ok(())
    }
}
