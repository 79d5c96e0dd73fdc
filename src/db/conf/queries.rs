use super::schema::{self, Columns, Conf};
use crate::Result;
use rusqlite::{params, Connection};

pub fn select(conn: &Connection) -> Result<Conf> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
        "#,
        projection = Conf::projection(),
        table = schema::TABLE_NAME,
    );
    conn.prepare(&sql)?
        .query_row((), Conf::mapper())
        .map_err(Into::into)
}

#[cfg(test)]
pub fn set_weather_api_url(url: &str, conn: &Connection) -> Result<()> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {weather_api_url} = ?1
        "#,
        table = schema::TABLE_NAME,
        weather_api_url = Columns::WeatherApiUrl.as_str(),
    );
    conn.execute(&sql, params![url])?;
    Ok(())
}
