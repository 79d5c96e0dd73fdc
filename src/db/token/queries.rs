use super::schema::{self, Columns, Token};
use crate::{Error, Result};
use rusqlite::{params, Connection};

pub fn insert(worker_id: i64, label: &str, secret: &str, conn: &Connection) -> Result<Token> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({worker_id}, {label}, {secret})
            VALUES (?1, ?2, ?3)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        worker_id = Columns::WorkerId.as_str(),
        label = Columns::Label.as_str(),
        secret = Columns::Secret.as_str(),
        projection = Token::projection(),
    );
    conn.query_row(&sql, params![worker_id, label, secret], Token::mapper())
        .map_err(Into::into)
}

pub fn select_by_secret(secret: &str, conn: &Connection) -> Result<Token> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {secret} = ?1 AND {deleted_at} IS NULL
        "#,
        projection = Token::projection(),
        table = schema::TABLE_NAME,
        secret = Columns::Secret.as_str(),
        deleted_at = Columns::DeletedAt.as_str(),
    );
    conn.query_row(&sql, params![secret], Token::mapper())
        .map_err(Into::into)
}

pub fn delete_by_secret(secret: &str, conn: &Connection) -> Result<Token> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET {deleted_at} = strftime('%Y-%m-%dT%H:%M:%fZ')
            WHERE {secret} = ?1 AND {deleted_at} IS NULL
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        deleted_at = Columns::DeletedAt.as_str(),
        secret = Columns::Secret.as_str(),
        projection = Token::projection(),
    );
    conn.query_row(&sql, params![secret], Token::mapper())
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::not_found("No active session for this token")
            }
            _ => e.into(),
        })
}

#[cfg(test)]
mod test {
    use crate::db::test::conn;
    use crate::db::worker::schema::Role;
    use crate::{Error, Result};

    #[test]
    fn insert() -> Result<()> {
        let conn = conn();
        let worker = crate::db::worker::queries::insert("kevin", "", Role::Worker, &conn)?;
        let token = super::insert(worker.id, "phone", "secret", &conn)?;
        assert_eq!(worker.id, token.worker_id);
        assert_eq!("phone", token.label);
        assert_eq!(token, super::select_by_secret("secret", &conn)?);
        Ok(())
    }

    #[test]
    fn select_by_secret_skips_deleted() -> Result<()> {
        let conn = conn();
        let worker = crate::db::worker::queries::insert("kevin", "", Role::Worker, &conn)?;
        super::insert(worker.id, "", "secret", &conn)?;
        super::delete_by_secret("secret", &conn)?;
        assert!(super::select_by_secret("secret", &conn).is_err());
        Ok(())
    }

    #[test]
    fn delete_by_secret_twice() -> Result<()> {
        let conn = conn();
        let worker = crate::db::worker::queries::insert("kevin", "", Role::Worker, &conn)?;
        super::insert(worker.id, "", "secret", &conn)?;
        let token = super::delete_by_secret("secret", &conn)?;
        assert!(token.deleted_at.is_some());
        assert!(matches!(
            super::delete_by_secret("secret", &conn),
            Err(Error::NotFound(_)),
        ));
        Ok(())
    }
}
