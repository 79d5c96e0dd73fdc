use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "token";

pub enum Columns {
    Id,
    WorkerId,
    Label,
    Secret,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::WorkerId => "worker_id",
            Columns::Label => "label",
            Columns::Secret => "secret",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
            Columns::DeletedAt => "deleted_at",
        }
    }
}

/// Bearer session secret issued by login. Logout soft deletes the row, so
/// old secrets stay on record but no longer authenticate.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub id: i64,
    pub worker_id: i64,
    pub label: String,
    pub secret: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Token {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::WorkerId,
                Columns::Label,
                Columns::Secret,
                Columns::CreatedAt,
                Columns::UpdatedAt,
                Columns::DeletedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Token> {
        |row| {
            Ok(Token {
                id: row.get(Columns::Id.as_str())?,
                worker_id: row.get(Columns::WorkerId.as_str())?,
                label: row.get(Columns::Label.as_str())?,
                secret: row.get(Columns::Secret.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
                deleted_at: row.get(Columns::DeletedAt.as_str())?,
            })
        }
    }
}
