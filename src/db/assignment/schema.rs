use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "assignment";

pub enum Columns {
    Id,
    WorkerId,
    BuildingId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::WorkerId => "worker_id",
            Columns::BuildingId => "building_id",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
            Columns::DeletedAt => "deleted_at",
        }
    }
}

/// Links a worker to a building they cover. Unassignment is soft, the row
/// keeps its id and is revived if the pair is ever assigned again.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub worker_id: i64,
    pub building_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Assignment {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::WorkerId,
                Columns::BuildingId,
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

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Assignment> {
        |row| {
            Ok(Assignment {
                id: row.get(Columns::Id.as_str())?,
                worker_id: row.get(Columns::WorkerId.as_str())?,
                building_id: row.get(Columns::BuildingId.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
                deleted_at: row.get(Columns::DeletedAt.as_str())?,
            })
        }
    }
}
