use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use strum::{Display, EnumString};
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "worker";

pub enum Columns {
    Id,
    Name,
    Password,
    Role,
    Skills,
    CurrentBuildingId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::Name => "name",
            Columns::Password => "password",
            Columns::Role => "role",
            Columns::Skills => "skills",
            Columns::CurrentBuildingId => "current_building_id",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
            Columns::DeletedAt => "deleted_at",
        }
    }
}

/// Stored as TEXT, also used as the RPC permission level. Variant order is
/// the permission order, every method has a minimum role and admins can call
/// everything.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Worker,
    Supervisor,
    Admin,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub current_building_id: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Worker {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::Name,
                Columns::Password,
                Columns::Role,
                Columns::Skills,
                Columns::CurrentBuildingId,
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

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Worker> {
        |row| {
            let role: String = row.get(Columns::Role.as_str())?;
            let role = role.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Worker {
                id: row.get(Columns::Id.as_str())?,
                name: row.get(Columns::Name.as_str())?,
                password: row.get(Columns::Password.as_str())?,
                role,
                skills: serde_json::from_value(row.get(Columns::Skills.as_str())?)
                    .unwrap_or_default(),
                current_building_id: row.get(Columns::CurrentBuildingId.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
                deleted_at: row.get(Columns::DeletedAt.as_str())?,
            })
        }
    }
}
