use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "building";

pub enum Columns {
    Id,
    Name,
    Lat,
    Lon,
    Address,
    ImageName,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::Name => "name",
            Columns::Lat => "lat",
            Columns::Lon => "lon",
            Columns::Address => "address",
            Columns::ImageName => "image_name",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
            Columns::DeletedAt => "deleted_at",
        }
    }
}

// Building ids are assigned by the portfolio registry, not by the database,
// so seed data keeps its well-known ids across environments
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub image_name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

impl Building {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::Name,
                Columns::Lat,
                Columns::Lon,
                Columns::Address,
                Columns::ImageName,
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

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Building> {
        |row| {
            Ok(Building {
                id: row.get(Columns::Id.as_str())?,
                name: row.get(Columns::Name.as_str())?,
                lat: row.get(Columns::Lat.as_str())?,
                lon: row.get(Columns::Lon.as_str())?,
                address: row.get(Columns::Address.as_str())?,
                image_name: row.get(Columns::ImageName.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
                deleted_at: row.get(Columns::DeletedAt.as_str())?,
            })
        }
    }
}
