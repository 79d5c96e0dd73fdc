use rusqlite::Row;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use strum::{Display, EnumString};
use time::{Duration, OffsetDateTime};

pub const TABLE_NAME: &str = "task";

pub enum Columns {
    Id,
    BuildingId,
    WorkerId,
    Title,
    Description,
    Category,
    Urgency,
    Status,
    DueAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::BuildingId => "building_id",
            Columns::WorkerId => "worker_id",
            Columns::Title => "title",
            Columns::Description => "description",
            Columns::Category => "category",
            Columns::Urgency => "urgency",
            Columns::Status => "status",
            Columns::DueAt => "due_at",
            Columns::CompletedAt => "completed_at",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cleaning,
    Maintenance,
    Repair,
    Inspection,
    Sanitation,
}

/// Variant order doubles as the sort order, critical last.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, PartialEq, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

/// Tasks are an audit trail, they are mutated on completion but never deleted.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: i64,
    pub building_id: i64,
    pub worker_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub urgency: Urgency,
    pub status: Status,
    pub due_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Task {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::BuildingId,
                Columns::WorkerId,
                Columns::Title,
                Columns::Description,
                Columns::Category,
                Columns::Urgency,
                Columns::Status,
                Columns::DueAt,
                Columns::CompletedAt,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Task> {
        |row| {
            let category: String = row.get(Columns::Category.as_str())?;
            let category = category.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            let urgency: String = row.get(Columns::Urgency.as_str())?;
            let urgency = urgency.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            let status: String = row.get(Columns::Status.as_str())?;
            let status = status.parse().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    7,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Task {
                id: row.get(Columns::Id.as_str())?,
                building_id: row.get(Columns::BuildingId.as_str())?,
                worker_id: row.get(Columns::WorkerId.as_str())?,
                title: row.get(Columns::Title.as_str())?,
                description: row.get(Columns::Description.as_str())?,
                category,
                urgency,
                status,
                due_at: row.get(Columns::DueAt.as_str())?,
                completed_at: row.get(Columns::CompletedAt.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }

    /// A task counts as overdue once its due time plus the configured grace
    /// period has passed. Completed and undated tasks never count.
    pub fn is_overdue(&self, grace_mins: i64, now: OffsetDateTime) -> bool {
        if self.status == Status::Completed {
            return false;
        }
        match self.due_at {
            Some(due_at) => due_at + Duration::minutes(grace_mins) < now,
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Status, Task, Urgency};
    use time::{macros::datetime, Duration, OffsetDateTime};

    fn task(status: Status, due_at: Option<OffsetDateTime>) -> Task {
        Task {
            id: 1,
            building_id: 1,
            worker_id: None,
            title: "".into(),
            description: "".into(),
            category: super::Category::Cleaning,
            urgency: Urgency::Medium,
            status,
            due_at,
            completed_at: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn is_overdue_respects_grace() {
        let now = datetime!(2025-06-01 12:00 UTC);
        let due = now - Duration::minutes(20);
        let task = task(Status::Pending, Some(due));
        assert!(!task.is_overdue(30, now));
        assert!(task.is_overdue(10, now));
    }

    #[test]
    fn is_overdue_ignores_completed_and_undated() {
        let now = datetime!(2025-06-01 12:00 UTC);
        let long_past = now - Duration::days(3);
        assert!(!task(Status::Completed, Some(long_past)).is_overdue(0, now));
        assert!(!task(Status::Pending, None).is_overdue(0, now));
    }

    #[test]
    fn urgency_order() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::High < Urgency::Critical);
    }
}
