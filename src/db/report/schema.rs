use rusqlite::Row;
use std::sync::OnceLock;
use time::{Date, OffsetDateTime};

pub const TABLE_NAME: &str = "report";

pub enum Columns {
    Id,
    BuildingId,
    Date,
    TotalTasks,
    CompletedTasks,
    OverdueTasks,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::BuildingId => "building_id",
            Columns::Date => "date",
            Columns::TotalTasks => "total_tasks",
            Columns::CompletedTasks => "completed_tasks",
            Columns::OverdueTasks => "overdue_tasks",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }
}

/// One building's task rollup for one day. Regenerating a day rewrites the
/// counts in place, the row id stays stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub id: i64,
    pub building_id: i64,
    pub date: Date,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Report {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::BuildingId,
                Columns::Date,
                Columns::TotalTasks,
                Columns::CompletedTasks,
                Columns::OverdueTasks,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Report> {
        |row| {
            Ok(Report {
                id: row.get(Columns::Id.as_str())?,
                building_id: row.get(Columns::BuildingId.as_str())?,
                date: row.get(Columns::Date.as_str())?,
                total_tasks: row.get(Columns::TotalTasks.as_str())?,
                completed_tasks: row.get(Columns::CompletedTasks.as_str())?,
                overdue_tasks: row.get(Columns::OverdueTasks.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 / self.total_tasks as f64
    }
}

#[cfg(test)]
mod test {
    use super::Report;
    use time::{macros::date, OffsetDateTime};

    #[test]
    fn completion_rate() {
        let mut report = Report {
            id: 1,
            building_id: 1,
            date: date!(2025 - 06 - 01),
            total_tasks: 0,
            completed_tasks: 0,
            overdue_tasks: 0,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        assert_eq!(0.0, report.completion_rate());
        report.total_tasks = 4;
        report.completed_tasks = 3;
        assert_eq!(0.75, report.completion_rate());
    }
}
