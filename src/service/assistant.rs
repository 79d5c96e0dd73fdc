use crate::db::conf::schema::Conf;
use crate::db::weather::schema::WeatherObservation;
use crate::service::context::WorkerContext;
use serde::Serialize;
use time::OffsetDateTime;

/// Listed highest priority first, the client renders them in this order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    OverdueTasks,
    WeatherAlert,
    ClockInReminder,
    PendingTasks,
    AllTasksComplete,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Suggestion {
    pub scenario: Scenario,
    pub title: String,
    pub body: String,
}

pub fn suggestions(context: &WorkerContext, conf: &Conf, now: OffsetDateTime) -> Vec<Suggestion> {
    scenarios(context, conf, now)
        .into_iter()
        .map(|it| suggestion(it, context))
        .collect()
}

pub fn scenarios(context: &WorkerContext, conf: &Conf, now: OffsetDateTime) -> Vec<Scenario> {
    let mut res = Vec::new();
    if context.progress.overdue > 0 {
        res.push(Scenario::OverdueTasks);
    }
    if let Some(weather) = &context.weather {
        if !weather.is_stale(conf.weather_stale_after_mins, now) && is_severe(weather) {
            res.push(Scenario::WeatherAlert);
        }
    }
    if context.worker.current_building_id.is_none() {
        res.push(Scenario::ClockInReminder);
    }
    if context.progress.remaining > 0 {
        res.push(Scenario::PendingTasks);
    }
    if context.progress.total > 0 && context.progress.remaining == 0 {
        res.push(Scenario::AllTasksComplete);
    }
    res
}

fn is_severe(weather: &WeatherObservation) -> bool {
    matches!(weather.condition.as_str(), "rain" | "snow" | "thunderstorm")
        || weather.wind_speed >= 50.0
        || weather.temperature <= -10.0
        || weather.temperature >= 35.0
}

pub fn suggestion(scenario: Scenario, context: &WorkerContext) -> Suggestion {
    let (title, body) = match scenario {
        Scenario::OverdueTasks => (
            "Overdue tasks need attention".to_string(),
            format!(
                "You have {} overdue tasks. Start with the oldest one.",
                context.progress.overdue,
            ),
        ),
        Scenario::WeatherAlert => {
            let body = match &context.weather {
                Some(weather) => format!(
                    "It's {} at your building, {:.0}°C with {:.0} km/h wind. Plan outdoor work with care.",
                    weather.condition, weather.temperature, weather.wind_speed,
                ),
                None => "Conditions are rough at your building. Plan outdoor work with care."
                    .to_string(),
            };
            ("Weather heads up".to_string(), body)
        }
        Scenario::ClockInReminder => (
            "You're not clocked in".to_string(),
            "Set your current building so your tasks and weather follow you.".to_string(),
        ),
        Scenario::PendingTasks => (
            "Keep the day moving".to_string(),
            format!(
                "{} of {} tasks are still open.",
                context.progress.remaining, context.progress.total,
            ),
        ),
        Scenario::AllTasksComplete => (
            "All clear".to_string(),
            "Every task for today is done. Nice work.".to_string(),
        ),
    };
    Suggestion {
        scenario,
        title,
        body,
    }
}
