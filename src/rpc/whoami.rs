use crate::db::worker::schema::{Role, Worker};
use crate::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct Res {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub current_building_id: Option<i64>,
}

pub async fn run(caller: &Worker) -> Result<Res> {
    Ok(Res {
        id: caller.id,
        name: caller.name.clone(),
        role: caller.role,
        skills: caller.skills.clone(),
        current_building_id: caller.current_building_id,
    })
}
