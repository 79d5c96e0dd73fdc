pub mod add_building;
pub mod add_task;
pub mod add_worker;
pub mod assign_worker;
pub mod change_password;
pub mod complete_task;
pub mod generate_reports;
pub mod get_admin_dashboard;
pub mod get_assistant_suggestions;
pub mod get_building_dashboard;
pub mod get_worker_dashboard;
pub mod handler;
pub mod login;
pub mod logout;
pub mod reopen_task;
pub mod set_current_building;
pub mod start_task;
pub mod sync_weather;
pub mod unassign_worker;
pub mod verify_schema;
pub mod whoami;
