pub mod buildings;
pub mod reports;
pub mod tasks;
pub mod weather;
pub mod workers;
