pub mod assistant;
pub mod auth;
pub mod context;
pub mod report;
pub mod stats;
pub mod verifier;
pub mod weather;
