pub mod queries;
pub mod queries_async;
pub mod schema;
