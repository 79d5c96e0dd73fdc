pub mod middleware;
pub mod request;
pub mod summary;

pub use middleware::RequestExtension;
