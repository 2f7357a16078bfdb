mod app;
pub mod http;

pub use app::ServiceError;
