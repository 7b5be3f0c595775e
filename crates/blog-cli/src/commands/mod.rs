pub mod dispatch;
pub mod migrate;
pub mod request;
pub mod schema;
