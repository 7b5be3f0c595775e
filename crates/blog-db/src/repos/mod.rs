//! Repository methods on [`BlogService`](crate::service::BlogService),
//! one module per entity or concern.

pub mod archive;
pub mod article;
pub mod category;
pub mod comment;
pub mod populate;
pub mod relations;
pub mod resolve;
pub mod statistics;
pub mod tag;
mod term;
