//! # blog-core
//!
//! Core types, identifier helpers, validation, and rendering for the blog backend.
//!
//! This crate provides the foundational types shared across all blog crates:
//! - Entity structs for articles, categories, tags, and comments
//! - The article publication state (`draft` / `published` / `trashed`)
//! - Document identifier shape checks and the "not found" sentinel
//! - A declarative field validator for inbound payloads
//! - The markdown renderer that fills the cached `renderedContent`
//! - The `{code, message, data | error}` response envelope

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod render;
pub mod responses;
pub mod validate;
