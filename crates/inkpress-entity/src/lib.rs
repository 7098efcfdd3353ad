//! # inkpress-entity
//!
//! Domain entity models for Inkpress. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; the enums stored in columns derive `sqlx::Type`.

pub mod article;
pub mod category;
pub mod namespace;
pub mod user;
