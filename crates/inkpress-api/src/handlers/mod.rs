//! HTTP request handlers.

pub mod article;
pub mod category;
pub mod health;
pub mod tag;
