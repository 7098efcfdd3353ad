//! End-to-end tests against the full router over the in-memory store.

mod article_test;
mod category_test;
mod helpers;
