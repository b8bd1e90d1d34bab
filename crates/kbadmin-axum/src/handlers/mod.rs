//! HTTP request handlers, grouped by resource.

pub mod indices;
pub mod templates;
