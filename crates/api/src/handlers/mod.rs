//! HTTP request handlers, grouped by resource.

pub mod archives;
pub mod clips;
pub mod config;
pub mod ratings;
pub mod seasons;
