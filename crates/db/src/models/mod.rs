//! Database entity models and DTOs.

pub mod archive;
pub mod clip;
pub mod moderation;
pub mod rating;
pub mod season;
