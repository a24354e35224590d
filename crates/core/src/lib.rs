//! Pure domain logic for the ClipSesh backend.
//!
//! This crate has no I/O and no internal dependencies. It owns the rating
//! tally model, moderation policy, scoring, season derivation, the clip
//! query pipeline, and season processing. The `db` and `api` crates build
//! on these types.

pub mod error;
pub mod moderation;
pub mod pipeline;
pub mod processing;
pub mod rating;
pub mod roles;
pub mod scoring;
pub mod season;
pub mod types;
