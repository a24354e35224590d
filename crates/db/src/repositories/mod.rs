//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod archive_repo;
pub mod clip_repo;
pub mod config_repo;
pub mod rating_repo;
pub mod season_repo;
pub mod vote_repo;

pub use archive_repo::ArchiveRepo;
pub use clip_repo::ClipRepo;
pub use config_repo::ConfigRepo;
pub use rating_repo::RatingRepo;
pub use season_repo::SeasonRepo;
pub use vote_repo::VoteRepo;
