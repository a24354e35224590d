//! Request middleware: authentication and role-based access control
//! extractors.

pub mod auth;
pub mod rbac;

pub use auth::{AuthUser, MaybeUser};
pub use rbac::{RequireAdmin, RequireTeam, RequireUploader};
