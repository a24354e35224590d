//! Well-known role name constants.
//!
//! These must match the role values issued by the identity provider in
//! JWT claims. The core treats roles as an opaque set checked for
//! membership.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIPTEAM: &str = "clipteam";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_UPLOADER: &str = "uploader";
pub const ROLE_USER: &str = "user";

/// Whether the role set grants clip-team privileges (internal rating
/// visibility, score sorts, denied-clip visibility).
pub fn is_team(roles: &[String]) -> bool {
    roles.iter().any(|r| r == ROLE_ADMIN || r == ROLE_CLIPTEAM)
}

/// Whether the role set grants administrative privileges.
pub fn is_admin(roles: &[String]) -> bool {
    roles.iter().any(|r| r == ROLE_ADMIN)
}

/// Whether the role set permits clip uploads.
pub fn can_upload(roles: &[String]) -> bool {
    roles.iter().any(|r| r == ROLE_ADMIN || r == ROLE_UPLOADER)
}
