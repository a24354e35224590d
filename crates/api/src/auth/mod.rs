//! Authentication: JWT configuration, claims, and token helpers.

pub mod jwt;

pub use jwt::{Claims, JwtConfig};
