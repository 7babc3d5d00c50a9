pub mod access_jwt;
pub mod claims;
pub mod factory;

pub use access_jwt::{AccessJwtError, AuthService};
pub use claims::AccessClaims;
pub use factory::build_auth_service;
