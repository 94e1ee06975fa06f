//! Bearer-token authentication: claims, issuing and verifying tokens, the route guard, password hashing.

mod middleware;
mod password;
mod token;

pub use middleware::require_token;
pub use password::{hash_password, verify_dummy, verify_password};
pub use token::{Claims, JwtKeys};
