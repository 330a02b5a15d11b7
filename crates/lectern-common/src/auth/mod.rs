//! Bearer-token verification
//!
//! Tokens are issued by the hosted auth provider; this module only verifies
//! them and extracts the caller's identity and role.

mod token;

pub use token::{Claims, Role, TokenError, TokenVerifier};
