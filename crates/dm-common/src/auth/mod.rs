//! Caller identity resolution
//!
//! Credential checks and token issuance live in the external account
//! system; this service only validates access tokens to resolve a caller
//! identity.

mod jwt;

pub use jwt::{Claims, JwtService};
