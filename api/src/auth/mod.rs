//! Authentication for the HTTP layer.
//!
//! - `claims`: the `AuthUser` wrapper around token claims
//! - `extractors`: `FromRequestParts` for `AuthUser`
//! - `guards`: role guards applied with `from_fn_with_state`
//! - `middleware`: request logging

pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::AuthUser;
