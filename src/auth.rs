//! Identifiers, credentials, and the scoped client token generator.

pub mod id;
pub mod token;

pub use id::*;
pub use token::*;
