//! Credential and token models owned by the client.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{record::*, secret::*, state::*};
