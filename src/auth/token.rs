//! Bearer token models: the redacted secret, the cached record, and its lifecycle state.

pub mod record;
pub mod secret;
pub mod state;
