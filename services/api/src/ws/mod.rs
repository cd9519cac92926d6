//! WebSocket Relay
//!
//! This module contains the core logic for bridging one widget client
//! socket to one upstream provider socket. It is structured into submodules
//! for clarity:
//!
//! - `protocol`: the JSON message format between client and relay.
//! - `upstream`: the provider socket connector and native-frame classifier.
//! - `session`: the per-connection session actor, from init to finalization.

pub mod protocol;
pub mod session;
pub mod upstream;

pub use session::ws_handler;
