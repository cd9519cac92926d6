//! Palaver API Library Crate
//!
//! This library contains all the core logic for the Palaver relay service:
//! the application state, the conversation ledger, the REST handlers for
//! signed-URL issuance and analytics, the WebSocket relay, and routing.
//! The `api` binary is a thin wrapper around this library.

pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod router;
pub mod state;
pub mod ws;
