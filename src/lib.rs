//! Flexboard - terminal operator console for a resource-scheduling framework
//!
//! This library provides the building blocks for monitoring a scheduler's
//! cluster state and flexing worker pools up or down: an HTTP client for the
//! scheduler's REST API, a versioned shared state store, background pollers,
//! and the interactive console with its routes, views, and confirmation gate.

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod model;
pub mod poller;
pub mod store;
