//! Application Layer
//!
//! Contains the session-level services. This layer wires the domain
//! entities to the HTTP repository and owns the per-community caches.

pub mod services;

pub use services::{Client, Community};
