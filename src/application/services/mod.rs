//! Application Services
//!
//! Session-level services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **Client**: Authenticated session, hands out community contexts
//! - **Community**: Per-community cache, lookups, listings and thread actions

pub mod client;
pub mod community;

pub use client::Client;
pub use community::Community;
