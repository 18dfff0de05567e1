//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - HTTP transport and the authenticated API client
//! - In-memory community cache and entity reconciliation
//! - Community repository over the HTTP API

pub mod cache;
pub mod http;
pub mod repositories;
