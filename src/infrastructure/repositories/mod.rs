//! Repository Implementations
//!
//! HTTP implementations of the domain's data access seams.
//!
//! ## Available Repositories
//!
//! - **HttpCommunityRepository** - Profiles, threads, messages and thread
//!   membership of one community
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use amino_client::infrastructure::http::{ApiClient, ReqwestTransport};
//! use amino_client::infrastructure::repositories::HttpCommunityRepository;
//!
//! let api = ApiClient::new(Arc::new(transport), base_url, token);
//! let repository = HttpCommunityRepository::new(api, "42");
//! let record = repository.fetch_thread("T1")?;
//! ```

pub mod community_repository;

pub use community_repository::HttpCommunityRepository;
