//! Data models for the posts API.
//!
//! This module contains the record the API serves, the filter used to query
//! it, and the response wrapper every request resolves to.

pub mod filter;
pub mod post;
pub mod response;

pub use filter::PostFilter;
pub use post::Post;
pub use response::ApiResponse;
