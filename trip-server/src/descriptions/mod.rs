//! Place description lookup and caching.

mod cached;
mod client;
mod error;

pub use cached::{CacheConfig, CachedDescriptions, DescriptionCache};
pub use client::{DescriptionClient, DescriptionClientConfig};
pub use error::DescriptionError;
