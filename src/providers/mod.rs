//! Provider adapter implementations.
//!
//! Each module provides a struct implementing [`crate::provider::ProviderAdapter`]
//! that queries a specific provider's API and maps its response shape into
//! normalized [`crate::types::ResultRecord`] values.

pub mod duckduckgo;
pub mod google;
pub mod news;
pub mod searchapi;
pub mod wikipedia;

pub use duckduckgo::DuckDuckGoAdapter;
pub use google::GoogleAdapter;
pub use news::NewsAdapter;
pub use searchapi::SearchApiAdapter;
pub use wikipedia::WikipediaAdapter;
