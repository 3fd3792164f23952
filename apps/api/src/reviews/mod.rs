// Review ingestion: RSS feed fetch, feed parsing, and the per-app batch cache.

pub mod cache;
pub mod fetcher;
pub mod handlers;
pub mod parser;

pub use fetcher::FetchError;
