mod cache;
mod error;
mod fetcher;
mod parsing;
mod source;
mod types;

pub use cache::TtlCache;
pub use error::FetchError;
pub use fetcher::ElementSetFetcher;
pub use source::{CelestrakClient, TleSource};
pub use types::ElementSet;

#[cfg(test)]
pub(crate) use fetcher::tests as test_support;
