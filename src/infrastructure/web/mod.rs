//! Web page fetching for ingestion

mod fetcher;

pub use fetcher::{FetchedPage, WebFetcher};
