pub mod http;
pub mod traits;

pub use http::DealsFetcher;
pub use traits::Fetch;
