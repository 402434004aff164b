use crate::model::{FetchError, RawProduct};

#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawProduct>, FetchError>;
}
