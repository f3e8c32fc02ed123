use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_RANGE;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountSourceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Data source answered with status {0}")]
    Status(StatusCode),

    #[error("Response carried no Content-Range header")]
    MissingContentRange,

    #[error("Unusable Content-Range header: {0}")]
    InvalidContentRange(String),
}

/// Data access port: exact number of rows in a collection.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn count_rows(&self, collection: &str) -> Result<u64, CountSourceError>;
}

/// Counts rows through the PostgREST API of a Supabase project.
///
/// Sends a `HEAD` request with `Prefer: count=exact`, so no rows are
/// transferred and the total arrives in the `Content-Range` header.
pub struct PostgrestCountSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestCountSource {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}?select=*", self.base_url, collection)
    }
}

#[async_trait]
impl CountSource for PostgrestCountSource {
    async fn count_rows(&self, collection: &str) -> Result<u64, CountSourceError> {
        let res = self
            .client
            .head(self.table_url(collection))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "count=exact")
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(CountSourceError::Status(res.status()));
        }

        let range = res
            .headers()
            .get(CONTENT_RANGE)
            .ok_or(CountSourceError::MissingContentRange)?
            .to_str()
            .map_err(|_| CountSourceError::InvalidContentRange("non-ASCII value".to_string()))?;

        parse_content_range_total(range)
    }
}

// "0-24/3573" -> 3573, "*/0" -> 0
fn parse_content_range_total(range: &str) -> Result<u64, CountSourceError> {
    let invalid = || CountSourceError::InvalidContentRange(range.to_string());

    let (_, total) = range.rsplit_once('/').ok_or_else(invalid)?;
    total.trim().parse().map_err(|_| invalid())
}
