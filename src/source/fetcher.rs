use std::time::Duration;
use tracing::{debug, info};

use crate::{
    error::Result,
    source::types::{LogicalDate, TimeSlot},
};

/// Downloads published result sheets over HTTP.
#[derive(Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl DocumentFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch the sheet for `slot` on `date`.
    pub async fn fetch(&self, slot: &TimeSlot, date: &LogicalDate) -> Result<Vec<u8>> {
        let url = slot.document_url(&self.base_url, date);
        self.fetch_url(&url).await
    }

    pub async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        info!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_builds_slot_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fetchtoday.php"))
            .and(query_param("filename", "DD051124.PDF"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 sheet".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher =
            DocumentFetcher::new(&format!("{}/fetchtoday.php", server.uri()), Duration::from_secs(5))
                .unwrap();
        let date: LogicalDate = "05-11-24".parse().unwrap();
        let bytes = fetcher.fetch(&TimeSlot::new("DD", "6pm"), &date).await.unwrap();

        assert_eq!(bytes, b"%PDF-1.4 sheet".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher =
            DocumentFetcher::new(&format!("{}/fetchtoday.php", server.uri()), Duration::from_secs(5))
                .unwrap();
        let date: LogicalDate = "05-11-24".parse().unwrap();
        let err = fetcher.fetch(&TimeSlot::new("MD", "1pm"), &date).await.unwrap_err();

        assert!(matches!(err, SyncError::Http(_)));
    }
}
