use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the media storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Storage API returned error: {0}")]
    ApiError(String),
}

/// HTTP client for the object-storage backend holding profile photos
///
/// Uploads are a single PUT of the raw bytes; the returned URL is what gets
/// persisted on the profile. Upload failures are non-fatal by policy: the
/// caller logs them and falls back to the placeholder image, so signup
/// never fails because storage is down.
pub struct MediaStorageClient {
    base_url: String,
    public_base_url: String,
    bucket: String,
    api_key: String,
    client: Client,
}

impl MediaStorageClient {
    pub fn new(base_url: String, public_base_url: String, bucket: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            public_base_url,
            bucket,
            api_key,
            client,
        }
    }

    /// Store an image under the given key and return its public URL
    pub async fn store_image(&self, bytes: Vec<u8>, key: &str) -> Result<String, StorageError> {
        let encoded_key = urlencoding::encode(key).into_owned();
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            encoded_key
        );

        tracing::debug!("Uploading {} bytes to {}", bytes.len(), url);

        let response = self
            .client
            .put(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::ApiError(format!(
                "Upload of {} failed: {}",
                key,
                response.status()
            )));
        }

        Ok(format!(
            "{}/{}/{}",
            self.public_base_url.trim_end_matches('/'),
            self.bucket,
            encoded_key
        ))
    }

    /// Object key for a profile photo: prefixed with the owner's username
    pub fn image_key(username: &str, filename: &str) -> String {
        format!("{}-{}", username, filename)
    }
}
