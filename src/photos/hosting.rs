/**
 * Image Hosting Collaborator
 *
 * Seam for the external image-hosting service. Uploads return the remote
 * URL plus the storage identifier needed to delete the image later. All
 * failures surface immediately; nothing here retries.
 */

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct HostedImage {
    pub url: String,
    pub storage_id: String,
}

#[derive(Debug, Error)]
pub enum HostingError {
    #[error("image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// External image storage.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: Bytes) -> Result<HostedImage, HostingError>;
    async fn delete(&self, storage_id: &str) -> Result<(), HostingError>;
}

/// HTTP client for the image-hosting service.
///
/// Uploads go as multipart POSTs to `{base_url}/upload`; deletes as
/// `DELETE {base_url}/images/{storage_id}`. An API key, when configured,
/// is sent as a bearer token.
pub struct HttpImageHost {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
    public_id: String,
}

impl HttpImageHost {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn rejection(response: reqwest::Response) -> HostingError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        HostingError::Rejected { status, message }
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, image: Bytes) -> Result<HostedImage, HostingError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec()).file_name("upload");
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self.client.post(format!("{}/upload", self.base_url));
        let response = self.authorize(request).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: UploadResponse = response.json().await?;
        tracing::debug!("uploaded image, storage id {}", body.public_id);
        Ok(HostedImage {
            url: body.url,
            storage_id: body.public_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), HostingError> {
        let request = self
            .client
            .delete(format!("{}/images/{storage_id}", self.base_url));
        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        tracing::debug!("deleted remote image {storage_id}");
        Ok(())
    }
}
