use crate::config::ArtworkSettings;
use crate::error::FetchError;

/// Downloads cover art bytes.
pub trait ArtFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: ArtFetcher> ArtFetcher for &F {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url).await
    }
}

/// `ArtFetcher` backed by a shared `reqwest::Client`.
pub struct HttpArtFetcher {
    client: reqwest::Client,
}

impl HttpArtFetcher {
    pub fn new(settings: &ArtworkSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.fetch_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl ArtFetcher for HttpArtFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Guess an image MIME type from its leading bytes.
pub fn sniff_image_mime(data: &[u8]) -> &'static str {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        "image/gif"
    } else {
        "application/octet-stream"
    }
}
