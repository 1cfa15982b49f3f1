//! Where image bytes come from.
//!
//! [`ImageSource`] is the network seam of the fetcher. Production code uses
//! [`HttpImageSource`]; tests substitute an in-memory source.

use crate::error::FetchError;

/// A successfully retrieved image body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// Creates an image body with an optional content type.
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: Option<&str>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.map(ToString::to_string),
        }
    }
}

/// Retrieves the body of a URL in a single attempt.
///
/// Implementations must treat non-success responses as errors.
pub trait ImageSource {
    /// Fetches `url`.
    fn get(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn get(&self, url: &str) -> Result<FetchedImage, FetchError> {
        (**self).get(url)
    }
}

impl<S: ImageSource + ?Sized> ImageSource for Box<S> {
    fn get(&self, url: &str) -> Result<FetchedImage, FetchError> {
        (**self).get(url)
    }
}

#[cfg(feature = "fetch")]
pub use http::HttpImageSource;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;

    use super::{FetchedImage, ImageSource};
    use crate::config::FetchConfig;
    use crate::error::FetchError;

    /// Blocking HTTP source with a fixed timeout and user agent.
    #[derive(Debug, Clone)]
    pub struct HttpImageSource {
        client: Client,
    }

    impl HttpImageSource {
        /// Builds the HTTP client from a fetch configuration.
        pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
            let client = Client::builder()
                .timeout(config.timeout())
                .user_agent(config.user_agent.clone())
                .build()?;
            Ok(Self { client })
        }
    }

    impl ImageSource for HttpImageSource {
        fn get(&self, url: &str) -> Result<FetchedImage, FetchError> {
            let response = self.client.get(url).send()?.error_for_status()?;

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            let bytes = response.bytes()?.to_vec();

            Ok(FetchedImage {
                bytes,
                content_type,
            })
        }
    }

}
