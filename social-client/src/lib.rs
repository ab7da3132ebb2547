//! Social platform and hosting clients.
//!
//! One shared `reqwest::Client` (built by [`build_http_client`]) is handed to
//! each concrete client; none of them retries.

pub mod errors;
pub mod html_to_image;
pub mod imgbb;
pub mod instagram;
pub mod types;

use std::time::Duration;

pub use errors::{ConfigError, Error, ProviderError, SocialResult};
pub use html_to_image::{HctiClient, HctiConfig};
pub use imgbb::{ImgbbClient, ImgbbConfig, UploadedImage};
pub use instagram::{InstagramClient, InstagramConfig};
pub use types::{ContainerPayload, GraphComment, Media};

/// HTTP client shared by every social client, 60 s timeout per request.
pub fn build_http_client() -> SocialResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent("crowd-art/0.1")
        .timeout(Duration::from_secs(60))
        .build()?)
}
